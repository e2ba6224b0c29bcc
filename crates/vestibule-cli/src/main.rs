//! vestibule - terminal frontend for the verification gate.
//!
//! Loads the gate configuration (file plus environment overlay), persists
//! verification records beside the configuration file, and drives the gate
//! through a terminal presenter.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vestibule_core::{GateConfig, Role};

mod commands;
mod presenter;

/// vestibule - client-side verification gate
#[derive(Parser, Debug)]
#[command(name = "vestibule")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the gate configuration file
    #[arg(short, long, default_value = "vestibule.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show per-role gate status
    Status,

    /// Interactively verify a password and unlock the gate
    Unlock {
        /// Unlock the administrative role instead of the general one
        #[arg(long)]
        admin: bool,
    },

    /// Exit 0 if the role is verified, 1 otherwise
    Check {
        /// Check the administrative role instead of the general one
        #[arg(long)]
        admin: bool,
    },

    /// Read a secret from stdin and print its configuration digest
    Digest,
}

const fn role_for(admin: bool) -> Role {
    if admin {
        Role::AdminPassword
    } else {
        Role::Password
    }
}

/// Load the configuration file when present, overlay the environment, and
/// surface format diagnostics. A missing file means an unconfigured (open)
/// gate, not an error.
fn load_config(path: &Path) -> Result<GateConfig> {
    let mut config = if path.exists() {
        GateConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?
    } else {
        tracing::debug!(path = %path.display(), "no configuration file; gate is open");
        GateConfig::default()
    };
    config.apply_env();
    config.report_invalid_digests();
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Status => commands::status::run(&config, &cli.config),
        Commands::Unlock { admin } => commands::unlock::run(&config, &cli.config, role_for(admin)),
        Commands::Check { admin } => {
            if !commands::check::run(&config, &cli.config, role_for(admin)) {
                std::process::exit(1);
            }
            Ok(())
        },
        Commands::Digest => commands::digest::run(),
    }
}
