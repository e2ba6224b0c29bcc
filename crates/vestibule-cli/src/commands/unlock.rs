//! Interactive unlock: the terminal rendition of the gate overlay.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use secrecy::SecretString;
use vestibule_core::{GateConfig, GateFlow, Role};

use crate::presenter::{AnnounceSink, TerminalPresenter};

use super::build_gate;

/// Present the gate for `role` and loop on candidate input until it
/// verifies, the user cancels (admin only), or stdin closes.
pub fn run(config: &GateConfig, config_path: &Path, role: Role) -> Result<()> {
    let gate = build_gate(config, config_path);

    if gate.config().digest_for(role).is_none() {
        println!("No {role} digest configured; the gate is open.");
        return Ok(());
    }

    let mut flow = GateFlow::new(gate, Box::new(TerminalPresenter));
    flow.subscribe(Box::new(AnnounceSink));

    // guard presents the overlay when the role is locked.
    if flow.guard(role) {
        println!("Already verified.");
        return Ok(());
    }
    let cancellable = role == Role::AdminPassword;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Password: ");
        io::stdout().flush().context("failed to flush prompt")?;

        let Some(line) = lines.next() else {
            bail!("input closed before verification");
        };
        let line = line.context("failed to read candidate")?;

        if cancellable && line.trim().is_empty() {
            println!("Cancelled.");
            return Ok(());
        }

        if flow.submit(role, &SecretString::from(line)) {
            println!(
                "Verified. Access is cached for {} hours.",
                flow.gate().config().gate.verification_ttl_hours
            );
            return Ok(());
        }
    }
}
