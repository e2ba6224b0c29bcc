//! Produce a configuration digest from a secret on stdin.

use std::io::Read;

use anyhow::{Context, Result};
use vestibule_core::DigesterChain;

/// Read a secret from stdin, trim it the way the gate trims candidates,
/// and print its lowercase hex digest for use as a configuration value.
pub fn run() -> Result<()> {
    let mut secret = String::new();
    std::io::stdin()
        .read_to_string(&mut secret)
        .context("failed to read secret from stdin")?;

    let digest = DigesterChain::default()
        .digest_hex(secret.trim().as_bytes())
        .context("failed to compute digest")?;
    println!("{digest}");
    Ok(())
}
