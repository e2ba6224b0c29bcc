//! Per-role gate status report.

use std::path::Path;

use anyhow::Result;
use chrono::DateTime;
use vestibule_core::{GateConfig, GateStatus, Role};

use super::build_gate;

/// Print the derived status of every role.
pub fn run(config: &GateConfig, config_path: &Path) -> Result<()> {
    let gate = build_gate(config, config_path);

    if !gate.is_protected() {
        println!("gate: open (no valid digest configured)");
        return Ok(());
    }

    for role in Role::ALL {
        match gate.status(role) {
            GateStatus::Unconfigured => println!("{role:<14} unconfigured"),
            GateStatus::Locked => println!("{role:<14} locked"),
            GateStatus::Unlocked { expires_at_ms } => {
                println!("{role:<14} unlocked until {}", format_expiry(expires_at_ms));
            },
        }
    }
    Ok(())
}

fn format_expiry(expires_at_ms: i64) -> String {
    DateTime::from_timestamp_millis(expires_at_ms).map_or_else(
        || format!("epoch+{expires_at_ms}ms"),
        |when| when.to_rfc3339(),
    )
}
