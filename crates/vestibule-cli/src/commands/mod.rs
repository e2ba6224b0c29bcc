//! CLI command implementations.

pub mod check;
pub mod digest;
pub mod status;
pub mod unlock;

use std::path::Path;
use std::sync::Arc;

use vestibule_core::{FileStore, Gate, GateConfig};

/// Build a gate over a file store resolved beside the configuration file.
pub fn build_gate(config: &GateConfig, config_path: &Path) -> Gate {
    let records = config.storage.resolve_records_file(config_path);
    Gate::new(config.clone(), Arc::new(FileStore::new(records)))
}
