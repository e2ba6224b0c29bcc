//! Scripting surface: is the role verified right now?

use std::path::Path;

use vestibule_core::{GateConfig, Role};

use super::build_gate;

/// Returns whether `role` currently counts as verified. The caller maps
/// this to the process exit code.
pub fn run(config: &GateConfig, config_path: &Path, role: Role) -> bool {
    build_gate(config, config_path).is_verified(role)
}
