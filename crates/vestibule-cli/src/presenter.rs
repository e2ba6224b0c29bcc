//! Terminal rendering of the gate overlay.

use vestibule_core::{GatePresenter, Role, VerifiedSink};

/// Renders the gate as terminal output. The "blocking overlay" is the
/// prompt loop in the unlock command: while the gate is presented, the
/// command does not proceed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPresenter;

impl GatePresenter for TerminalPresenter {
    fn present(&self, role: Role, cancellable: bool) {
        match role {
            Role::Password => println!("This content is password protected."),
            Role::AdminPassword => println!("Administrator verification required."),
        }
        if cancellable {
            println!("(submit an empty line to cancel)");
        }
    }

    fn dismiss(&self) {}

    fn focus_input(&self) {}

    fn indicate_failure(&self) {
        println!("Incorrect password, try again.");
    }

    fn clear_failure(&self) {}

    fn conceal_gated(&self) {}

    fn reveal_gated(&self) {}
}

/// Logs the verified notification the way page logic would consume a
/// dispatched event.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnnounceSink;

impl VerifiedSink for AnnounceSink {
    fn verified(&self, role: Role) {
        tracing::info!(%role, "verified notification dispatched");
    }
}
