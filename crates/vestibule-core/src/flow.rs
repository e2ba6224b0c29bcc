//! Gate flow: wires the engine to a presenter and notification sinks.
//!
//! Mirrors the page lifecycle. [`GateFlow::on_ready`] runs at page-ready and
//! presents the gate when it applies; [`GateFlow::submit`] handles the input
//! action; [`GateFlow::guard`] intercepts access to gated actions (the
//! settings-surface pattern: a click on a guarded control re-presents the
//! gate instead of performing the action).
//!
//! Checks are serialized by construction: the flow is driven from a single
//! event loop and each check completes before the next begins, so there is
//! no racing gate state to reconcile.

use secrecy::{ExposeSecret, SecretString};

use crate::gate::Gate;
use crate::present::{GatePresenter, VerifiedSink};
use crate::role::Role;

/// Drives a [`Gate`] through a [`GatePresenter`], notifying
/// [`VerifiedSink`]s on success.
pub struct GateFlow {
    gate: Gate,
    presenter: Box<dyn GatePresenter>,
    sinks: Vec<Box<dyn VerifiedSink>>,
}

impl GateFlow {
    /// Wire a gate to a presenter.
    #[must_use]
    pub fn new(gate: Gate, presenter: Box<dyn GatePresenter>) -> Self {
        Self {
            gate,
            presenter,
            sinks: Vec::new(),
        }
    }

    /// Subscribe a sink to successful verifications.
    pub fn subscribe(&mut self, sink: Box<dyn VerifiedSink>) {
        self.sinks.push(sink);
    }

    /// The underlying gate.
    #[must_use]
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Page-ready entry point: conceal the gated surfaces and present the
    /// general gate when it is configured and not yet verified.
    ///
    /// Returns whether the gate was presented.
    pub fn on_ready(&self) -> bool {
        if self.gate.config().digest_for(Role::Password).is_none() {
            return false;
        }
        if self.gate.is_verified(Role::Password) {
            return false;
        }
        self.presenter.conceal_gated();
        self.presenter.present(Role::Password, false);
        self.presenter.focus_input();
        true
    }

    /// Handle a submitted candidate for `role`.
    ///
    /// The candidate is trimmed before hashing. Success dismisses the
    /// overlay, reveals the gated surfaces, and notifies subscribers;
    /// failure surfaces the error message and refocuses the input.
    pub fn submit(&self, role: Role, candidate: &SecretString) -> bool {
        let trimmed = candidate.expose_secret().trim();
        if self.gate.verify(trimmed, role) {
            self.presenter.clear_failure();
            self.presenter.dismiss();
            self.presenter.reveal_gated();
            for sink in &self.sinks {
                sink.verified(role);
            }
            true
        } else {
            self.presenter.indicate_failure();
            self.presenter.focus_input();
            false
        }
    }

    /// Gate an action behind `role`.
    ///
    /// Returns `true` when the action may proceed (role unconfigured or
    /// already verified). Otherwise the gate is presented (cancellable for
    /// the admin role) and the action must not proceed.
    pub fn guard(&self, role: Role) -> bool {
        if self.gate.config().digest_for(role).is_none() {
            return true;
        }
        if self.gate.is_verified(role) {
            return true;
        }
        let cancellable = role == Role::AdminPassword;
        self.presenter.present(role, cancellable);
        self.presenter.focus_input();
        false
    }

    /// Settings-surface entry: grant immediately when the admin role is
    /// unconfigured or already verified, otherwise present the cancellable
    /// admin gate. Returns whether access is granted now.
    pub fn request_admin(&self) -> bool {
        self.guard(Role::AdminPassword)
    }
}
