//! Invocation lifecycle state
//!
//! One InvocationState per workspace, owned by the current submission. The
//! numeric sequence ties asynchronous outcomes back to the submission they
//! belong to; outcomes carrying a stale sequence are discarded.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of the current invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvocationPhase {
    /// No submission yet, or the workspace was reset
    Idle,
    /// Request is being built and dispatched
    Submitting,
    /// Backend call is in flight
    AwaitingResult,
    /// Backend returned a result
    Succeeded,
    /// Backend call failed
    Failed,
}

impl InvocationPhase {
    /// Check if this phase is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Check if a submission is outstanding
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Submitting | Self::AwaitingResult)
    }
}

/// State of the current invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationState {
    /// Current phase
    pub phase: InvocationPhase,
    /// Sequence of the owning submission (0 = none yet)
    pub seq: u64,
    /// Textual result, set only on Succeeded
    pub result: Option<String>,
    /// Failure reason, set only on Failed
    pub error_reason: Option<String>,
}

impl InvocationState {
    /// Fresh workspace state
    pub fn idle() -> Self {
        Self {
            phase: InvocationPhase::Idle,
            seq: 0,
            result: None,
            error_reason: None,
        }
    }

    /// Take ownership for a new submission
    pub fn begin(&mut self, seq: u64) {
        self.phase = InvocationPhase::Submitting;
        self.seq = seq;
        self.result = None;
        self.error_reason = None;
    }

    /// The backend call is in flight
    pub fn dispatched(&mut self) {
        self.phase = InvocationPhase::AwaitingResult;
    }

    /// Settle successfully
    pub fn succeed(&mut self, result: String) {
        self.phase = InvocationPhase::Succeeded;
        self.result = Some(result);
        self.error_reason = None;
    }

    /// Settle with a failure reason
    pub fn fail(&mut self, reason: String) {
        self.phase = InvocationPhase::Failed;
        self.result = None;
        self.error_reason = Some(reason);
    }

    /// Back to Idle, clearing any outcome
    pub fn reset(&mut self) {
        *self = Self::idle();
    }
}

impl Default for InvocationState {
    fn default() -> Self {
        Self::idle()
    }
}
