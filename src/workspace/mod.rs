//! Tool-invocation workspace
//!
//! The state machine around one outstanding submission: validate, dispatch,
//! narrate the wait, settle, and guard against stale outcomes.

pub mod session;
pub mod state;

pub use session::{Submission, Workspace};
pub use state::{InvocationPhase, InvocationState};
