//! Elapsed-time status narration
//!
//! Keeps a human waiting on an unbounded-latency backend call from
//! perceiving the workspace as stuck. Carries no knowledge of real backend
//! progress.

pub mod driver;
pub mod tier;

pub use driver::StatusDriver;
pub use tier::StatusTier;
