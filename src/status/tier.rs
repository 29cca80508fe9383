//! Status tiers keyed off elapsed wall-clock time
//!
//! The backend gives no progress signal, so the only honest thing to show a
//! waiting user is a qualitative stage derived from how long the call has
//! been outstanding. Tiers name stages, never percentages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tier boundaries
const INITIALIZING_AFTER: Duration = Duration::from_secs(15);
const WAKING_AFTER: Duration = Duration::from_secs(30);
const EXTENDED_WAIT_AFTER: Duration = Duration::from_secs(45);

/// User-facing wait stage, ordered by elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusTier {
    /// First seconds of any request
    Processing,
    /// The request is taking longer than a warm backend usually does
    Initializing,
    /// Long enough that a cold-started instance is the likely cause
    Waking,
    /// Persistent note territory; set expectations, don't guess progress
    ExtendedWait,
}

impl StatusTier {
    /// Tier for a given elapsed duration; pure and total
    pub fn for_elapsed(elapsed: Duration) -> Self {
        if elapsed >= EXTENDED_WAIT_AFTER {
            Self::ExtendedWait
        } else if elapsed >= WAKING_AFTER {
            Self::Waking
        } else if elapsed >= INITIALIZING_AFTER {
            Self::Initializing
        } else {
            Self::Processing
        }
    }

    /// User-facing status line for this tier
    pub fn message(&self) -> &'static str {
        match self {
            Self::Processing => "Processing your request",
            Self::Initializing => "Initializing the advanced models",
            Self::Waking => {
                "Waking up the research backend; a cold instance can take up to a minute"
            }
            Self::ExtendedWait => "Still working on it, hang tight",
        }
    }

    /// Persistent informational note, shown once a tier carries one
    pub fn note(&self) -> Option<&'static str> {
        match self {
            Self::ExtendedWait => {
                Some("Subsequent requests will be faster once the backend is warm")
            }
            _ => None,
        }
    }
}

impl Default for StatusTier {
    fn default() -> Self {
        Self::Processing
    }
}
