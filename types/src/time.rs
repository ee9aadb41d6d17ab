//! Timestamp type used throughout the controller.
//!
//! Timestamps are Unix epoch seconds (UTC). The controller never reads the
//! system clock itself — the current time is supplied explicitly with every
//! call, so time gating stays deterministic and testable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    /// Sentinel for "not yet scheduled" — a phase whose start time is
    /// `FAR_FUTURE` is closed until an admin sets a real start time.
    pub const FAR_FUTURE: Self = Self(u64::MAX);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    ///
    /// Only callers at the edge (the CLI) should use this; the controller
    /// itself takes time as an argument.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::FAR_FUTURE {
            write!(f, "unscheduled")
        } else {
            write!(f, "{}s", self.0)
        }
    }
}
