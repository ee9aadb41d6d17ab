//! Sale phase configuration.
//!
//! Phase cardinality is a deployment decision, not a protocol constant: a
//! drop may run `og`/`whitelist`/`public`, or any other set of named
//! cohorts. Each phase carries its own price, limits, start time, and
//! gating rule, and multiple phases may be open simultaneously.

use mintgate_types::{Amount, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A phase name, normalized to lowercase.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PhaseId(String);

impl PhaseId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How participation in a phase is authorized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseGate {
    /// Anyone may mint; no assertion required.
    Open,
    /// A SIGNER-role assertion over the participant is required.
    Signed,
}

/// One cohort's sale parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalePhase {
    /// Phase opens when `now >= start_time`. `Timestamp::FAR_FUTURE` means
    /// the phase has not been scheduled yet.
    pub start_time: Timestamp,
    pub price_per_unit: Amount,
    /// Maximum units per single transaction.
    pub max_per_tx: u64,
    /// Maximum successful transactions per participant in this phase.
    pub max_tx_per_participant: u32,
    pub gate: PhaseGate,
}

impl SalePhase {
    pub fn is_open(&self, now: Timestamp) -> bool {
        now >= self.start_time
    }
}
