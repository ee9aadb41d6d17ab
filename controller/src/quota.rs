//! Per-participant, per-phase transaction counters.
//!
//! Counters are created lazily on first use, never deleted, and only ever
//! increment — one increment per successful transaction, regardless of the
//! quantity minted in it.

use crate::phase::PhaseId;
use crate::ControllerError;
use mintgate_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuotaLedger {
    used: BTreeMap<(Address, PhaseId), u32>,
}

impl QuotaLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transactions this participant has already executed in this phase.
    pub fn used(&self, participant: &Address, phase: &PhaseId) -> u32 {
        self.used
            .get(&(*participant, phase.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Fail if one more transaction would exceed `limit`.
    ///
    /// A limit lowered below an already-accrued count never resets the
    /// counter; it simply makes further transactions fail here.
    pub fn check(
        &self,
        participant: &Address,
        phase: &PhaseId,
        limit: u32,
    ) -> Result<(), ControllerError> {
        let used = self.used(participant, phase);
        if used >= limit {
            return Err(ControllerError::TooManyTransactions { used, limit });
        }
        Ok(())
    }

    /// Count one successful transaction. Callers check first.
    pub fn record(&mut self, participant: &Address, phase: &PhaseId) {
        *self.used.entry((*participant, phase.clone())).or_insert(0) += 1;
    }
}
