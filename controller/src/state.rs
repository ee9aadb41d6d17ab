//! Controller state aggregate.
//!
//! All mutable state lives in one owned structure passed through the
//! engine's operations — no ambient globals. The invariants of the
//! collection (supply cap, one-way freeze) are enforced here; phase,
//! quota, role, and treasury state hang off `ControllerState`.

use crate::phase::{PhaseId, SalePhase};
use crate::quota::QuotaLedger;
use crate::roles::RoleTable;
use crate::ControllerError;
use mintgate_splitter::Treasury;
use mintgate_types::Address;
use std::collections::BTreeMap;

/// The singleton collection record.
#[derive(Clone, Debug)]
pub struct Collection {
    total_issued: u64,
    max_supply: u64,
    base_uri: String,
    metadata_frozen: bool,
}

impl Collection {
    pub fn new(max_supply: u64, base_uri: String) -> Self {
        Self {
            total_issued: 0,
            max_supply,
            base_uri,
            metadata_frozen: false,
        }
    }

    pub fn total_issued(&self) -> u64 {
        self.total_issued
    }

    pub fn max_supply(&self) -> u64 {
        self.max_supply
    }

    pub fn remaining(&self) -> u64 {
        self.max_supply - self.total_issued
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn metadata_frozen(&self) -> bool {
        self.metadata_frozen
    }

    /// Fail if issuing `quantity` more would exceed the cap.
    pub fn check_supply(&self, quantity: u64) -> Result<(), ControllerError> {
        let requested_total = self
            .total_issued
            .checked_add(quantity)
            .ok_or(ControllerError::Overflow)?;
        if requested_total > self.max_supply {
            return Err(ControllerError::SupplyExhausted {
                requested: quantity,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Commit an issuance. Callers run `check_supply` first.
    pub fn record_issued(&mut self, quantity: u64) {
        debug_assert!(self.total_issued + quantity <= self.max_supply);
        self.total_issued += quantity;
    }

    /// Free one unit of capacity after a burn. The identifier itself is
    /// never reissued — that is the registry's concern.
    pub fn record_burned(&mut self) -> Result<(), ControllerError> {
        self.total_issued = self
            .total_issued
            .checked_sub(1)
            .ok_or(ControllerError::Overflow)?;
        Ok(())
    }

    /// The cap is monotone non-increasing and never drops below the issued
    /// count.
    pub fn reduce_max_supply(&mut self, new_cap: u64) -> Result<(), ControllerError> {
        if new_cap > self.max_supply {
            return Err(ControllerError::SupplyIncreaseForbidden);
        }
        if new_cap < self.total_issued {
            return Err(ControllerError::SupplyBelowIssued);
        }
        self.max_supply = new_cap;
        Ok(())
    }

    pub fn set_base_uri(&mut self, uri: String) -> Result<(), ControllerError> {
        if self.metadata_frozen {
            return Err(ControllerError::MetadataFrozen);
        }
        self.base_uri = uri;
        Ok(())
    }

    /// One-way. There is deliberately no unfreeze.
    pub fn freeze_metadata(&mut self) {
        self.metadata_frozen = true;
    }
}

/// Everything the controller owns, as one aggregate.
#[derive(Clone, Debug)]
pub struct ControllerState {
    /// Deployment identity, mixed into every assertion message so
    /// assertions cannot be replayed across deployments.
    pub collection_id: [u8; 32],
    pub collection: Collection,
    pub phases: BTreeMap<PhaseId, SalePhase>,
    pub quotas: QuotaLedger,
    /// Free-claim nonce counter per participant, starting at 0.
    pub claim_nonces: BTreeMap<Address, u64>,
    pub roles: RoleTable,
    pub treasury: Treasury,
    /// When true, `Airdrop` role holders may airdrop in addition to the
    /// owner.
    pub delegated_airdrop: bool,
}

impl ControllerState {
    pub fn phase(&self, id: &PhaseId) -> Result<&SalePhase, ControllerError> {
        self.phases
            .get(id)
            .ok_or_else(|| ControllerError::UnknownPhase(id.clone()))
    }

    pub fn phase_mut(&mut self, id: &PhaseId) -> Result<&mut SalePhase, ControllerError> {
        self.phases
            .get_mut(id)
            .ok_or_else(|| ControllerError::UnknownPhase(id.clone()))
    }

    pub fn claim_nonce(&self, participant: &Address) -> u64 {
        self.claim_nonces.get(participant).copied().unwrap_or(0)
    }
}
