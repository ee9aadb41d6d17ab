//! In-memory ownership ledger.

use crate::{OwnershipLedger, RegistryError};
use mintgate_types::{Address, TokenId};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// An in-memory registry keyed by token id.
///
/// `next_id` is monotone: burning a token leaves a permanent gap rather than
/// freeing its identifier for reassignment.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    owners: BTreeMap<TokenId, Address>,
    next_id: u64,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            owners: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// All token ids currently held by `owner`, in increasing order.
    pub fn tokens_of(&self, owner: &Address) -> Vec<TokenId> {
        self.owners
            .iter()
            .filter(|(_, holder)| *holder == owner)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl OwnershipLedger for MemoryLedger {
    fn mint_sequential(
        &mut self,
        owner: Address,
        count: u64,
    ) -> Result<RangeInclusive<TokenId>, RegistryError> {
        debug_assert!(count > 0, "callers must reject zero-quantity mints");
        let first = self.next_id;
        let last = first
            .checked_add(count - 1)
            .ok_or(RegistryError::IdExhausted)?;
        self.next_id = last.checked_add(1).ok_or(RegistryError::IdExhausted)?;
        for raw in first..=last {
            self.owners.insert(TokenId::new(raw), owner);
        }
        Ok(TokenId::new(first)..=TokenId::new(last))
    }

    fn burn(&mut self, id: TokenId) -> Result<(), RegistryError> {
        self.owners
            .remove(&id)
            .map(|_| ())
            .ok_or(RegistryError::UnknownToken(id))
    }

    fn owner_of(&self, id: TokenId) -> Result<Address, RegistryError> {
        self.owners
            .get(&id)
            .copied()
            .ok_or(RegistryError::UnknownToken(id))
    }

    fn live_count(&self) -> u64 {
        self.owners.len() as u64
    }
}
