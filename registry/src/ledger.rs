//! Ownership ledger trait.

use crate::RegistryError;
use mintgate_types::{Address, TokenId};
use std::ops::RangeInclusive;

/// The external uniqueness registry the controller drives.
///
/// Implementations own all per-token state (creation, ownership,
/// destruction). The controller only requests mints and burns and reads
/// ownership for authorization checks.
pub trait OwnershipLedger {
    /// Mint `count` new tokens to `owner`, assigning sequential identifiers.
    ///
    /// Returns the inclusive id range assigned, in increasing order.
    /// Identifiers strictly increase across calls and are never reused.
    /// `count` must be at least 1.
    fn mint_sequential(
        &mut self,
        owner: Address,
        count: u64,
    ) -> Result<RangeInclusive<TokenId>, RegistryError>;

    /// Destroy a token. The identifier is retired permanently.
    fn burn(&mut self, id: TokenId) -> Result<(), RegistryError>;

    /// Current holder of a token.
    fn owner_of(&self, id: TokenId) -> Result<Address, RegistryError>;

    /// Number of live (minted, not burned) tokens.
    fn live_count(&self) -> u64;
}
