//! Stakeholder table and release bookkeeping.

use crate::SplitterError;
use mintgate_types::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry in the fixed payout table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub address: Address,
    pub shares: u64,
}

/// Proportional payment splitter over a fixed stakeholder table.
///
/// `owed(a) = total_received × shares(a) / total_shares − released(a)`.
/// Division truncates, so `Σ released ≤ total_received` holds at all times;
/// the remainder stays in the treasury until further receipts make it
/// divisible.
#[derive(Clone, Debug)]
pub struct Treasury {
    shares: BTreeMap<Address, u64>,
    total_shares: u64,
    total_received: Amount,
    released: BTreeMap<Address, Amount>,
}

impl Treasury {
    /// Build a treasury from a fixed stakeholder table.
    ///
    /// The table must be non-empty and every entry must carry non-zero
    /// shares. Duplicate addresses accumulate their shares.
    pub fn new(stakeholders: Vec<Stakeholder>) -> Result<Self, SplitterError> {
        if stakeholders.is_empty() {
            return Err(SplitterError::InvalidShares);
        }
        let mut shares: BTreeMap<Address, u64> = BTreeMap::new();
        let mut total_shares: u64 = 0;
        for entry in stakeholders {
            if entry.shares == 0 {
                return Err(SplitterError::InvalidShares);
            }
            total_shares = total_shares
                .checked_add(entry.shares)
                .ok_or(SplitterError::Overflow)?;
            *shares.entry(entry.address).or_insert(0) += entry.shares;
        }
        Ok(Self {
            shares,
            total_shares,
            total_received: Amount::ZERO,
            released: BTreeMap::new(),
        })
    }

    /// Record an incoming payment.
    pub fn record_payment(&mut self, amount: Amount) -> Result<(), SplitterError> {
        self.total_received = self
            .total_received
            .checked_add(amount)
            .ok_or(SplitterError::Overflow)?;
        Ok(())
    }

    /// Shares held by an address (zero for non-stakeholders).
    pub fn shares_of(&self, address: &Address) -> u64 {
        self.shares.get(address).copied().unwrap_or(0)
    }

    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    pub fn total_received(&self) -> Amount {
        self.total_received
    }

    /// Cumulative amount already released to an address.
    pub fn released(&self, address: &Address) -> Amount {
        self.released.get(address).copied().unwrap_or(Amount::ZERO)
    }

    /// Sum of all releases so far.
    pub fn total_released(&self) -> Amount {
        // Σ released ≤ total_received, so this cannot overflow.
        self.released.values().fold(Amount::ZERO, |acc, v| acc + *v)
    }

    /// Amount currently owed to a stakeholder. Pure; zero for
    /// non-stakeholders.
    pub fn pending(&self, address: &Address) -> Result<Amount, SplitterError> {
        let shares = self.shares_of(address);
        if shares == 0 {
            return Ok(Amount::ZERO);
        }
        let entitled = self
            .total_received
            .raw()
            .checked_mul(shares as u128)
            .ok_or(SplitterError::Overflow)?
            / self.total_shares as u128;
        let released = self.released(address).raw();
        // entitled only grows and released never exceeds it
        Ok(Amount::new(entitled - released))
    }

    /// Commit a release to a stakeholder and return the amount owed.
    ///
    /// The caller performs the actual value transfer; nothing here is
    /// mutated until all checks pass, so a failed transfer upstream leaves
    /// no partial credit.
    pub fn withdraw(&mut self, address: &Address) -> Result<Amount, SplitterError> {
        if self.shares_of(address) == 0 {
            return Err(SplitterError::NotAStakeholder);
        }
        let owed = self.pending(address)?;
        if owed.is_zero() {
            return Err(SplitterError::NothingToRelease);
        }
        let entry = self.released.entry(*address).or_insert(Amount::ZERO);
        *entry = entry.checked_add(owed).ok_or(SplitterError::Overflow)?;
        Ok(owed)
    }
}
