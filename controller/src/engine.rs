//! The issuance engine.
//!
//! Every public operation is one atomic state transition: all checks run
//! against unmodified state, and mutation starts only once nothing can
//! fail. The current time and the paid amount are explicit arguments — the
//! engine never reads a clock or holds funds itself.

use crate::authorizer::{claim_message, is_authorized, sale_message};
use crate::phase::{PhaseGate, PhaseId, SalePhase};
use crate::roles::RoleId;
use crate::state::ControllerState;
use crate::ControllerError;
use mintgate_registry::OwnershipLedger;
use mintgate_types::{Address, Amount, Signature, Timestamp, TokenId};
use std::ops::RangeInclusive;

/// The identifier range a mint of `quantity` tokens receives when
/// `total_issued` tokens have been issued so far.
///
/// Pure: allocation is a function of the running count, independent of the
/// registry's storage. The first token ever issued is id 1.
pub fn allocate_ids(total_issued: u64, quantity: u64) -> RangeInclusive<TokenId> {
    TokenId::new(total_issued + 1)..=TokenId::new(total_issued + quantity)
}

/// Outcome of a successful issuance call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintReceipt {
    pub ids: RangeInclusive<TokenId>,
    pub quantity: u64,
    pub paid: Amount,
}

/// The issuance controller.
pub struct Controller {
    state: ControllerState,
}

impl Controller {
    pub fn new(state: ControllerState) -> Self {
        Self { state }
    }

    // --- read surface -----------------------------------------------------

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn owner(&self) -> Address {
        self.state.roles.owner()
    }

    pub fn total_issued(&self) -> u64 {
        self.state.collection.total_issued()
    }

    pub fn max_supply(&self) -> u64 {
        self.state.collection.max_supply()
    }

    pub fn base_uri(&self) -> &str {
        self.state.collection.base_uri()
    }

    pub fn metadata_frozen(&self) -> bool {
        self.state.collection.metadata_frozen()
    }

    pub fn phase(&self, id: &PhaseId) -> Result<&SalePhase, ControllerError> {
        self.state.phase(id)
    }

    pub fn quota_used(&self, participant: &Address, phase: &PhaseId) -> u32 {
        self.state.quotas.used(participant, phase)
    }

    pub fn claim_nonce(&self, participant: &Address) -> u64 {
        self.state.claim_nonce(participant)
    }

    pub fn has_role(&self, role: RoleId, address: &Address) -> bool {
        self.state.roles.has_role(role, address)
    }

    pub fn released(&self, stakeholder: &Address) -> Amount {
        self.state.treasury.released(stakeholder)
    }

    pub fn total_received(&self) -> Amount {
        self.state.treasury.total_received()
    }

    // --- issuance ---------------------------------------------------------

    /// Phase-gated, priced issuance.
    ///
    /// For `PhaseGate::Signed` phases the caller presents a SIGNER-role
    /// assertion; replay across transactions is bounded by the quota
    /// counter, so the same assertion is good for up to
    /// `max_tx_per_participant` transactions. `paid` must match
    /// `quantity × price_per_unit` exactly.
    pub fn mint<L: OwnershipLedger>(
        &mut self,
        registry: &mut L,
        caller: Address,
        phase_id: &PhaseId,
        quantity: u64,
        assertion: Option<&Signature>,
        paid: Amount,
        now: Timestamp,
    ) -> Result<MintReceipt, ControllerError> {
        let phase = self.state.phase(phase_id)?;
        if !phase.is_open(now) {
            return Err(ControllerError::PhaseNotOpen(phase_id.clone()));
        }
        if quantity == 0 {
            return Err(ControllerError::ZeroQuantity);
        }
        if quantity > phase.max_per_tx {
            return Err(ControllerError::QuantityExceedsPerTxLimit {
                quantity,
                limit: phase.max_per_tx,
            });
        }
        let required = phase
            .price_per_unit
            .checked_mul(quantity)
            .ok_or(ControllerError::Overflow)?;
        if paid != required {
            return Err(ControllerError::WrongPrice { paid, required });
        }
        self.state.collection.check_supply(quantity)?;
        self.state
            .quotas
            .check(&caller, phase_id, phase.max_tx_per_participant)?;
        if phase.gate == PhaseGate::Signed {
            let signature = assertion.ok_or(ControllerError::InvalidSignature)?;
            let message = sale_message(&self.state.collection_id, phase_id, &caller);
            if !is_authorized(&message, signature, self.state.roles.members(RoleId::Signer)) {
                return Err(ControllerError::InvalidSignature);
            }
        }
        // Receipts must stay recordable before anything is committed.
        self.state
            .treasury
            .total_received()
            .checked_add(paid)
            .ok_or(ControllerError::Overflow)?;

        let expected = allocate_ids(self.total_issued(), quantity);
        let ids = registry.mint_sequential(caller, quantity)?;
        debug_assert_eq!(ids, expected, "registry id sequence out of sync");
        self.state.collection.record_issued(quantity);
        self.state.quotas.record(&caller, phase_id);
        self.state.treasury.record_payment(paid)?;
        Ok(MintReceipt {
            ids,
            quantity,
            paid,
        })
    }

    /// Free claim authorized by a FREE_SIGNER assertion over
    /// `(participant, quantity, nonce)`.
    ///
    /// Valid only when `nonce` equals the participant's current counter;
    /// the counter increments exactly once per successful claim, so a
    /// consumed assertion can never be replayed. A stale nonce and a forged
    /// signature are indistinguishable to the caller — both mean the
    /// assertion does not authorize the current state.
    pub fn free_claim<L: OwnershipLedger>(
        &mut self,
        registry: &mut L,
        caller: Address,
        quantity: u64,
        nonce: u64,
        assertion: &Signature,
    ) -> Result<MintReceipt, ControllerError> {
        if quantity == 0 {
            return Err(ControllerError::ZeroQuantity);
        }
        self.state.collection.check_supply(quantity)?;
        if nonce != self.state.claim_nonce(&caller) {
            return Err(ControllerError::InvalidSignature);
        }
        let message = claim_message(&self.state.collection_id, &caller, quantity, nonce);
        if !is_authorized(
            &message,
            assertion,
            self.state.roles.members(RoleId::FreeSigner),
        ) {
            return Err(ControllerError::InvalidSignature);
        }

        let ids = registry.mint_sequential(caller, quantity)?;
        self.state.collection.record_issued(quantity);
        *self.state.claim_nonces.entry(caller).or_insert(0) += 1;
        Ok(MintReceipt {
            ids,
            quantity,
            paid: Amount::ZERO,
        })
    }

    /// Administrative issuance to an arbitrary recipient.
    ///
    /// Bypasses price and phase-open checks; the supply cap still binds.
    /// Owner-only, unless the drop delegates the AIRDROP role.
    pub fn airdrop<L: OwnershipLedger>(
        &mut self,
        registry: &mut L,
        caller: &Address,
        recipient: Address,
        quantity: u64,
    ) -> Result<MintReceipt, ControllerError> {
        if !self.state.roles.is_owner(caller) {
            if self.state.delegated_airdrop {
                self.state.roles.require_role(RoleId::Airdrop, caller)?;
            } else {
                return Err(ControllerError::NotOwner);
            }
        }
        if quantity == 0 {
            return Err(ControllerError::ZeroQuantity);
        }
        self.state.collection.check_supply(quantity)?;

        let ids = registry.mint_sequential(recipient, quantity)?;
        self.state.collection.record_issued(quantity);
        tracing::info!(recipient = %recipient, quantity, "airdrop issued");
        Ok(MintReceipt {
            ids,
            quantity,
            paid: Amount::ZERO,
        })
    }

    /// Burn a held token, freeing capacity under the cap. The identifier
    /// itself is retired forever.
    pub fn burn<L: OwnershipLedger>(
        &mut self,
        registry: &mut L,
        caller: &Address,
        token: TokenId,
    ) -> Result<(), ControllerError> {
        let holder = registry.owner_of(token)?;
        if holder != *caller {
            return Err(ControllerError::NotTokenOwner(token));
        }
        registry.burn(token)?;
        self.state.collection.record_burned()?;
        Ok(())
    }

    // --- payment surface --------------------------------------------------

    /// Release a stakeholder's owed share. Intentionally callable by
    /// anyone; the payout target is the stakeholder address, not the
    /// caller.
    pub fn withdraw(&mut self, stakeholder: &Address) -> Result<Amount, ControllerError> {
        let owed = self.state.treasury.withdraw(stakeholder)?;
        tracing::info!(stakeholder = %stakeholder, amount = %owed, "release committed");
        Ok(owed)
    }

    // --- administrative surface -------------------------------------------

    pub fn set_sale_price(
        &mut self,
        caller: &Address,
        phase_id: &PhaseId,
        price: Amount,
    ) -> Result<(), ControllerError> {
        self.state.roles.require_owner(caller)?;
        self.state.phase_mut(phase_id)?.price_per_unit = price;
        tracing::info!(phase = %phase_id, price = %price, "sale price updated");
        Ok(())
    }

    pub fn set_max_per_tx(
        &mut self,
        caller: &Address,
        phase_id: &PhaseId,
        limit: u64,
    ) -> Result<(), ControllerError> {
        self.state.roles.require_owner(caller)?;
        self.state.phase_mut(phase_id)?.max_per_tx = limit;
        tracing::info!(phase = %phase_id, limit, "per-transaction limit updated");
        Ok(())
    }

    /// Effective immediately for subsequent checks; never resets counters
    /// already accrued.
    pub fn set_max_tx_per_participant(
        &mut self,
        caller: &Address,
        phase_id: &PhaseId,
        limit: u32,
    ) -> Result<(), ControllerError> {
        self.state.roles.require_owner(caller)?;
        self.state.phase_mut(phase_id)?.max_tx_per_participant = limit;
        tracing::info!(phase = %phase_id, limit, "participant quota updated");
        Ok(())
    }

    pub fn set_sale_time(
        &mut self,
        caller: &Address,
        phase_id: &PhaseId,
        start_time: Timestamp,
    ) -> Result<(), ControllerError> {
        self.state.roles.require_owner(caller)?;
        self.state.phase_mut(phase_id)?.start_time = start_time;
        tracing::info!(phase = %phase_id, start = %start_time, "sale time updated");
        Ok(())
    }

    pub fn reduce_max_supply(
        &mut self,
        caller: &Address,
        new_cap: u64,
    ) -> Result<(), ControllerError> {
        self.state.roles.require_owner(caller)?;
        self.state.collection.reduce_max_supply(new_cap)?;
        tracing::info!(new_cap, "max supply reduced");
        Ok(())
    }

    pub fn set_base_uri(&mut self, caller: &Address, uri: String) -> Result<(), ControllerError> {
        self.state.roles.require_owner(caller)?;
        self.state.collection.set_base_uri(uri)
    }

    pub fn freeze_metadata(&mut self, caller: &Address) -> Result<(), ControllerError> {
        self.state.roles.require_owner(caller)?;
        self.state.collection.freeze_metadata();
        tracing::info!("metadata frozen");
        Ok(())
    }

    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: RoleId,
        address: Address,
    ) -> Result<(), ControllerError> {
        self.state.roles.require_admin(caller)?;
        self.state.roles.grant(role, address);
        tracing::info!(role = %role, address = %address, "role granted");
        Ok(())
    }

    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: RoleId,
        address: &Address,
    ) -> Result<(), ControllerError> {
        self.state.roles.require_admin(caller)?;
        self.state.roles.revoke(role, address);
        tracing::info!(role = %role, address = %address, "role revoked");
        Ok(())
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<(), ControllerError> {
        self.state.roles.require_owner(caller)?;
        self.state.roles.transfer_ownership(new_owner);
        tracing::info!(new_owner = %new_owner, "ownership transferred");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DropConfig;
    use crate::quota::QuotaLedger;
    use crate::roles::RoleTable;
    use crate::state::Collection;
    use mintgate_crypto::{keypair_from_seed, sign_message};
    use mintgate_registry::MemoryLedger;
    use mintgate_splitter::{Stakeholder, Treasury};
    use mintgate_types::KeyPair;
    use std::collections::BTreeMap;

    const COLLECTION_ID: [u8; 32] = [7u8; 32];
    const PUBLIC_PRICE: u128 = 2_800_000_000_000_000;

    fn addr(n: u8) -> Address {
        Address::new([n; 32])
    }

    fn signer(seed: u8) -> (KeyPair, Address) {
        let kp = keypair_from_seed(&[seed; 32]);
        let address = Address::from_public_key(&kp.public);
        (kp, address)
    }

    fn owner() -> Address {
        addr(1)
    }

    fn phase_table() -> BTreeMap<PhaseId, SalePhase> {
        let mut phases = BTreeMap::new();
        phases.insert(
            PhaseId::new("og"),
            SalePhase {
                start_time: Timestamp::new(1_000),
                price_per_unit: Amount::new(1_000_000),
                max_per_tx: 3,
                max_tx_per_participant: 2,
                gate: PhaseGate::Signed,
            },
        );
        phases.insert(
            PhaseId::new("whitelist"),
            SalePhase {
                start_time: Timestamp::FAR_FUTURE,
                price_per_unit: Amount::new(2_000_000),
                max_per_tx: 2,
                max_tx_per_participant: 1,
                gate: PhaseGate::Signed,
            },
        );
        phases.insert(
            PhaseId::new("public"),
            SalePhase {
                start_time: Timestamp::new(2_000),
                price_per_unit: Amount::new(PUBLIC_PRICE),
                max_per_tx: 5,
                max_tx_per_participant: 2,
                gate: PhaseGate::Open,
            },
        );
        phases
    }

    fn controller() -> Controller {
        let treasury = Treasury::new(vec![
            Stakeholder { address: addr(50), shares: 3 },
            Stakeholder { address: addr(51), shares: 1 },
        ])
        .unwrap();
        Controller::new(ControllerState {
            collection_id: COLLECTION_ID,
            collection: Collection::new(1111, "ipfs://mintgate/".into()),
            phases: phase_table(),
            quotas: QuotaLedger::new(),
            claim_nonces: BTreeMap::new(),
            roles: RoleTable::new(owner()),
            treasury,
            delegated_airdrop: false,
        })
    }

    fn public_payment(quantity: u64) -> Amount {
        Amount::new(PUBLIC_PRICE).checked_mul(quantity).unwrap()
    }

    #[test]
    fn public_mint_example_scenario() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let buyer = addr(9);

        let receipt = c
            .mint(
                &mut reg,
                buyer,
                &PhaseId::new("public"),
                2,
                None,
                public_payment(2),
                Timestamp::new(2_000),
            )
            .unwrap();
        assert_eq!(receipt.ids, TokenId::new(1)..=TokenId::new(2));
        assert_eq!(receipt.paid, Amount::new(5_600_000_000_000_000));
        assert_eq!(c.total_issued(), 2);
        assert_eq!(reg.owner_of(TokenId::new(1)).unwrap(), buyer);

        // second transaction fills the quota of 2
        c.mint(
            &mut reg,
            buyer,
            &PhaseId::new("public"),
            2,
            None,
            public_payment(2),
            Timestamp::new(2_001),
        )
        .unwrap();

        // third is rejected and leaves everything unchanged
        let err = c
            .mint(
                &mut reg,
                buyer,
                &PhaseId::new("public"),
                2,
                None,
                public_payment(2),
                Timestamp::new(2_002),
            )
            .unwrap_err();
        assert_eq!(err, ControllerError::TooManyTransactions { used: 2, limit: 2 });
        assert_eq!(c.total_issued(), 4);
        assert_eq!(c.quota_used(&addr(9), &PhaseId::new("public")), 2);
        assert_eq!(reg.live_count(), 4);
    }

    #[test]
    fn unknown_phase_rejected() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let err = c
            .mint(
                &mut reg,
                addr(9),
                &PhaseId::new("presale"),
                1,
                None,
                Amount::ZERO,
                Timestamp::new(2_000),
            )
            .unwrap_err();
        assert_eq!(err, ControllerError::UnknownPhase(PhaseId::new("presale")));
    }

    #[test]
    fn closed_phase_rejected() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let err = c
            .mint(
                &mut reg,
                addr(9),
                &PhaseId::new("public"),
                1,
                None,
                public_payment(1),
                Timestamp::new(1_999),
            )
            .unwrap_err();
        assert_eq!(err, ControllerError::PhaseNotOpen(PhaseId::new("public")));
    }

    #[test]
    fn unscheduled_phase_is_closed() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let err = c
            .mint(
                &mut reg,
                addr(9),
                &PhaseId::new("whitelist"),
                1,
                None,
                Amount::new(2_000_000),
                Timestamp::new(u64::MAX - 1),
            )
            .unwrap_err();
        assert_eq!(err, ControllerError::PhaseNotOpen(PhaseId::new("whitelist")));
    }

    #[test]
    fn payment_must_be_exact() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let phase = PhaseId::new("public");
        for paid in [
            Amount::ZERO,
            public_payment(1),                          // underpaid for 2
            public_payment(2).checked_add(Amount::new(1)).unwrap(), // overpaid
        ] {
            let err = c
                .mint(&mut reg, addr(9), &phase, 2, None, paid, Timestamp::new(2_000))
                .unwrap_err();
            assert_eq!(
                err,
                ControllerError::WrongPrice { paid, required: public_payment(2) }
            );
        }
        assert_eq!(c.total_issued(), 0);
        assert_eq!(reg.live_count(), 0);
    }

    #[test]
    fn per_tx_limit_enforced() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let err = c
            .mint(
                &mut reg,
                addr(9),
                &PhaseId::new("public"),
                6,
                None,
                public_payment(6),
                Timestamp::new(2_000),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ControllerError::QuantityExceedsPerTxLimit { quantity: 6, limit: 5 }
        );
    }

    #[test]
    fn zero_quantity_rejected() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let err = c
            .mint(
                &mut reg,
                addr(9),
                &PhaseId::new("public"),
                0,
                None,
                Amount::ZERO,
                Timestamp::new(2_000),
            )
            .unwrap_err();
        assert_eq!(err, ControllerError::ZeroQuantity);
    }

    #[test]
    fn supply_cap_enforced() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        c.reduce_max_supply(&owner(), 3).unwrap();
        let err = c
            .mint(
                &mut reg,
                addr(9),
                &PhaseId::new("public"),
                4,
                None,
                public_payment(4),
                Timestamp::new(2_000),
            )
            .unwrap_err();
        assert_eq!(err, ControllerError::SupplyExhausted { requested: 4, remaining: 3 });
        assert_eq!(c.total_issued(), 0);
    }

    #[test]
    fn gated_mint_requires_assertion() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let err = c
            .mint(
                &mut reg,
                addr(9),
                &PhaseId::new("og"),
                1,
                None,
                Amount::new(1_000_000),
                Timestamp::new(1_000),
            )
            .unwrap_err();
        assert_eq!(err, ControllerError::InvalidSignature);
    }

    #[test]
    fn gated_mint_with_valid_assertion() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let (kp, signer_addr) = signer(40);
        c.grant_role(&owner(), RoleId::Signer, signer_addr).unwrap();

        let buyer = addr(9);
        let message = sale_message(&COLLECTION_ID, &PhaseId::new("og"), &buyer);
        let sig = sign_message(&message, &kp.private);

        let receipt = c
            .mint(
                &mut reg,
                buyer,
                &PhaseId::new("og"),
                2,
                Some(&sig),
                Amount::new(2_000_000),
                Timestamp::new(1_000),
            )
            .unwrap();
        assert_eq!(receipt.ids, TokenId::new(1)..=TokenId::new(2));

        // the same assertion is good for a second transaction (quota 2)
        c.mint(
            &mut reg,
            buyer,
            &PhaseId::new("og"),
            1,
            Some(&sig),
            Amount::new(1_000_000),
            Timestamp::new(1_001),
        )
        .unwrap();

        // and then the quota, not the assertion, stops the third
        let err = c
            .mint(
                &mut reg,
                buyer,
                &PhaseId::new("og"),
                1,
                Some(&sig),
                Amount::new(1_000_000),
                Timestamp::new(1_002),
            )
            .unwrap_err();
        assert_eq!(err, ControllerError::TooManyTransactions { used: 2, limit: 2 });
    }

    #[test]
    fn assertion_for_other_participant_rejected() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let (kp, signer_addr) = signer(40);
        c.grant_role(&owner(), RoleId::Signer, signer_addr).unwrap();

        let message = sale_message(&COLLECTION_ID, &PhaseId::new("og"), &addr(9));
        let sig = sign_message(&message, &kp.private);

        // addr(10) presents addr(9)'s assertion
        let err = c
            .mint(
                &mut reg,
                addr(10),
                &PhaseId::new("og"),
                1,
                Some(&sig),
                Amount::new(1_000_000),
                Timestamp::new(1_000),
            )
            .unwrap_err();
        assert_eq!(err, ControllerError::InvalidSignature);
    }

    #[test]
    fn revoked_signer_invalidates_outstanding_assertion() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let (kp, signer_addr) = signer(40);
        c.grant_role(&owner(), RoleId::Signer, signer_addr).unwrap();

        let buyer = addr(9);
        let message = sale_message(&COLLECTION_ID, &PhaseId::new("og"), &buyer);
        let sig = sign_message(&message, &kp.private);

        c.revoke_role(&owner(), RoleId::Signer, &signer_addr).unwrap();
        let err = c
            .mint(
                &mut reg,
                buyer,
                &PhaseId::new("og"),
                1,
                Some(&sig),
                Amount::new(1_000_000),
                Timestamp::new(1_000),
            )
            .unwrap_err();
        assert_eq!(err, ControllerError::InvalidSignature);
    }

    #[test]
    fn free_claim_nonce_lifecycle() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let (kp, signer_addr) = signer(41);
        c.grant_role(&owner(), RoleId::FreeSigner, signer_addr).unwrap();

        let claimer = addr(9);
        assert_eq!(c.claim_nonce(&claimer), 0);
        let message = claim_message(&COLLECTION_ID, &claimer, 2, 0);
        let sig = sign_message(&message, &kp.private);

        let receipt = c.free_claim(&mut reg, claimer, 2, 0, &sig).unwrap();
        assert_eq!(receipt.ids, TokenId::new(1)..=TokenId::new(2));
        assert_eq!(receipt.paid, Amount::ZERO);
        assert_eq!(c.claim_nonce(&claimer), 1);

        // replaying the consumed assertion fails
        let err = c.free_claim(&mut reg, claimer, 2, 0, &sig).unwrap_err();
        assert_eq!(err, ControllerError::InvalidSignature);
        assert_eq!(c.total_issued(), 2);

        // a fresh assertion over the new nonce works
        let message = claim_message(&COLLECTION_ID, &claimer, 1, 1);
        let sig = sign_message(&message, &kp.private);
        c.free_claim(&mut reg, claimer, 1, 1, &sig).unwrap();
        assert_eq!(c.claim_nonce(&claimer), 2);
    }

    #[test]
    fn free_claim_signed_by_sale_signer_rejected() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let (kp, signer_addr) = signer(40);
        // registered as SIGNER, not FREE_SIGNER
        c.grant_role(&owner(), RoleId::Signer, signer_addr).unwrap();

        let claimer = addr(9);
        let message = claim_message(&COLLECTION_ID, &claimer, 1, 0);
        let sig = sign_message(&message, &kp.private);
        let err = c.free_claim(&mut reg, claimer, 1, 0, &sig).unwrap_err();
        assert_eq!(err, ControllerError::InvalidSignature);
    }

    #[test]
    fn free_claim_respects_supply_cap() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let (kp, signer_addr) = signer(41);
        c.grant_role(&owner(), RoleId::FreeSigner, signer_addr).unwrap();
        c.reduce_max_supply(&owner(), 1).unwrap();

        let claimer = addr(9);
        let message = claim_message(&COLLECTION_ID, &claimer, 2, 0);
        let sig = sign_message(&message, &kp.private);
        let err = c.free_claim(&mut reg, claimer, 2, 0, &sig).unwrap_err();
        assert_eq!(err, ControllerError::SupplyExhausted { requested: 2, remaining: 1 });
        assert_eq!(c.claim_nonce(&claimer), 0);
    }

    #[test]
    fn airdrop_owner_only_by_default() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        assert_eq!(
            c.airdrop(&mut reg, &addr(9), addr(10), 1).unwrap_err(),
            ControllerError::NotOwner
        );
        let receipt = c.airdrop(&mut reg, &owner(), addr(10), 3).unwrap();
        assert_eq!(receipt.ids, TokenId::new(1)..=TokenId::new(3));
        assert_eq!(reg.owner_of(TokenId::new(2)).unwrap(), addr(10));
        assert_eq!(c.total_issued(), 3);
    }

    #[test]
    fn delegated_airdrop_accepts_role_holders() {
        let mut c = controller();
        c.state.delegated_airdrop = true;
        let mut reg = MemoryLedger::new();

        let err = c.airdrop(&mut reg, &addr(9), addr(10), 1).unwrap_err();
        assert_eq!(
            err,
            ControllerError::MissingRole { role: RoleId::Airdrop, address: addr(9) }
        );

        c.grant_role(&owner(), RoleId::Airdrop, addr(9)).unwrap();
        c.airdrop(&mut reg, &addr(9), addr(10), 1).unwrap();
        assert_eq!(c.total_issued(), 1);
    }

    #[test]
    fn airdrop_respects_supply_cap() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        c.reduce_max_supply(&owner(), 2).unwrap();
        let err = c.airdrop(&mut reg, &owner(), addr(10), 3).unwrap_err();
        assert_eq!(err, ControllerError::SupplyExhausted { requested: 3, remaining: 2 });
    }

    #[test]
    fn burn_requires_holding_the_token() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        c.airdrop(&mut reg, &owner(), addr(10), 2).unwrap();

        let err = c.burn(&mut reg, &addr(11), TokenId::new(1)).unwrap_err();
        assert_eq!(err, ControllerError::NotTokenOwner(TokenId::new(1)));

        c.burn(&mut reg, &addr(10), TokenId::new(1)).unwrap();
        assert_eq!(c.total_issued(), 1);
        assert_eq!(reg.live_count(), 1);

        // capacity is freed but the identifier is not reissued
        let receipt = c.airdrop(&mut reg, &owner(), addr(10), 1).unwrap();
        assert_eq!(receipt.ids, TokenId::new(3)..=TokenId::new(3));
    }

    #[test]
    fn burn_unknown_token_surfaces_registry_error() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        let err = c.burn(&mut reg, &addr(10), TokenId::new(5)).unwrap_err();
        assert_eq!(
            err,
            ControllerError::Registry(mintgate_registry::RegistryError::UnknownToken(
                TokenId::new(5)
            ))
        );
    }

    #[test]
    fn payments_feed_the_treasury() {
        let mut c = controller();
        let mut reg = MemoryLedger::new();
        c.mint(
            &mut reg,
            addr(9),
            &PhaseId::new("public"),
            2,
            None,
            public_payment(2),
            Timestamp::new(2_000),
        )
        .unwrap();
        assert_eq!(c.total_received(), public_payment(2));

        // shares 3:1
        let owed = c.withdraw(&addr(50)).unwrap();
        assert_eq!(owed, Amount::new(4_200_000_000_000_000));
        assert_eq!(c.released(&addr(50)), owed);
        assert_eq!(c.withdraw(&addr(50)).unwrap_err(), ControllerError::NothingToRelease);
        assert_eq!(c.withdraw(&addr(9)).unwrap_err(), ControllerError::NotAStakeholder);
    }

    #[test]
    fn admin_surface_is_owner_gated() {
        let mut c = controller();
        let phase = PhaseId::new("public");
        let intruder = addr(9);
        assert_eq!(
            c.set_sale_price(&intruder, &phase, Amount::ZERO).unwrap_err(),
            ControllerError::NotOwner
        );
        assert_eq!(c.set_max_per_tx(&intruder, &phase, 1).unwrap_err(), ControllerError::NotOwner);
        assert_eq!(
            c.set_max_tx_per_participant(&intruder, &phase, 1).unwrap_err(),
            ControllerError::NotOwner
        );
        assert_eq!(
            c.set_sale_time(&intruder, &phase, Timestamp::EPOCH).unwrap_err(),
            ControllerError::NotOwner
        );
        assert_eq!(c.reduce_max_supply(&intruder, 1).unwrap_err(), ControllerError::NotOwner);
        assert_eq!(
            c.set_base_uri(&intruder, String::new()).unwrap_err(),
            ControllerError::NotOwner
        );
        assert_eq!(c.freeze_metadata(&intruder).unwrap_err(), ControllerError::NotOwner);
        assert_eq!(
            c.transfer_ownership(&intruder, intruder).unwrap_err(),
            ControllerError::NotOwner
        );
    }

    #[test]
    fn role_management_accepts_explicit_admins() {
        let mut c = controller();
        let admin = addr(20);
        let err = c.grant_role(&admin, RoleId::Signer, addr(21)).unwrap_err();
        assert_eq!(err, ControllerError::MissingRole { role: RoleId::Admin, address: admin });

        c.grant_role(&owner(), RoleId::Admin, admin).unwrap();
        c.grant_role(&admin, RoleId::Signer, addr(21)).unwrap();
        assert!(c.has_role(RoleId::Signer, &addr(21)));
        c.revoke_role(&admin, RoleId::Signer, &addr(21)).unwrap();
        assert!(!c.has_role(RoleId::Signer, &addr(21)));
    }

    #[test]
    fn setters_update_phase_parameters() {
        let mut c = controller();
        let phase = PhaseId::new("whitelist");
        c.set_sale_time(&owner(), &phase, Timestamp::new(5_000)).unwrap();
        c.set_sale_price(&owner(), &phase, Amount::new(42)).unwrap();
        c.set_max_per_tx(&owner(), &phase, 7).unwrap();
        c.set_max_tx_per_participant(&owner(), &phase, 9).unwrap();
        let p = c.phase(&phase).unwrap();
        assert_eq!(p.start_time, Timestamp::new(5_000));
        assert_eq!(p.price_per_unit, Amount::new(42));
        assert_eq!(p.max_per_tx, 7);
        assert_eq!(p.max_tx_per_participant, 9);
    }

    #[test]
    fn ownership_transfer_is_immediate() {
        let mut c = controller();
        c.transfer_ownership(&owner(), addr(2)).unwrap();
        assert_eq!(c.owner(), addr(2));
        assert_eq!(c.freeze_metadata(&owner()).unwrap_err(), ControllerError::NotOwner);
        c.freeze_metadata(&addr(2)).unwrap();
        assert!(c.metadata_frozen());
    }

    #[test]
    fn allocate_ids_is_sequential_from_one() {
        assert_eq!(allocate_ids(0, 2), TokenId::new(1)..=TokenId::new(2));
        assert_eq!(allocate_ids(2, 3), TokenId::new(3)..=TokenId::new(5));
    }

    #[test]
    fn config_built_controller_mints() {
        let toml = r#"
            name = "demo-drop"
            max_supply = 10
            base_uri = "ipfs://demo/"
            owner = "mg_0101010101010101010101010101010101010101010101010101010101010101"

            [phases.public]
            start_time = 100
            price_per_unit = 5
            max_per_tx = 2
            max_tx_per_participant = 1
            gate = "open"
        "#;
        let mut c = DropConfig::from_toml_str(toml).unwrap().build().unwrap();
        let mut reg = MemoryLedger::new();
        c.mint(
            &mut reg,
            addr(9),
            &PhaseId::new("public"),
            1,
            None,
            Amount::new(5),
            Timestamp::new(100),
        )
        .unwrap();
        assert_eq!(c.total_issued(), 1);
    }
}
