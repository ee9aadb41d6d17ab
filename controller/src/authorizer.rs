//! Eligibility assertion verification.
//!
//! Assertions are issued off-line by signer-role key holders and verified
//! here as a pure function of `(message, signature, signer set)` — no
//! controller state is touched, so the rules stay unit-testable in
//! isolation.
//!
//! Messages are canonicalized by hashing fixed-order, fixed-width fields
//! with a domain tag and the collection identity, which pins an assertion
//! to one deployment and one purpose (sale vs. free claim).

use crate::phase::PhaseId;
use mintgate_crypto::{blake2b_256_multi, verify_signature};
use mintgate_types::{Address, Signature};
use std::collections::BTreeSet;

/// Domain tag for priced-phase eligibility assertions.
const SALE_DOMAIN: &[u8] = b"mintgate.sale.v1";
/// Domain tag for free-claim assertions.
const CLAIM_DOMAIN: &[u8] = b"mintgate.claim.v1";

/// Canonical message for a priced gated phase.
///
/// Binds the participant and phase to this deployment. No nonce: replay
/// across transactions is bounded by the participant's quota counter, so a
/// single assertion intentionally authorizes up to
/// `max_tx_per_participant` transactions.
pub fn sale_message(collection_id: &[u8; 32], phase: &PhaseId, participant: &Address) -> [u8; 32] {
    blake2b_256_multi(&[
        SALE_DOMAIN,
        collection_id,
        phase.as_str().as_bytes(),
        participant.as_bytes(),
    ])
}

/// Canonical message for a free claim.
///
/// Additionally binds the quantity and the participant's current nonce, so
/// each assertion authorizes exactly one claim.
pub fn claim_message(
    collection_id: &[u8; 32],
    participant: &Address,
    quantity: u64,
    nonce: u64,
) -> [u8; 32] {
    blake2b_256_multi(&[
        CLAIM_DOMAIN,
        collection_id,
        participant.as_bytes(),
        &quantity.to_be_bytes(),
        &nonce.to_be_bytes(),
    ])
}

/// Whether `signature` over `message` was produced by any current member of
/// the signer set.
///
/// Role membership is checked at consumption time: a key revoked after
/// issuing an assertion no longer authorizes anything.
pub fn is_authorized(
    message: &[u8; 32],
    signature: &Signature,
    signer_set: &BTreeSet<Address>,
) -> bool {
    signer_set
        .iter()
        .any(|signer| verify_signature(message, signature, &signer.public_key()))
}
