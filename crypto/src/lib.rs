//! Cryptographic primitives for mintgate.
//!
//! Ed25519 signing/verification for eligibility assertions and Blake2b-256
//! hashing for canonical assertion messages and collection identities.

pub mod hash;
pub mod keys;
pub mod sign;

pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
