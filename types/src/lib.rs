//! Fundamental types for the mintgate issuance controller.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, currency amounts, timestamps, token identifiers,
//! and cryptographic key/signature newtypes.

pub mod address;
pub mod amount;
pub mod keys;
pub mod time;
pub mod token;

pub use address::Address;
pub use amount::Amount;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use time::Timestamp;
pub use token::TokenId;
