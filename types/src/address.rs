//! Account address type.

use crate::keys::PublicKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant or holder identity.
///
/// The bytes are the account's Ed25519 public key, so the same value serves
/// as the identity in role sets and as the verification key for assertions
/// that account signs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The address of an account given its public key.
    pub fn from_public_key(public: &PublicKey) -> Self {
        Self(public.0)
    }

    /// The Ed25519 public key this address corresponds to.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse an address from its hex form (with or without the `mg_` prefix).
    pub fn from_hex(s: &str) -> Option<Self> {
        let raw = s.strip_prefix("mg_").unwrap_or(s);
        let bytes = hex::decode(raw).ok()?;
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mg_{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}
