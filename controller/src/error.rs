//! Controller errors.
//!
//! Every variant is a terminal, synchronous rejection of the triggering
//! call. Nothing is retried internally and no failure leaves partial state.

use crate::phase::PhaseId;
use crate::roles::RoleId;
use mintgate_registry::RegistryError;
use mintgate_splitter::SplitterError;
use mintgate_types::{Address, Amount, TokenId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("caller is not the owner")]
    NotOwner,

    #[error("address {address} is missing role {role}")]
    MissingRole { role: RoleId, address: Address },

    #[error("phase {0} is not configured")]
    UnknownPhase(PhaseId),

    #[error("phase {0} is not open")]
    PhaseNotOpen(PhaseId),

    #[error("wrong payment: paid {paid}, required {required}")]
    WrongPrice { paid: Amount, required: Amount },

    #[error("quantity must be non-zero")]
    ZeroQuantity,

    #[error("quantity {quantity} exceeds per-transaction limit {limit}")]
    QuantityExceedsPerTxLimit { quantity: u64, limit: u64 },

    #[error("supply exhausted: requested {requested}, remaining {remaining}")]
    SupplyExhausted { requested: u64, remaining: u64 },

    #[error("max supply can only be reduced")]
    SupplyIncreaseForbidden,

    #[error("max supply cannot drop below the issued count")]
    SupplyBelowIssued,

    #[error("transaction quota exhausted: used {used} of {limit}")]
    TooManyTransactions { used: u32, limit: u32 },

    #[error("invalid signature")]
    InvalidSignature,

    #[error("metadata is frozen")]
    MetadataFrozen,

    #[error("caller does not hold token {0}")]
    NotTokenOwner(TokenId),

    #[error("address holds no shares")]
    NotAStakeholder,

    #[error("nothing to release for this stakeholder")]
    NothingToRelease,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("registry: {0}")]
    Registry(#[from] RegistryError),

    #[error("invalid drop configuration: {0}")]
    Config(String),
}

impl From<SplitterError> for ControllerError {
    fn from(err: SplitterError) -> Self {
        match err {
            SplitterError::NotAStakeholder => Self::NotAStakeholder,
            SplitterError::NothingToRelease => Self::NothingToRelease,
            SplitterError::InvalidShares => {
                Self::Config("stakeholder table must be non-empty with non-zero shares".into())
            }
            SplitterError::Overflow => Self::Overflow,
        }
    }
}
