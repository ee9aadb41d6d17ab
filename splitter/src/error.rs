//! Splitter-specific errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitterError {
    #[error("address holds no shares")]
    NotAStakeholder,

    #[error("nothing to release for this stakeholder")]
    NothingToRelease,

    #[error("stakeholder table must be non-empty with non-zero shares")]
    InvalidShares,

    #[error("arithmetic overflow in payment accounting")]
    Overflow,
}
