//! Registry-specific errors.

use mintgate_types::TokenId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("token {0} does not exist")]
    UnknownToken(TokenId),

    #[error("identifier space exhausted")]
    IdExhausted,
}
