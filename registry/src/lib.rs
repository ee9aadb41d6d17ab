//! Ownership ledger abstraction for mintgate.
//!
//! The controller never stores token ownership itself — it drives an external
//! uniqueness registry through this trait. `MemoryLedger` is the in-memory
//! implementation used by tests and tooling.

pub mod error;
pub mod ledger;
pub mod memory;

pub use error::RegistryError;
pub use ledger::OwnershipLedger;
pub use memory::MemoryLedger;
