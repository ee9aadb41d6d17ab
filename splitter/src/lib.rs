//! Payment splitter for mintgate.
//!
//! A fixed stakeholder/shares table is set once at construction. Every
//! payment the controller receives accumulates in `total_received`; each
//! stakeholder may be paid out, repeatedly, up to their proportional share
//! of everything ever received. `released` bookkeeping makes withdrawal
//! idempotent between payments.

pub mod error;
pub mod treasury;

pub use error::SplitterError;
pub use treasury::{Stakeholder, Treasury};
