//! The mintgate issuance controller.
//!
//! Drives a fixed-supply collection through timed sale phases: each call is
//! a one-shot, atomic state transition — time and payment are supplied
//! explicitly, eligibility is proven by signer-issued assertions, and every
//! check runs before any state is written.
//!
//! This crate handles:
//! - Phase gating and exact-payment checks (`engine`)
//! - Assertion message canonicalization and signer-set verification
//!   (`authorizer`)
//! - Per-participant transaction quotas and the supply cap (`quota`,
//!   `state`)
//! - Role-gated administration and ownership transfer (`roles`)
//! - TOML drop configuration (`config`)

pub mod authorizer;
pub mod config;
pub mod engine;
pub mod error;
pub mod phase;
pub mod quota;
pub mod roles;
pub mod state;

pub use authorizer::{claim_message, is_authorized, sale_message};
pub use config::DropConfig;
pub use engine::{allocate_ids, Controller, MintReceipt};
pub use error::ControllerError;
pub use phase::{PhaseGate, PhaseId, SalePhase};
pub use quota::QuotaLedger;
pub use roles::{RoleId, RoleTable};
pub use state::{Collection, ControllerState};
