//! Shared utilities for mintgate.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with_level};
