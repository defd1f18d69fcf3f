//! Shared types for the scenario analysis engine
//!
//! Contains the scenario, impact, estimation, optimization and job records
//! exchanged between the engine and its callers, plus the common error and
//! logging utilities.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
