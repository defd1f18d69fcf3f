//! Optimization module containing traits, surrogate scoring, and search strategies
//!
//! Candidates are ranked with a surrogate model, never the full impact model.

pub mod strategies;
pub mod traits;
pub mod types;

pub use strategies::LocalSearch;
pub use traits::{MockSearchStrategy, SearchStrategy};
pub use types::*;
