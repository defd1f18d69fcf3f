//! Core business logic modules
//!
//! Pure models and bookkeeping with no I/O dependencies. Everything here is
//! deterministic for a given input and seed.

pub mod estimation;
pub mod impact;
pub mod registry;
pub mod suggestions;
pub mod sustainability;

pub use estimation::{EstimationContext, EstimationModel};
pub use impact::ImpactModel;
pub use registry::JobRegistry;
pub use suggestions::SuggestionEngine;
pub use sustainability::SustainabilityPredictor;
