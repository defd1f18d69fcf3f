//! Scenario analysis engine
//!
//! Computes environmental impact for material-production scenarios, fills
//! in missing inputs with parametric estimates, searches for better scenario
//! parameters, and runs full analyses as asynchronous background jobs with
//! progress tracking.

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod optimization;
pub mod orchestrator;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use api::AnalysisApi;
pub use config::EngineConfig;
pub use crate::core::{EstimationModel, ImpactModel, JobRegistry, SuggestionEngine, SustainabilityPredictor};
pub use error::{EngineError, EngineResult, ErrorKind};
pub use optimization::{LocalSearch, MockSearchStrategy, SearchStrategy};
pub use orchestrator::JobOrchestrator;
pub use services::{load_scenario, DefaultPipeline, MemoryResultStore};
pub use traits::{AnalysisOptions, AnalysisPipeline, MockAnalysisPipeline, MockResultStore, ResultStore, Synthesis};
