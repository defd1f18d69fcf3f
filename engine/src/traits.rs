//! Trait definitions with mockall annotations for testing
//!
//! These are the seams the orchestrator is generic over: where terminal job
//! snapshots are persisted, and which computation each pipeline stage runs.
//! Both are mocked in tests to drive failure paths.

use serde::{Deserialize, Serialize};
use shared::{AnalysisJob, CircularityBreakdown, EstimationResult, ImpactResult, ScenarioId, ScenarioSpec};

use crate::error::EngineResult;

/// Per-submission knobs for the analysis pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Fields to estimate during finalization; empty skips estimation
    #[serde(default)]
    pub estimate_fields: Vec<String>,
}

impl AnalysisOptions {
    pub fn with_estimates<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            estimate_fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Output of the synthesis stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Synthesis {
    pub circularity_metrics: CircularityBreakdown,
    pub optimization_suggestions: Vec<String>,
}

/// Persistence for terminal job snapshots
///
/// Holds the latest record per scenario. The orchestrator writes here after
/// every terminal transition and reads back when a job is no longer held in
/// memory.
#[mockall::automock]
#[async_trait::async_trait]
pub trait ResultStore: Send + Sync {
    /// Fetch the stored record for a scenario
    async fn get(&self, scenario_id: &ScenarioId) -> EngineResult<Option<AnalysisJob>>;

    /// Insert or replace the record for the job's scenario
    async fn put(&self, job: AnalysisJob) -> EngineResult<()>;

    /// Remove a scenario's record
    ///
    /// # Returns
    /// `true` when a record existed
    async fn delete(&self, scenario_id: &ScenarioId) -> EngineResult<bool>;

    /// Scenario ids with a stored record, sorted
    async fn list(&self) -> EngineResult<Vec<ScenarioId>>;
}

/// The three stages executed for every analysis job
///
/// Stages are synchronous and CPU-bound; the orchestrator runs each one on
/// the blocking pool and turns errors or panics into a failed job.
#[mockall::automock]
pub trait AnalysisPipeline: Send + Sync {
    /// Stage 1: impact calculation
    fn calculate_impact(&self, scenario: &ScenarioSpec) -> EngineResult<ImpactResult>;

    /// Stage 2: circularity metrics and optimization suggestions
    fn synthesize(&self, scenario: &ScenarioSpec, impact: &ImpactResult) -> EngineResult<Synthesis>;

    /// Stage 3: optional estimation fill-in
    fn finalize(&self, scenario: &ScenarioSpec, options: &AnalysisOptions) -> EngineResult<Vec<EstimationResult>>;
}
