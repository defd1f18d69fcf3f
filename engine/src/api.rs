//! Boundary facade over the engine
//!
//! One entry point per logical operation. Request validation happens here,
//! synchronously, so `InvalidRequest`, `Conflict` and `NotFound` reach the
//! caller directly. Execution failures only surface through job status.

use std::sync::Arc;

use shared::{
    EstimationRequest, EstimationResult, ImpactResult, JobId, JobStatus, OptimizationCandidate, OptimizationRequest,
    ScenarioId, ScenarioSpec, SustainabilityInput, SustainabilityPrediction,
};

use crate::{
    config::EngineConfig,
    core::{EstimationModel, ImpactModel, SustainabilityPredictor},
    error::EngineResult,
    optimization::{LocalSearch, SearchStrategy},
    orchestrator::JobOrchestrator,
    services::{DefaultPipeline, MemoryResultStore},
    traits::{AnalysisOptions, AnalysisPipeline, ResultStore},
};

pub struct AnalysisApi<S, P>
where
    S: ResultStore + 'static,
    P: AnalysisPipeline + 'static,
{
    orchestrator: Arc<JobOrchestrator<S, P>>,
    impact: ImpactModel,
    estimation: EstimationModel,
    search: Box<dyn SearchStrategy>,
    predictor: SustainabilityPredictor,
}

impl AnalysisApi<MemoryResultStore, DefaultPipeline> {
    /// Build the standard engine: in-memory store and default pipeline
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        let pipeline = DefaultPipeline::from_config(&config);
        let impact = *pipeline.impact_model();
        let orchestrator = JobOrchestrator::new(config, MemoryResultStore::new(), pipeline)?;
        Ok(Self::new(Arc::new(orchestrator), impact))
    }
}

impl<S, P> AnalysisApi<S, P>
where
    S: ResultStore + 'static,
    P: AnalysisPipeline + 'static,
{
    pub fn new(orchestrator: Arc<JobOrchestrator<S, P>>, impact: ImpactModel) -> Self {
        Self {
            orchestrator,
            impact,
            estimation: EstimationModel::new(),
            search: Box::new(LocalSearch::new()),
            predictor: SustainabilityPredictor::new(),
        }
    }

    /// Replace the optimization search strategy
    pub fn with_search_strategy(mut self, search: impl SearchStrategy + 'static) -> Self {
        self.search = Box::new(search);
        self
    }

    pub fn orchestrator(&self) -> &Arc<JobOrchestrator<S, P>> {
        &self.orchestrator
    }

    pub async fn submit_analysis(&self, scenario_id: impl Into<ScenarioId>, scenario: ScenarioSpec) -> EngineResult<JobId> {
        self.orchestrator.submit(scenario_id, scenario).await
    }

    pub async fn submit_analysis_with_options(
        &self,
        scenario_id: impl Into<ScenarioId>,
        scenario: ScenarioSpec,
        options: AnalysisOptions,
    ) -> EngineResult<JobId> {
        self.orchestrator.submit_with_options(scenario_id, scenario, options).await
    }

    pub async fn get_analysis_status(&self, scenario_id: impl Into<ScenarioId>) -> EngineResult<JobStatus> {
        self.orchestrator.get_status(scenario_id).await
    }

    /// Synchronous impact preview
    pub fn compute_impact(&self, scenario: &ScenarioSpec) -> EngineResult<ImpactResult> {
        scenario.validate()?;
        Ok(self.impact.compute(scenario))
    }

    pub fn estimate_missing(&self, request: &EstimationRequest) -> EngineResult<Vec<EstimationResult>> {
        self.estimation.estimate_missing(request)
    }

    pub fn optimize(&self, request: &OptimizationRequest) -> EngineResult<Vec<OptimizationCandidate>> {
        self.search.search(request)
    }

    pub fn predict_sustainability(&self, input: &SustainabilityInput) -> SustainabilityPrediction {
        self.predictor.predict(input)
    }

    pub async fn shutdown(&self) {
        self.orchestrator.shutdown().await;
    }
}
