//! Default analysis pipeline
//!
//! Wires the pure models into the three stages the orchestrator runs.

use shared::{
    EstimationRequest, EstimationResult, ImpactResult, Objectives, OptimizationRequest, ScenarioSpec, Weights,
};

use crate::config::EngineConfig;
use crate::core::{EstimationModel, ImpactModel, SuggestionEngine};
use crate::error::EngineResult;
use crate::optimization::{LocalSearch, SearchStrategy};
use crate::traits::{AnalysisOptions, AnalysisPipeline, Synthesis};

#[derive(Debug, Clone)]
pub struct DefaultPipeline {
    impact: ImpactModel,
    search: LocalSearch,
    suggestions: SuggestionEngine,
    estimation: EstimationModel,
}

impl DefaultPipeline {
    pub fn new(impact: ImpactModel) -> Self {
        Self {
            impact,
            search: LocalSearch::new(),
            suggestions: SuggestionEngine::new(),
            estimation: EstimationModel::new(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(ImpactModel::new(config.impact_seed, config.impact_variation))
    }

    pub fn impact_model(&self) -> &ImpactModel {
        &self.impact
    }
}

impl Default for DefaultPipeline {
    fn default() -> Self {
        Self::new(ImpactModel::default())
    }
}

impl AnalysisPipeline for DefaultPipeline {
    fn calculate_impact(&self, scenario: &ScenarioSpec) -> EngineResult<ImpactResult> {
        scenario.validate()?;
        Ok(self.impact.compute(scenario))
    }

    fn synthesize(&self, scenario: &ScenarioSpec, impact: &ImpactResult) -> EngineResult<Synthesis> {
        let candidates = self.search.search(&OptimizationRequest {
            objectives: Some(Objectives::all()),
            weights: Some(Weights::equal()),
            constraints: Default::default(),
            baseline: scenario.clone(),
        })?;

        Ok(Synthesis {
            circularity_metrics: impact.circularity_score.breakdown.clone(),
            optimization_suggestions: self.suggestions.suggest(scenario, impact, candidates.first()),
        })
    }

    fn finalize(&self, scenario: &ScenarioSpec, options: &AnalysisOptions) -> EngineResult<Vec<EstimationResult>> {
        if options.estimate_fields.is_empty() {
            return Ok(Vec::new());
        }

        let request = EstimationRequest::new(&scenario.material.material_type, &scenario.route.process)
            .with_fields(options.estimate_fields.iter().cloned());
        self.estimation.estimate_missing(&request)
    }
}
