//! Unit tests for the synchronous API operations
//!
//! Impact previews, estimation, optimization and sustainability prediction
//! through the public facade, plus configuration loading.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use engine::{AnalysisApi, EngineConfig, EngineError, ErrorKind, MockSearchStrategy};
use shared::{EstimationRequest, JobState, OptimizationCandidate};
use tokio_test::{assert_err, assert_ok};

mod common;
use common::{OrchestratorBuilder, TestFixtures, TestHelpers};

fn api() -> AnalysisApi<engine::MemoryResultStore, engine::DefaultPipeline> {
    AnalysisApi::from_config(OrchestratorBuilder::new().config().clone()).expect("Valid test configuration")
}

/// Impact preview matches the reference scenario breakdown
#[tokio::test]
async fn test_compute_impact_preview() {
    let api = api();

    let impact = assert_ok!(api.compute_impact(&TestFixtures::steel_scenario()));

    let carbon = &impact.carbon_footprint;
    assert!((carbon.breakdown.transport - 10.0).abs() < 1e-9);
    assert!((carbon.breakdown.end_of_life + 0.3).abs() < 1e-9);
    assert_eq!(
        carbon.total,
        carbon.breakdown.material + carbon.breakdown.energy + carbon.breakdown.transport + carbon.breakdown.end_of_life
    );
    assert_eq!(impact.circularity_score.total, 65.0);
}

/// Impact preview is reproducible and agrees with background analysis
#[tokio::test]
async fn test_compute_impact_matches_analysis() {
    let api = api();
    let preview = api.compute_impact(&TestFixtures::steel_scenario()).unwrap();
    assert_eq!(preview, api.compute_impact(&TestFixtures::steel_scenario()).unwrap());

    api.submit_analysis(TestFixtures::SCENARIO_1, TestFixtures::steel_scenario())
        .await
        .unwrap();
    let status = TestHelpers::wait_for_terminal(api.orchestrator(), TestFixtures::SCENARIO_1).await;
    assert_eq!(status.state, JobState::Completed);
    assert_eq!(status.result.unwrap().impact, preview);

    let via_api = api.get_analysis_status(TestFixtures::SCENARIO_1).await.unwrap();
    assert_eq!(via_api.state, JobState::Completed);
}

/// Invalid scenarios are rejected by the preview
#[tokio::test]
async fn test_compute_impact_rejects_invalid_scenario() {
    let api = api();

    let err = assert_err!(api.compute_impact(&TestFixtures::invalid_scenario()));
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert!(err.to_string().contains("route.efficiency"));
}

/// Estimation via the facade preserves field order
#[tokio::test]
async fn test_estimate_missing() {
    let api = api();
    let request = EstimationRequest::new("Steel", "Primary")
        .with_fields(["energy_mj_per_kg", "unknown_field"])
        .with_region("EU");

    let results = assert_ok!(api.estimate_missing(&request));

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].field, "energy_mj_per_kg");
    assert_eq!(results[0].mean, 25.5);
    assert_eq!(results[0].confidence, 0.9);
    assert_eq!(results[1].confidence, 0.8);
}

/// Estimation without material or process is an invalid request
#[tokio::test]
async fn test_estimate_missing_requires_context() {
    let api = api();
    let mut request = EstimationRequest::new("Steel", "Primary").with_fields(["co2e_kg_per_kg"]);
    request.material = None;

    let err = assert_err!(api.estimate_missing(&request));
    assert!(matches!(err, EngineError::InvalidRequest { .. }));
}

/// Optimization via the facade returns ranked candidates
#[tokio::test]
async fn test_optimize_ranks_candidates() {
    let api = api();

    let candidates = assert_ok!(api.optimize(&TestFixtures::optimization_request()));

    assert_eq!(candidates.len(), 5);
    for pair in candidates.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(candidates.iter().all(OptimizationCandidate::is_feasible));
}

/// Missing weights are rejected
#[tokio::test]
async fn test_optimize_requires_weights() {
    let api = api();
    let mut request = TestFixtures::optimization_request();
    request.weights = None;

    let err = assert_err!(api.optimize(&request));
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
}

/// The search strategy seam can be swapped
#[tokio::test]
async fn test_optimize_uses_injected_strategy() {
    let mut strategy = MockSearchStrategy::new();
    strategy
        .expect_search()
        .withf(|request| request.baseline.material.material_type == "Steel")
        .returning(|_| Ok(Vec::new()))
        .times(1);

    let orchestrator = Arc::new(OrchestratorBuilder::new().build());
    let api = AnalysisApi::new(orchestrator, engine::ImpactModel::default()).with_search_strategy(strategy);

    let candidates = assert_ok!(api.optimize(&TestFixtures::optimization_request()));
    assert!(candidates.is_empty());
}

/// Sustainability prediction through the facade
#[tokio::test]
async fn test_predict_sustainability() {
    let api = api();

    let prediction = api.predict_sustainability(&TestFixtures::sustainability_input());

    // 40 + 18 + 12 - 0.75
    assert_eq!(prediction.recyclability_score, 69.3);
    // 35 + 10 - 0.25
    assert_eq!(prediction.reuse_potential_score, 44.8);
    // 2.5 + 0.2 + 0.1
    assert_eq!(prediction.product_life_extension_years, 2.8);
    assert_eq!(prediction.confidence, 0.85);
    assert!(prediction.recommendations.iter().any(|r| r.contains("coal")));
    assert!(prediction.recommendations.iter().any(|r| r.contains("CO2 reduction")));
}

/// Configuration overrides come from the lookup; defaults fill the rest
#[test]
fn test_config_from_lookup() {
    let vars = HashMap::from([
        ("ENGINE_WORKERS", "8"),
        ("ENGINE_JOB_TIMEOUT_SECS", "30"),
        ("ENGINE_STAGE_DELAY_MS", "25"),
    ]);

    let config = assert_ok!(EngineConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())));

    assert_eq!(config.worker_count, 8);
    assert_eq!(config.job_timeout, Duration::from_secs(30));
    assert_eq!(config.stage_delay, Duration::from_millis(25));
    assert_eq!(config.queue_capacity, EngineConfig::default().queue_capacity);
}

/// Malformed or out-of-range values are configuration errors
#[test]
fn test_config_rejects_bad_values() {
    let malformed = EngineConfig::from_lookup(|key| (key == "ENGINE_WORKERS").then(|| "many".to_string()));
    assert!(matches!(malformed, Err(EngineError::ConfigurationError { .. })));

    let zero = EngineConfig::from_lookup(|key| (key == "ENGINE_QUEUE_CAPACITY").then(|| "0".to_string()));
    assert!(matches!(zero, Err(EngineError::ConfigurationError { .. })));

    let variation = EngineConfig::default().with_variation(1.0);
    assert_err!(variation.validate());
}

/// Orchestrator construction validates its configuration
#[tokio::test]
async fn test_orchestrator_rejects_zero_workers() {
    let config = EngineConfig::default().with_workers(0);
    assert!(AnalysisApi::from_config(config).is_err());
}
