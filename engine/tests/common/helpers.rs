//! Test helpers and builder patterns for engine tests
//!
//! Builders for orchestrators wired to real or mocked services, plus polling
//! helpers for background jobs.
use std::time::Duration;

use engine::*;
use shared::{JobStatus, ScenarioId};

/// Default upper bound when waiting for a job to finish
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Builder pattern for creating test orchestrators with sensible defaults
pub struct OrchestratorBuilder {
    config: EngineConfig,
}

impl OrchestratorBuilder {
    /// Two workers, small queue, no stage delay
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default()
                .with_workers(2)
                .with_queue_capacity(8)
                .with_job_timeout(Duration::from_secs(5))
                .with_seed(42),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config = self.config.with_workers(workers);
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_queue_capacity(capacity);
        self
    }

    pub fn with_job_timeout(mut self, job_timeout: Duration) -> Self {
        self.config = self.config.with_job_timeout(job_timeout);
        self
    }

    pub fn with_stage_delay(mut self, delay: Duration) -> Self {
        self.config = self.config.with_stage_delay(delay);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config = self.config.with_seed(seed);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Real store and real pipeline
    pub fn build(self) -> TestOrchestrator {
        let pipeline = DefaultPipeline::from_config(&self.config);
        JobOrchestrator::new(self.config, MemoryResultStore::new(), pipeline).expect("Valid test configuration")
    }

    /// Real store with a mocked pipeline
    pub fn build_with_pipeline(self, pipeline: MockAnalysisPipeline) -> MockPipelineOrchestrator {
        JobOrchestrator::new(self.config, MemoryResultStore::new(), pipeline).expect("Valid test configuration")
    }

    /// Mocked store with the real pipeline
    pub fn build_with_store(self, store: MockResultStore) -> MockStoreOrchestrator {
        let pipeline = DefaultPipeline::from_config(&self.config);
        JobOrchestrator::new(self.config, store, pipeline).expect("Valid test configuration")
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Type aliases for the orchestrator wirings used in tests
pub type TestOrchestrator = JobOrchestrator<MemoryResultStore, DefaultPipeline>;
pub type MockPipelineOrchestrator = JobOrchestrator<MemoryResultStore, MockAnalysisPipeline>;
pub type MockStoreOrchestrator = JobOrchestrator<MockResultStore, DefaultPipeline>;

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// Poll until the scenario's job is terminal
    pub async fn wait_for_terminal<S, P>(orchestrator: &JobOrchestrator<S, P>, scenario_id: &str) -> JobStatus
    where
        S: ResultStore + 'static,
        P: AnalysisPipeline + 'static,
    {
        tokio::time::timeout(WAIT_TIMEOUT, async {
            loop {
                let status = orchestrator
                    .get_status(ScenarioId::from(scenario_id))
                    .await
                    .expect("Scenario should be known");
                if status.state.is_terminal() {
                    return status;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("Job should reach a terminal state")
    }

    /// Poll until the scenario's job is running
    pub async fn wait_for_running<S, P>(orchestrator: &JobOrchestrator<S, P>, scenario_id: &str)
    where
        S: ResultStore + 'static,
        P: AnalysisPipeline + 'static,
    {
        tokio::time::timeout(WAIT_TIMEOUT, async {
            loop {
                let status = orchestrator
                    .get_status(ScenarioId::from(scenario_id))
                    .await
                    .expect("Scenario should be known");
                if status.state == shared::JobState::Running {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .expect("Job should start running")
    }

    /// Mock pipeline whose impact stage blocks for `hold` before succeeding
    pub fn slow_pipeline(hold: Duration) -> MockAnalysisPipeline {
        let mut pipeline = MockAnalysisPipeline::new();
        pipeline
            .expect_calculate_impact()
            .returning(move |scenario| {
                std::thread::sleep(hold);
                DefaultPipeline::default().calculate_impact(scenario)
            })
            .times(0..);
        pipeline
            .expect_synthesize()
            .returning(|scenario, impact| DefaultPipeline::default().synthesize(scenario, impact))
            .times(0..);
        pipeline
            .expect_finalize()
            .returning(|_, _| Ok(Vec::new()))
            .times(0..);
        pipeline
    }
}
