//! In-memory result store
//!
//! Keeps the latest terminal snapshot per scenario behind an async lock.

use async_trait::async_trait;
use shared::{process_debug, AnalysisJob, ProcessId, ScenarioId};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::EngineResult;
use crate::traits::ResultStore;

#[derive(Debug, Default)]
pub struct MemoryResultStore {
    records: RwLock<HashMap<ScenarioId, AnalysisJob>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn get(&self, scenario_id: &ScenarioId) -> EngineResult<Option<AnalysisJob>> {
        Ok(self.records.read().await.get(scenario_id).cloned())
    }

    async fn put(&self, job: AnalysisJob) -> EngineResult<()> {
        process_debug!(
            ProcessId::current(),
            "💾 Storing {} snapshot of job {} for scenario {}",
            job.state,
            job.job_id,
            job.scenario_id
        );
        self.records.write().await.insert(job.scenario_id.clone(), job);
        Ok(())
    }

    async fn delete(&self, scenario_id: &ScenarioId) -> EngineResult<bool> {
        Ok(self.records.write().await.remove(scenario_id).is_some())
    }

    async fn list(&self) -> EngineResult<Vec<ScenarioId>> {
        let mut ids: Vec<ScenarioId> = self.records.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
