//! Tests for MemoryResultStore

use shared::{AnalysisJob, JobState, ScenarioId};

use crate::services::MemoryResultStore;
use crate::traits::ResultStore;

fn failed_job(scenario: &str) -> AnalysisJob {
    let mut job = AnalysisJob::new(ScenarioId::from(scenario));
    job.state = JobState::Failed;
    job.failure_reason = Some("boom".to_string());
    job
}

#[tokio::test]
async fn test_put_then_get() {
    let store = MemoryResultStore::new();
    let job = failed_job("S1");

    store.put(job.clone()).await.unwrap();

    assert_eq!(store.get(&"S1".into()).await.unwrap(), Some(job));
    assert_eq!(store.get(&"S2".into()).await.unwrap(), None);
}

#[tokio::test]
async fn test_put_replaces_previous_record() {
    let store = MemoryResultStore::new();
    let first = failed_job("S1");
    let second = failed_job("S1");

    store.put(first).await.unwrap();
    store.put(second.clone()).await.unwrap();

    assert_eq!(store.len().await, 1);
    let stored = store.get(&"S1".into()).await.unwrap().unwrap();
    assert_eq!(stored.job_id, second.job_id);
}

#[tokio::test]
async fn test_delete_and_list() {
    let store = MemoryResultStore::new();
    for scenario in ["S3", "S1", "S2"] {
        store.put(failed_job(scenario)).await.unwrap();
    }

    let ids = store.list().await.unwrap();
    assert_eq!(ids, vec![ScenarioId::from("S1"), ScenarioId::from("S2"), ScenarioId::from("S3")]);

    assert!(store.delete(&"S2".into()).await.unwrap());
    assert!(!store.delete(&"S2".into()).await.unwrap());
    assert_eq!(store.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_concurrent_writers() {
    let store = std::sync::Arc::new(MemoryResultStore::new());
    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.put(failed_job(&format!("S{i}"))).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.len().await, 16);
}
