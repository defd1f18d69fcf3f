//! Analysis job records and lifecycle states

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::estimation::EstimationResult;
use super::impact::{CircularityBreakdown, ImpactResult};
use crate::errors::{SharedError, SharedResult};

/// Unique identifier for an analysis job
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> SharedResult<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| SharedError::InvalidUuid { input: s.to_string() })
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied scenario identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScenarioId(String);

impl ScenarioId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScenarioId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ScenarioId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of an analysis job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Draft,
    Running,
    Completed,
    Failed,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }

    /// Legal edges: Draft -> Running -> {Completed, Failed}
    pub fn can_transition_to(self, next: JobState) -> bool {
        matches!(
            (self, next),
            (JobState::Draft, JobState::Running)
                | (JobState::Running, JobState::Completed)
                | (JobState::Running, JobState::Failed)
        )
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Draft => write!(f, "draft"),
            JobState::Running => write!(f, "running"),
            JobState::Completed => write!(f, "completed"),
            JobState::Failed => write!(f, "failed"),
        }
    }
}

/// Immutable result snapshot of a completed analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub impact: ImpactResult,
    pub circularity_metrics: CircularityBreakdown,
    pub optimization_suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub estimates: Vec<EstimationResult>,
}

/// Full record of one analysis job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisJob {
    pub job_id: JobId,
    pub scenario_id: ScenarioId,
    pub state: JobState,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub result: Option<AnalysisResult>,
    pub failure_reason: Option<String>,
}

impl AnalysisJob {
    pub fn new(scenario_id: ScenarioId) -> Self {
        Self {
            job_id: JobId::new(),
            scenario_id,
            state: JobState::Draft,
            progress: 0,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            result: None,
            failure_reason: None,
        }
    }

    pub fn status(&self) -> JobStatus {
        JobStatus {
            job_id: self.job_id,
            state: self.state,
            progress: self.progress,
            result: self.result.clone(),
            failure_reason: self.failure_reason.clone(),
        }
    }
}

/// Read-only view returned to status pollers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub job_id: JobId,
    pub state: JobState,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(JobState::Draft.can_transition_to(JobState::Running));
        assert!(JobState::Running.can_transition_to(JobState::Completed));
        assert!(JobState::Running.can_transition_to(JobState::Failed));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for terminal in [JobState::Completed, JobState::Failed] {
            assert!(terminal.is_terminal());
            for next in [JobState::Draft, JobState::Running, JobState::Completed, JobState::Failed] {
                assert!(!terminal.can_transition_to(next), "{terminal} -> {next} must be illegal");
            }
        }
    }

    #[test]
    fn test_running_only_reachable_from_draft() {
        assert!(!JobState::Completed.can_transition_to(JobState::Running));
        assert!(!JobState::Failed.can_transition_to(JobState::Running));
        assert!(!JobState::Running.can_transition_to(JobState::Running));
        assert!(!JobState::Draft.can_transition_to(JobState::Completed));
    }

    #[test]
    fn test_job_id_parsing() {
        let id = JobId::new();
        assert_eq!(JobId::from_string(&id.to_string()).unwrap(), id);
        assert!(JobId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_new_job_starts_in_draft() {
        let job = AnalysisJob::new("S1".into());
        assert_eq!(job.state, JobState::Draft);
        assert_eq!(job.progress, 0);
        assert!(job.started_at.is_none());
        assert_eq!(job.status().state, JobState::Draft);
    }
}
