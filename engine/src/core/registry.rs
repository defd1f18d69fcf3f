//! Job table and per-scenario admission index
//!
//! Pure bookkeeping with no I/O. The orchestrator keeps one registry behind
//! a lock, which makes admission and every transition atomic.

use chrono::Utc;
use shared::{process_debug, AnalysisJob, AnalysisResult, JobId, JobState, JobStatus, ProcessId, ScenarioId};
use std::collections::{HashMap, HashSet};

use crate::error::{EngineError, EngineResult};

/// Progress reported once a worker picks a job up
pub const PROGRESS_STARTED: u8 = 10;
pub const PROGRESS_DONE: u8 = 100;

#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: HashMap<JobId, AnalysisJob>,
    /// Non-terminal job per scenario, at most one
    active: HashMap<ScenarioId, JobId>,
    /// Most recently admitted job per scenario, terminal or not
    latest: HashMap<ScenarioId, JobId>,
    /// Terminal jobs whose snapshot is in the result store
    persisted: HashSet<JobId>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `Draft` job unless the scenario already has an active one
    pub fn admit(&mut self, scenario_id: &ScenarioId) -> EngineResult<JobId> {
        if let Some(existing) = self.active.get(scenario_id) {
            return Err(EngineError::Conflict {
                scenario_id: scenario_id.to_string(),
                job_id: existing.to_string(),
            });
        }

        let job = AnalysisJob::new(scenario_id.clone());
        let job_id = job.job_id;
        self.jobs.insert(job_id, job);
        self.active.insert(scenario_id.clone(), job_id);
        self.latest.insert(scenario_id.clone(), job_id);

        process_debug!(ProcessId::current(), "📝 Admitted job {} for scenario {}", job_id, scenario_id);
        Ok(job_id)
    }

    /// Undo an admission whose job never reached a worker
    pub fn withdraw(&mut self, job_id: JobId) -> EngineResult<()> {
        let job = self.get(job_id)?;
        if job.state != JobState::Draft {
            return Err(EngineError::InvalidTransition {
                from: job.state,
                to: JobState::Draft,
            });
        }

        let scenario_id = job.scenario_id.clone();
        self.jobs.remove(&job_id);
        self.active.remove(&scenario_id);

        // Point the scenario back at its previous job, if any is still held
        let previous = self
            .jobs
            .values()
            .filter(|job| job.scenario_id == scenario_id)
            .max_by_key(|job| job.created_at)
            .map(|job| job.job_id);
        match previous {
            Some(previous) => {
                self.latest.insert(scenario_id, previous);
            }
            None => {
                self.latest.remove(&scenario_id);
            }
        }
        Ok(())
    }

    /// `Draft -> Running`
    pub fn start(&mut self, job_id: JobId) -> EngineResult<()> {
        let job = self.transition(job_id, JobState::Running)?;
        job.started_at = Some(Utc::now());
        job.progress = job.progress.max(PROGRESS_STARTED);
        Ok(())
    }

    /// Record a progress checkpoint; returns false when the value was ignored
    pub fn record_progress(&mut self, job_id: JobId, progress: u8) -> EngineResult<bool> {
        let job = self.get_mut(job_id)?;
        if job.state != JobState::Running {
            return Err(EngineError::InvalidTransition {
                from: job.state,
                to: JobState::Running,
            });
        }

        let progress = progress.min(PROGRESS_DONE);
        if progress <= job.progress {
            return Ok(false);
        }
        job.progress = progress;
        Ok(true)
    }

    /// `Running -> Completed`, returning the terminal snapshot
    pub fn complete(&mut self, job_id: JobId, result: AnalysisResult) -> EngineResult<AnalysisJob> {
        let job = self.transition(job_id, JobState::Completed)?;
        job.progress = PROGRESS_DONE;
        job.completed_at = Some(Utc::now());
        job.result = Some(result);
        let snapshot = job.clone();

        self.release(&snapshot);
        Ok(snapshot)
    }

    /// `Running -> Failed`; progress keeps its last committed value
    pub fn fail(&mut self, job_id: JobId, reason: impl Into<String>) -> EngineResult<AnalysisJob> {
        let job = self.transition(job_id, JobState::Failed)?;
        job.completed_at = Some(Utc::now());
        job.failure_reason = Some(reason.into());
        let snapshot = job.clone();

        self.release(&snapshot);
        Ok(snapshot)
    }

    /// Status of the scenario's most recent job held in memory
    pub fn status(&self, scenario_id: &ScenarioId) -> Option<JobStatus> {
        self.latest
            .get(scenario_id)
            .and_then(|job_id| self.jobs.get(job_id))
            .map(AnalysisJob::status)
    }

    pub fn job(&self, job_id: JobId) -> Option<&AnalysisJob> {
        self.jobs.get(&job_id)
    }

    pub fn active_job(&self, scenario_id: &ScenarioId) -> Option<JobId> {
        self.active.get(scenario_id).copied()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Note that a terminal job's snapshot has reached the result store
    pub fn mark_persisted(&mut self, job_id: JobId) -> EngineResult<()> {
        let job = self.get(job_id)?;
        if !job.state.is_terminal() {
            return Err(EngineError::InvalidTransition {
                from: job.state,
                to: job.state,
            });
        }
        self.persisted.insert(job_id);
        Ok(())
    }

    pub fn is_persisted(&self, job_id: JobId) -> bool {
        self.persisted.contains(&job_id)
    }

    /// Drop persisted terminal jobs from memory, returning how many were removed
    ///
    /// Terminal jobs without a stored snapshot stay, so they remain queryable.
    pub fn prune_terminal(&mut self) -> usize {
        let before = self.jobs.len();
        let persisted = &mut self.persisted;
        self.jobs
            .retain(|job_id, job| !(job.state.is_terminal() && persisted.remove(job_id)));
        let jobs = &self.jobs;
        self.latest.retain(|_, job_id| jobs.contains_key(job_id));
        before - self.jobs.len()
    }

    fn release(&mut self, job: &AnalysisJob) {
        if self.active.get(&job.scenario_id) == Some(&job.job_id) {
            self.active.remove(&job.scenario_id);
        }
    }

    fn transition(&mut self, job_id: JobId, next: JobState) -> EngineResult<&mut AnalysisJob> {
        let job = self.get_mut(job_id)?;
        if !job.state.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                from: job.state,
                to: next,
            });
        }
        job.state = next;
        Ok(job)
    }

    fn get(&self, job_id: JobId) -> EngineResult<&AnalysisJob> {
        self.jobs.get(&job_id).ok_or_else(|| EngineError::not_found("Job", job_id))
    }

    fn get_mut(&mut self, job_id: JobId) -> EngineResult<&mut AnalysisJob> {
        self.jobs.get_mut(&job_id).ok_or_else(|| EngineError::not_found("Job", job_id))
    }
}
