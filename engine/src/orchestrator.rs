//! Analysis job orchestrator
//!
//! Admits analysis jobs (at most one active job per scenario), queues them on
//! a bounded channel and runs them on a fixed pool of worker tasks. Each job
//! walks the pipeline stages in order, committing progress checkpoints to the
//! registry as it goes, and ends in `Completed` or `Failed`. Terminal
//! snapshots are written to the result store.

use std::any::Any;
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

use shared::{
    logging, process_debug, process_error, process_info, process_warn, AnalysisJob, AnalysisResult, JobId,
    JobStatus, ProcessId, ScenarioId, ScenarioSpec,
};

use crate::{
    config::EngineConfig,
    core::JobRegistry,
    error::{EngineError, EngineResult},
    traits::{AnalysisOptions, AnalysisPipeline, ResultStore},
};

/// Progress committed after the impact stage
pub const PROGRESS_IMPACT: u8 = 50;
/// Progress committed after the synthesis stage
pub const PROGRESS_SYNTHESIS: u8 = 80;

/// One queued unit of work
#[derive(Debug)]
struct WorkItem {
    job_id: JobId,
    scenario_id: ScenarioId,
    scenario: Arc<ScenarioSpec>,
    options: Arc<AnalysisOptions>,
}

/// State shared between the orchestrator handle and its workers
struct Shared<S, P> {
    registry: Mutex<JobRegistry>,
    store: S,
    pipeline: Arc<P>,
    config: EngineConfig,
}

/// Schedules, runs and tracks analysis jobs
pub struct JobOrchestrator<S, P>
where
    S: ResultStore + 'static,
    P: AnalysisPipeline + 'static,
{
    shared: Arc<Shared<S, P>>,

    /// Sending half of the work queue; `None` once shut down
    queue_tx: RwLock<Option<mpsc::Sender<WorkItem>>>,

    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl<S, P> JobOrchestrator<S, P>
where
    S: ResultStore + 'static,
    P: AnalysisPipeline + 'static,
{
    /// Create the orchestrator and start its workers
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: EngineConfig, store: S, pipeline: P) -> EngineResult<Self> {
        config.validate()?;

        let (queue_tx, queue_rx) = mpsc::channel(config.queue_capacity);
        let queue_rx = Arc::new(Mutex::new(queue_rx));
        let worker_count = config.worker_count;

        let shared = Arc::new(Shared {
            registry: Mutex::new(JobRegistry::new()),
            store,
            pipeline: Arc::new(pipeline),
            config,
        });

        let workers = (0..worker_count)
            .map(|worker| {
                let shared = shared.clone();
                let queue_rx = queue_rx.clone();
                tokio::spawn(async move { worker_loop(worker, shared, queue_rx).await })
            })
            .collect();

        logging::log_startup(
            ProcessId::current(),
            &format!(
                "job orchestrator with {} workers (queue capacity {})",
                worker_count, shared.config.queue_capacity
            ),
        );

        Ok(Self {
            shared,
            queue_tx: RwLock::new(Some(queue_tx)),
            workers: Mutex::new(workers),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    pub fn store(&self) -> &S {
        &self.shared.store
    }

    /// Submit a scenario for analysis with default options
    pub async fn submit(&self, scenario_id: impl Into<ScenarioId>, scenario: ScenarioSpec) -> EngineResult<JobId> {
        self.submit_with_options(scenario_id, scenario, AnalysisOptions::default())
            .await
    }

    /// Submit a scenario for analysis
    ///
    /// Returns as soon as the job is queued. Fails with `Conflict` when the
    /// scenario already has an active job and with `Busy` when the queue is
    /// full; in both cases no job is left behind.
    pub async fn submit_with_options(
        &self,
        scenario_id: impl Into<ScenarioId>,
        scenario: ScenarioSpec,
        options: AnalysisOptions,
    ) -> EngineResult<JobId> {
        let scenario_id = scenario_id.into();
        if scenario_id.as_str().trim().is_empty() {
            return Err(EngineError::invalid("scenario id must not be empty"));
        }
        scenario.validate()?;

        let queue_tx = self
            .queue_tx
            .read()
            .await
            .clone()
            .ok_or_else(|| EngineError::execution("orchestrator is shut down"))?;

        // Admission and enqueue happen under one registry lock, so a rollback
        // is never observed by another submitter.
        let mut registry = self.shared.registry.lock().await;
        let job_id = match registry.admit(&scenario_id) {
            Ok(job_id) => job_id,
            Err(e) => {
                process_warn!(ProcessId::current(), "⚠️ Rejected submission for scenario {}: {}", scenario_id, e);
                return Err(e);
            }
        };

        let item = WorkItem {
            job_id,
            scenario_id: scenario_id.clone(),
            scenario: Arc::new(scenario),
            options: Arc::new(options),
        };

        match queue_tx.try_send(item) {
            Ok(()) => {
                process_info!(ProcessId::current(), "📥 Queued job {} for scenario {}", job_id, scenario_id);
                Ok(job_id)
            }
            Err(TrySendError::Full(_)) => {
                registry.withdraw(job_id)?;
                let capacity = self.shared.config.queue_capacity;
                process_warn!(
                    ProcessId::current(),
                    "⚠️ Work queue full ({}), rejected scenario {}",
                    capacity,
                    scenario_id
                );
                Err(EngineError::Busy { capacity })
            }
            Err(TrySendError::Closed(_)) => {
                registry.withdraw(job_id)?;
                Err(EngineError::execution("work queue is closed"))
            }
        }
    }

    /// Latest status for a scenario
    ///
    /// Reads the in-memory registry first and falls back to the result store
    /// for jobs that have been pruned.
    pub async fn get_status(&self, scenario_id: impl Into<ScenarioId>) -> EngineResult<JobStatus> {
        let scenario_id = scenario_id.into();

        if let Some(status) = self.shared.registry.lock().await.status(&scenario_id) {
            return Ok(status);
        }

        match self.shared.store.get(&scenario_id).await? {
            Some(job) => Ok(job.status()),
            None => Err(EngineError::not_found("Scenario", scenario_id)),
        }
    }

    /// Status of a specific job
    pub async fn job_status(&self, job_id: JobId) -> EngineResult<JobStatus> {
        if let Some(job) = self.shared.registry.lock().await.job(job_id) {
            return Ok(job.status());
        }

        for scenario_id in self.shared.store.list().await? {
            if let Some(job) = self.shared.store.get(&scenario_id).await? {
                if job.job_id == job_id {
                    return Ok(job.status());
                }
            }
        }
        Err(EngineError::not_found("Job", job_id))
    }

    /// Drop terminal jobs from memory once their snapshots are in the store
    pub async fn prune_terminal(&self) -> usize {
        let pruned = self.shared.registry.lock().await.prune_terminal();
        process_debug!(ProcessId::current(), "🧹 Pruned {} terminal jobs", pruned);
        pruned
    }

    pub async fn active_jobs(&self) -> usize {
        self.shared.registry.lock().await.active_count()
    }

    /// Stop accepting work and wait for queued jobs to drain
    pub async fn shutdown(&self) {
        // Dropping the last sender closes the queue once it is empty
        self.queue_tx.write().await.take();

        let workers: Vec<JoinHandle<()>> = self.workers.lock().await.drain(..).collect();
        for handle in workers {
            if let Err(e) = handle.await {
                logging::log_error(ProcessId::current(), "Worker join", &e);
            }
        }

        logging::log_shutdown(ProcessId::current(), "job orchestrator stopped");
    }
}

async fn worker_loop<S, P>(worker: usize, shared: Arc<Shared<S, P>>, queue_rx: Arc<Mutex<mpsc::Receiver<WorkItem>>>)
where
    S: ResultStore + 'static,
    P: AnalysisPipeline + 'static,
{
    process_debug!(ProcessId::current(), "👷 Worker {} started", worker);

    loop {
        let item = queue_rx.lock().await.recv().await;
        match item {
            Some(item) => run_job(&shared, item).await,
            None => break,
        }
    }

    process_debug!(ProcessId::current(), "👷 Worker {} stopped", worker);
}

async fn run_job<S, P>(shared: &Shared<S, P>, item: WorkItem)
where
    S: ResultStore + 'static,
    P: AnalysisPipeline + 'static,
{
    let job_id = item.job_id;

    if let Err(e) = shared.registry.lock().await.start(job_id) {
        logging::log_error(ProcessId::current(), &format!("Starting job {job_id}"), &e);
        return;
    }
    process_info!(ProcessId::current(), "▶️ Job {} for scenario {} is running", job_id, item.scenario_id);

    let job_timeout = shared.config.job_timeout;
    let outcome = match timeout(job_timeout, execute(shared, &item)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(EngineError::Timeout {
            scenario_id: item.scenario_id.to_string(),
            after: job_timeout,
        }),
    };

    let terminal = {
        let mut registry = shared.registry.lock().await;
        match outcome {
            Ok(result) => registry.complete(job_id, result),
            Err(e) => {
                process_error!(ProcessId::current(), "❌ Job {} failed: {}", job_id, e);
                registry.fail(job_id, e.to_string())
            }
        }
    };

    match terminal {
        Ok(snapshot) => {
            if snapshot.result.is_some() {
                logging::log_success(
                    ProcessId::current(),
                    &format!("Job {} for scenario {} completed", job_id, snapshot.scenario_id),
                );
            }
            persist(shared, snapshot).await;
        }
        Err(e) => logging::log_error(ProcessId::current(), &format!("Finalizing job {job_id}"), &e),
    }
}

/// Run the three pipeline stages, committing progress after each
async fn execute<S, P>(shared: &Shared<S, P>, item: &WorkItem) -> EngineResult<AnalysisResult>
where
    S: ResultStore + 'static,
    P: AnalysisPipeline + 'static,
{
    let impact = {
        let pipeline = shared.pipeline.clone();
        let scenario = item.scenario.clone();
        run_stage("impact", move || pipeline.calculate_impact(&scenario)).await?
    };
    checkpoint(shared, item.job_id, PROGRESS_IMPACT).await?;

    let synthesis = {
        let pipeline = shared.pipeline.clone();
        let scenario = item.scenario.clone();
        let impact = impact.clone();
        run_stage("synthesis", move || pipeline.synthesize(&scenario, &impact)).await?
    };
    checkpoint(shared, item.job_id, PROGRESS_SYNTHESIS).await?;

    let estimates = {
        let pipeline = shared.pipeline.clone();
        let scenario = item.scenario.clone();
        let options = item.options.clone();
        run_stage("finalize", move || pipeline.finalize(&scenario, &options)).await?
    };
    pause(shared).await;

    Ok(AnalysisResult {
        impact,
        circularity_metrics: synthesis.circularity_metrics,
        optimization_suggestions: synthesis.optimization_suggestions,
        estimates,
    })
}

/// Run one stage on the blocking pool, converting a panic into an error
async fn run_stage<T, F>(stage: &str, work: F) -> EngineResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> EngineResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(EngineError::execution(format!(
            "{stage} stage panicked: {}",
            panic_message(e.into_panic())
        ))),
        Err(e) => Err(EngineError::execution(format!("{stage} stage was aborted: {e}"))),
    }
}

async fn checkpoint<S, P>(shared: &Shared<S, P>, job_id: JobId, progress: u8) -> EngineResult<()>
where
    S: ResultStore + 'static,
    P: AnalysisPipeline + 'static,
{
    pause(shared).await;
    if shared.registry.lock().await.record_progress(job_id, progress)? {
        logging::log_progress(ProcessId::current(), &format!("Job {job_id}"), &format!("{progress}%"));
    }
    Ok(())
}

async fn pause<S, P>(shared: &Shared<S, P>) {
    let delay = shared.config.stage_delay;
    if !delay.is_zero() {
        sleep(delay).await;
    }
}

async fn persist<S, P>(shared: &Shared<S, P>, snapshot: AnalysisJob)
where
    S: ResultStore + 'static,
    P: AnalysisPipeline + 'static,
{
    let job_id = snapshot.job_id;
    match shared.store.put(snapshot).await {
        // Only stored snapshots may be pruned from memory
        Ok(()) => {
            if let Err(e) = shared.registry.lock().await.mark_persisted(job_id) {
                logging::log_error(ProcessId::current(), &format!("Marking job {job_id} persisted"), &e);
            }
        }
        Err(e) => logging::log_error(ProcessId::current(), &format!("Persisting job {job_id}"), &e),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
