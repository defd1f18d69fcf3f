//! Engine configuration
//!
//! Values are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! Environment variables take precedence over .env file values. Anything not
//! set falls back to the defaults below; the CLI can override single values.
//!
//! | Variable                  | Default |
//! |---------------------------|---------|
//! | `ENGINE_WORKERS`          | 4       |
//! | `ENGINE_QUEUE_CAPACITY`   | 64      |
//! | `ENGINE_JOB_TIMEOUT_SECS` | 300     |
//! | `ENGINE_IMPACT_SEED`      | 42      |
//! | `ENGINE_IMPACT_VARIATION` | 0.1     |
//! | `ENGINE_STAGE_DELAY_MS`   | 0       |

use std::str::FromStr;
use std::time::Duration;

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of concurrent analysis workers
    pub worker_count: usize,
    /// Maximum queued jobs before `submit` reports busy
    pub queue_capacity: usize,
    /// Upper bound on one job's total execution time
    pub job_timeout: Duration,
    /// Seed for the impact model's material variation
    pub impact_seed: u64,
    /// Relative +/- variation applied to material baselines, in [0, 1)
    pub impact_variation: f64,
    /// Pause inserted after each pipeline stage
    pub stage_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: 4,
            queue_capacity: 64,
            job_timeout: Duration::from_secs(300),
            impact_seed: 42,
            impact_variation: 0.1,
            stage_delay: Duration::ZERO,
        }
    }
}

impl EngineConfig {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> EngineResult<Self> {
        // Silently ignored when there is no .env file
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            worker_count: parse_or("ENGINE_WORKERS", &lookup, defaults.worker_count)?,
            queue_capacity: parse_or("ENGINE_QUEUE_CAPACITY", &lookup, defaults.queue_capacity)?,
            job_timeout: Duration::from_secs(parse_or(
                "ENGINE_JOB_TIMEOUT_SECS",
                &lookup,
                defaults.job_timeout.as_secs(),
            )?),
            impact_seed: parse_or("ENGINE_IMPACT_SEED", &lookup, defaults.impact_seed)?,
            impact_variation: parse_or("ENGINE_IMPACT_VARIATION", &lookup, defaults.impact_variation)?,
            stage_delay: Duration::from_millis(parse_or(
                "ENGINE_STAGE_DELAY_MS",
                &lookup,
                defaults.stage_delay.as_millis() as u64,
            )?),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.worker_count == 0 {
            return Err(EngineError::config("worker_count must be at least 1"));
        }
        if self.queue_capacity == 0 {
            return Err(EngineError::config("queue_capacity must be at least 1"));
        }
        if self.job_timeout.is_zero() {
            return Err(EngineError::config("job_timeout must be positive"));
        }
        if !(0.0..1.0).contains(&self.impact_variation) {
            return Err(EngineError::config(format!(
                "impact_variation must be in [0, 1), got {}",
                self.impact_variation
            )));
        }
        Ok(())
    }

    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn with_job_timeout(mut self, job_timeout: Duration) -> Self {
        self.job_timeout = job_timeout;
        self
    }

    pub fn with_seed(mut self, impact_seed: u64) -> Self {
        self.impact_seed = impact_seed;
        self
    }

    pub fn with_variation(mut self, impact_variation: f64) -> Self {
        self.impact_variation = impact_variation;
        self
    }

    pub fn with_stage_delay(mut self, stage_delay: Duration) -> Self {
        self.stage_delay = stage_delay;
        self
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> EngineResult<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| EngineError::config(format!("{key}: cannot parse '{raw}'"))),
        None => Ok(default),
    }
}
