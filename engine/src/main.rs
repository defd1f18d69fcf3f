//! Main entry point for the engine binary
//!
//! Wires the analysis API with the in-memory store and default pipeline and
//! exposes each operation as a subcommand. Results are printed as JSON.

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine::{load_scenario, AnalysisApi, AnalysisOptions, DefaultPipeline, EngineConfig, EngineResult, MemoryResultStore};
use shared::{
    logging, process_debug, process_info, EstimationRequest, OptimizationRequest, ProcessId, SustainabilityInput,
};

/// Scenario analysis engine for material production chains
#[derive(Parser)]
#[command(name = "engine")]
#[command(about = "Impact, estimation and optimization analysis for material production scenarios")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Number of analysis workers (overrides ENGINE_WORKERS)
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    /// Work queue capacity (overrides ENGINE_QUEUE_CAPACITY)
    #[arg(long, global = true)]
    pub queue_capacity: Option<usize>,

    /// Impact model seed (overrides ENGINE_IMPACT_SEED)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the impact of a scenario file synchronously
    Impact {
        /// Path to a scenario JSON document
        scenario: PathBuf,
    },

    /// Estimate missing fields for a material and process
    Estimate {
        #[arg(long)]
        material: String,

        #[arg(long)]
        process: String,

        #[arg(long)]
        region: Option<String>,

        #[arg(long)]
        technology_level: Option<String>,

        /// Field names to estimate
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Search for better parameters for an optimization request file
    Optimize {
        /// Path to an optimization request JSON document
        request: PathBuf,
    },

    /// Predict sustainability scores for a site description file
    Predict {
        /// Path to a sustainability input JSON document
        input: PathBuf,
    },

    /// Run a full background analysis and wait for it to finish
    Analyze {
        /// Path to a scenario JSON document
        scenario: PathBuf,

        /// Identifier the job is tracked under
        #[arg(long, default_value = "cli")]
        scenario_id: String,

        /// Fields to estimate during finalization (comma separated)
        #[arg(long, value_delimiter = ',')]
        estimate: Vec<String>,

        /// Status polling interval in milliseconds
        #[arg(long, default_value = "100")]
        poll_ms: u64,
    },
}

#[tokio::main]
async fn main() -> EngineResult<()> {
    let args = Args::parse();

    ProcessId::init_cli();
    logging::init_tracing_with_level(Some(&args.log_level));

    let mut config = EngineConfig::from_env()?;
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    if let Some(capacity) = args.queue_capacity {
        config = config.with_queue_capacity(capacity);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    process_debug!(ProcessId::current(), "⚙️ Configuration: {:?}", config);

    let api = AnalysisApi::from_config(config)?;

    let outcome = run(&api, args.command).await;
    api.shutdown().await;
    outcome
}

async fn run(api: &AnalysisApi<MemoryResultStore, DefaultPipeline>, command: Command) -> EngineResult<()> {
    match command {
        Command::Impact { scenario } => {
            let scenario = load_scenario(&scenario).await?;
            print_json(&api.compute_impact(&scenario)?)
        }
        Command::Estimate {
            material,
            process,
            region,
            technology_level,
            fields,
        } => {
            let mut request = EstimationRequest::new(material, process).with_fields(fields);
            request.region = region;
            request.technology_level = technology_level;
            print_json(&api.estimate_missing(&request)?)
        }
        Command::Optimize { request } => {
            let request: OptimizationRequest = read_json(&request).await?;
            print_json(&api.optimize(&request)?)
        }
        Command::Predict { input } => {
            let input: SustainabilityInput = read_json(&input).await?;
            print_json(&api.predict_sustainability(&input))
        }
        Command::Analyze {
            scenario,
            scenario_id,
            estimate,
            poll_ms,
        } => {
            let spec = load_scenario(&scenario).await?;
            let options = AnalysisOptions::with_estimates(estimate);
            let job_id = api
                .submit_analysis_with_options(scenario_id.as_str(), spec, options)
                .await?;
            process_info!(ProcessId::current(), "🧪 Submitted job {} for scenario {}", job_id, scenario_id);

            let poll = Duration::from_millis(poll_ms.max(1));
            loop {
                let status = api.get_analysis_status(scenario_id.as_str()).await?;
                if status.state.is_terminal() {
                    return print_json(&status);
                }
                process_debug!(ProcessId::current(), "⏳ {} at {}%", status.state, status.progress);
                tokio::time::sleep(poll).await;
            }
        }
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}

fn print_json<T: Serialize>(value: &T) -> EngineResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
