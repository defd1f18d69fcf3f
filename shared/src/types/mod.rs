//! Core types used throughout the scenario analysis engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub mod estimation;
pub mod impact;
pub mod job;
pub mod optimization;
pub mod scenario;
pub mod sustainability;

pub use estimation::{EstimationRequest, EstimationResult};
pub use impact::{
    CarbonBreakdown, CarbonFootprint, CircularityBreakdown, CircularityScore, EnergyBreakdown, EnergyConsumption,
    ImpactResult, WaterBreakdown, WaterConsumption, CARBON_UNIT, ENERGY_UNIT, WATER_UNIT,
};
pub use job::{AnalysisJob, AnalysisResult, JobId, JobState, JobStatus, ScenarioId};
pub use optimization::{
    CandidateMetrics, Constraints, Improvements, Objectives, OptimizationCandidate, OptimizationRequest, Weights,
};
pub use scenario::{
    EndOfLife, EnergyMix, EnergySource, Material, ProductionRoute, ScenarioSpec, Transport, ENERGY_MIX_TOLERANCE,
};
pub use sustainability::{SustainabilityInput, SustainabilityPrediction};

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Identifies which entry point emitted a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// Long-running engine hosting the job orchestrator
    Engine,
    /// One-shot command line invocation
    Cli,
}

impl ProcessId {
    /// Initialize the global process ID for a CLI run
    pub fn init_cli() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Cli)
    }

    /// Get the global process ID, defaulting to the engine when unset
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Engine)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Engine => write!(f, "engine"),
            ProcessId::Cli => write!(f, "cli"),
        }
    }
}
