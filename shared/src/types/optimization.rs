//! Multi-objective optimization records

use serde::{Deserialize, Serialize};

use super::scenario::ScenarioSpec;

/// Optimization request over a baseline scenario
///
/// `objectives` and `weights` are optional on the wire so that a missing
/// block is reported as an invalid request rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptimizationRequest {
    #[serde(default)]
    pub objectives: Option<Objectives>,
    #[serde(default)]
    pub weights: Option<Weights>,
    #[serde(default)]
    pub constraints: Constraints,
    pub baseline: ScenarioSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objectives {
    #[serde(rename = "minimizeCO2")]
    pub minimize_co2: bool,
    pub minimize_cost: bool,
    pub maximize_circularity: bool,
}

impl Objectives {
    pub fn all() -> Self {
        Self {
            minimize_co2: true,
            minimize_cost: true,
            maximize_circularity: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub co2: f64,
    pub cost: f64,
    pub circularity: f64,
}

impl Weights {
    pub fn equal() -> Self {
        Self {
            co2: 1.0,
            cost: 1.0,
            circularity: 1.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.co2 + self.cost + self.circularity
    }
}

/// Optional bounds a candidate should respect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Constraints {
    #[serde(default)]
    pub max_cost: Option<f64>,
    #[serde(default)]
    pub min_circularity: Option<f64>,
    #[serde(default, rename = "maxCO2")]
    pub max_co2: Option<f64>,
    #[serde(default)]
    pub available_materials: Option<Vec<String>>,
    #[serde(default)]
    pub available_processes: Option<Vec<String>>,
}

/// Surrogate metrics used to rank candidates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateMetrics {
    pub co2: f64,
    pub cost: f64,
    pub circularity: f64,
}

/// Change of a candidate relative to the unmodified baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvements {
    pub co2_reduction: f64,
    pub cost_savings: f64,
    pub circularity_gain: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationCandidate {
    pub id: String,
    pub score: f64,
    pub parameters: ScenarioSpec,
    pub metrics: CandidateMetrics,
    pub improvements: Improvements,
    #[serde(default)]
    pub constraint_violations: Vec<String>,
}

impl OptimizationCandidate {
    pub fn is_feasible(&self) -> bool {
        self.constraint_violations.is_empty()
    }
}
