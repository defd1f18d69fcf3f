//! Surrogate evaluation and scoring for optimization candidates
//!
//! Surrogate formulas:
//! - `co2 = BASE_CO2 * (1 - renewable/200) * (1 - efficiency/2)`
//! - `cost = BASE_COST * (1 + distance/1000) * (1 - efficiency/2)`
//! - `circularity = BASE_CIRCULARITY + recyclingRate*0.2 + recoveryEfficiency*0.1`, clamped to [0, 1]
//!
//! Score is the weight-normalized sum of `max(0, 1 - co2/5)`,
//! `max(0, 1 - cost/2000)` and `circularity`.

use shared::{CandidateMetrics, Constraints, Improvements, Objectives, OptimizationRequest, ScenarioSpec, Weights};

use crate::error::{EngineError, EngineResult};

pub const BASE_CO2: f64 = 2.1;
pub const BASE_COST: f64 = 1000.0;
pub const BASE_CIRCULARITY: f64 = 0.75;

/// CO2 at which the normalized CO2 score reaches zero
pub const CO2_SCALE: f64 = 5.0;
/// Cost at which the normalized cost score reaches zero
pub const COST_SCALE: f64 = 2000.0;

/// Project a scenario onto the surrogate metrics
pub fn evaluate(scenario: &ScenarioSpec) -> CandidateMetrics {
    let renewable = scenario.energy.renewable;
    let efficiency = scenario.route.efficiency;
    let distance = scenario.transport.distance;

    let co2 = BASE_CO2 * (1.0 - renewable / 200.0) * (1.0 - efficiency / 2.0);
    let cost = BASE_COST * (1.0 + distance / 1000.0) * (1.0 - efficiency / 2.0);
    let circularity = BASE_CIRCULARITY
        + scenario.end_of_life.recycling_rate * 0.2
        + scenario.end_of_life.recovery_efficiency * 0.1;

    CandidateMetrics {
        co2: co2.max(0.0),
        cost: cost.max(0.0),
        circularity: circularity.clamp(0.0, 1.0),
    }
}

/// Weighted normalized score, higher is better
pub fn score(metrics: &CandidateMetrics, weights: &Weights) -> f64 {
    let co2_norm = (1.0 - metrics.co2 / CO2_SCALE).max(0.0);
    let cost_norm = (1.0 - metrics.cost / COST_SCALE).max(0.0);
    let circularity_norm = metrics.circularity;

    (co2_norm * weights.co2 + cost_norm * weights.cost + circularity_norm * weights.circularity) / weights.total()
}

pub fn improvements(baseline: &CandidateMetrics, candidate: &CandidateMetrics) -> Improvements {
    Improvements {
        co2_reduction: baseline.co2 - candidate.co2,
        cost_savings: baseline.cost - candidate.cost,
        circularity_gain: candidate.circularity - baseline.circularity,
    }
}

/// Check objectives and weights are present and usable
pub fn validate_request(request: &OptimizationRequest) -> EngineResult<(Objectives, Weights)> {
    let (objectives, weights) = match (request.objectives, request.weights) {
        (Some(objectives), Some(weights)) => (objectives, weights),
        _ => return Err(EngineError::invalid("Objectives and weights are required")),
    };

    for (name, value) in [("co2", weights.co2), ("cost", weights.cost), ("circularity", weights.circularity)] {
        if !value.is_finite() || value < 0.0 {
            return Err(EngineError::invalid(format!("weight {name} must be a non-negative number")));
        }
    }

    if weights.total() <= 0.0 {
        return Err(EngineError::invalid("at least one weight must be positive"));
    }

    Ok((objectives, weights))
}

/// Describe every constraint a candidate breaks
pub fn constraint_violations(
    constraints: &Constraints,
    parameters: &ScenarioSpec,
    metrics: &CandidateMetrics,
) -> Vec<String> {
    let mut violations = Vec::new();

    if let Some(max_cost) = constraints.max_cost {
        if metrics.cost > max_cost {
            violations.push(format!("cost {:.2} exceeds maxCost {max_cost}", metrics.cost));
        }
    }
    if let Some(max_co2) = constraints.max_co2 {
        if metrics.co2 > max_co2 {
            violations.push(format!("co2 {:.3} exceeds maxCO2 {max_co2}", metrics.co2));
        }
    }
    if let Some(min_circularity) = constraints.min_circularity {
        if metrics.circularity < min_circularity {
            violations.push(format!(
                "circularity {:.3} is below minCircularity {min_circularity}",
                metrics.circularity
            ));
        }
    }
    if let Some(materials) = &constraints.available_materials {
        if !contains_ignore_case(materials, &parameters.material.material_type) {
            violations.push(format!("material {} is not available", parameters.material.material_type));
        }
    }
    if let Some(processes) = &constraints.available_processes {
        if !contains_ignore_case(processes, &parameters.route.process) {
            violations.push(format!("process {} is not available", parameters.route.process));
        }
    }

    violations
}

fn contains_ignore_case(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item.eq_ignore_ascii_case(value))
}
