//! Randomization-free local search around a baseline scenario
//!
//! Candidate `i` applies adjustments that grow with `i`, gated by the
//! active objectives. Every candidate starts from its own copy of the
//! baseline, so adjustments never accumulate across candidates.

use std::cmp::Ordering;

use shared::{Objectives, OptimizationCandidate, OptimizationRequest, ScenarioSpec};

use super::super::traits::SearchStrategy;
use super::super::types::{constraint_violations, evaluate, improvements, score, validate_request};
use crate::error::EngineResult;

/// Number of candidates generated per search
pub const DEFAULT_CANDIDATE_COUNT: usize = 5;

/// Bounded perturbation search producing a fixed number of candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearch {
    candidate_count: usize,
}

impl LocalSearch {
    pub fn new() -> Self {
        Self::with_candidates(DEFAULT_CANDIDATE_COUNT)
    }

    pub fn with_candidates(candidate_count: usize) -> Self {
        Self { candidate_count }
    }

    pub fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Apply the index-scaled adjustments for candidate `index`
    pub fn perturb(baseline: &ScenarioSpec, objectives: &Objectives, index: usize) -> ScenarioSpec {
        let step = index as f64;
        let mut candidate = baseline.clone();

        if objectives.minimize_co2 {
            candidate.energy.renewable = (candidate.energy.renewable + 20.0 + step * 5.0).min(100.0);
            candidate.route.efficiency = (candidate.route.efficiency + 0.1 + step * 0.02).min(1.0);
        }

        if objectives.maximize_circularity {
            let eol = &mut candidate.end_of_life;
            eol.recycling_rate = (eol.recycling_rate + 0.15 + step * 0.03).min(1.0);
            eol.recovery_efficiency = (eol.recovery_efficiency + 0.1 + step * 0.02).min(1.0);
        }

        if objectives.minimize_cost {
            candidate.transport.distance = (candidate.transport.distance - 20.0 - step * 5.0).max(0.0);
        }

        candidate
    }
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStrategy for LocalSearch {
    fn search(&self, request: &OptimizationRequest) -> EngineResult<Vec<OptimizationCandidate>> {
        let (objectives, weights) = validate_request(request)?;
        request.baseline.validate()?;

        let baseline_metrics = evaluate(&request.baseline);

        let mut candidates: Vec<OptimizationCandidate> = (0..self.candidate_count)
            .map(|index| {
                let parameters = Self::perturb(&request.baseline, &objectives, index);
                let metrics = evaluate(&parameters);
                OptimizationCandidate {
                    id: format!("opt_{}", index + 1),
                    score: score(&metrics, &weights),
                    constraint_violations: constraint_violations(&request.constraints, &parameters, &metrics),
                    improvements: improvements(&baseline_metrics, &metrics),
                    metrics,
                    parameters,
                }
            })
            .collect();

        // sort_by is stable, so equal scores keep candidate order
        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        Ok(candidates)
    }
}
