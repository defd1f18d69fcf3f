//! Rule-based optimization suggestions
//!
//! Turns an impact result and the best search candidate into short,
//! human-readable recommendations for the analysis result.

use shared::{ImpactResult, OptimizationCandidate, ScenarioSpec};

/// Transport share of the positive carbon terms above which routing is flagged
const TRANSPORT_SHARE_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionEngine;

impl SuggestionEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn suggest(
        &self,
        scenario: &ScenarioSpec,
        impact: &ImpactResult,
        best: Option<&OptimizationCandidate>,
    ) -> Vec<String> {
        let mut suggestions = Vec::new();

        if let Some(best) = best {
            let target = &best.parameters;

            let renewable_gain = target.energy.renewable - scenario.energy.renewable;
            if renewable_gain > 0.0 {
                suggestions.push(format!(
                    "Increase renewable energy usage by {renewable_gain:.0}% (to {:.0}%)",
                    target.energy.renewable
                ));
            }

            if target.route.efficiency > scenario.route.efficiency {
                suggestions.push(format!(
                    "Improve {} process efficiency from {:.0}% to {:.0}%",
                    scenario.route.process,
                    scenario.route.efficiency * 100.0,
                    target.route.efficiency * 100.0
                ));
            }

            if target.end_of_life.recycling_rate > scenario.end_of_life.recycling_rate {
                suggestions.push(format!(
                    "Implement closed-loop recycling system to raise recycling from {:.0}% to {:.0}%",
                    scenario.end_of_life.recycling_rate * 100.0,
                    target.end_of_life.recycling_rate * 100.0
                ));
            }
        }

        let carbon = &impact.carbon_footprint.breakdown;
        let positive = carbon.material + carbon.energy + carbon.transport;
        if positive > 0.0 && carbon.transport / positive > TRANSPORT_SHARE_THRESHOLD {
            suggestions.push(format!(
                "Optimize transportation routes ({:.0}% of gross emissions come from {} transport)",
                carbon.transport / positive * 100.0,
                scenario.transport.method
            ));
        }

        if impact.carbon_footprint.net_negative {
            suggestions.push("Net avoided emissions achieved - maintain recovery infrastructure".to_string());
        }

        if suggestions.is_empty() {
            suggestions.push("Scenario is already close to the optimization frontier".to_string());
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::impact::ImpactModel;
    use crate::optimization::{LocalSearch, SearchStrategy};
    use shared::{
        Constraints, EndOfLife, EnergyMix, EnergySource, Material, Objectives, OptimizationRequest, ProductionRoute,
        Transport, Weights,
    };
    use std::collections::HashMap;

    fn scenario() -> ScenarioSpec {
        ScenarioSpec {
            material: Material {
                material_type: "Steel".to_string(),
                composition: HashMap::new(),
                properties: HashMap::new(),
            },
            route: ProductionRoute {
                process: "Primary".to_string(),
                parameters: HashMap::new(),
                efficiency: 0.85,
            },
            energy: EnergyMix {
                sources: vec![EnergySource {
                    source_type: "grid".to_string(),
                    percentage: 100.0,
                    carbon_intensity: 0.5,
                }],
                renewable: 40.0,
            },
            transport: Transport {
                distance: 100.0,
                method: "truck".to_string(),
                carbon_intensity: 0.1,
            },
            end_of_life: EndOfLife {
                recycling_rate: 0.75,
                disposal_method: "landfill".to_string(),
                recovery_efficiency: 0.8,
            },
        }
    }

    #[test]
    fn test_suggestions_follow_best_candidate() {
        let spec = scenario();
        let impact = ImpactModel::exact().compute(&spec);
        let candidates = LocalSearch::new()
            .search(&OptimizationRequest {
                objectives: Some(Objectives::all()),
                weights: Some(Weights::equal()),
                constraints: Constraints::default(),
                baseline: spec.clone(),
            })
            .unwrap();

        let suggestions = SuggestionEngine::new().suggest(&spec, &impact, candidates.first());

        assert!(suggestions.iter().any(|s| s.starts_with("Increase renewable energy usage")));
        assert!(suggestions.iter().any(|s| s.contains("closed-loop recycling")));
        // Transport is 10 of ~22 kg gross
        assert!(suggestions.iter().any(|s| s.starts_with("Optimize transportation routes")));
    }

    #[test]
    fn test_fallback_when_nothing_to_improve() {
        let mut spec = scenario();
        spec.transport.distance = 0.0;
        let impact = ImpactModel::exact().compute(&spec);

        let suggestions = SuggestionEngine::new().suggest(&spec, &impact, None);
        assert_eq!(suggestions, vec!["Scenario is already close to the optimization frontier"]);
    }
}
