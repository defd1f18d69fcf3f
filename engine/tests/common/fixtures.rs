//! Test fixtures and data for engine tests
//!
//! Consistent scenarios and requests used across all test suites.

use shared::{
    Constraints, EndOfLife, EnergyMix, EnergySource, Material, Objectives, OptimizationRequest, ProductionRoute,
    ScenarioSpec, SustainabilityInput, Transport, Weights,
};
use std::collections::HashMap;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Standard scenario ids
    pub const SCENARIO_1: &'static str = "S1";
    pub const SCENARIO_2: &'static str = "S2";
    pub const SCENARIO_3: &'static str = "S3";

    /// Reference steel scenario: 100 km by truck, 40% renewable grid mix
    pub fn steel_scenario() -> ScenarioSpec {
        ScenarioSpec {
            material: Material {
                material_type: "Steel".to_string(),
                composition: HashMap::from([("Fe".to_string(), 0.98), ("C".to_string(), 0.02)]),
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

    /// Secondary aluminium on a mostly renewable mix
    pub fn aluminium_scenario() -> ScenarioSpec {
        let mut scenario = Self::steel_scenario();
        scenario.material.material_type = "Aluminum".to_string();
        scenario.material.composition = HashMap::from([("Al".to_string(), 1.0)]);
        scenario.route.process = "Secondary".to_string();
        scenario.energy.sources = vec![
            EnergySource {
                source_type: "hydro".to_string(),
                percentage: 70.0,
                carbon_intensity: 0.02,
            },
            EnergySource {
                source_type: "grid".to_string(),
                percentage: 30.0,
                carbon_intensity: 0.5,
            },
        ];
        scenario.energy.renewable = 70.0;
        scenario
    }

    /// Scenario that fails validation (efficiency above 1)
    pub fn invalid_scenario() -> ScenarioSpec {
        let mut scenario = Self::steel_scenario();
        scenario.route.efficiency = 1.2;
        scenario
    }

    pub fn optimization_request() -> OptimizationRequest {
        OptimizationRequest {
            objectives: Some(Objectives::all()),
            weights: Some(Weights::equal()),
            constraints: Constraints::default(),
            baseline: Self::steel_scenario(),
        }
    }

    pub fn sustainability_input() -> SustainabilityInput {
        SustainabilityInput {
            site_id: "site-7".to_string(),
            mineral: "Steel".to_string(),
            production_tonnes: 120_000.0,
            recycled_input_percent: 30.0,
            energy_source: "coal".to_string(),
            co2_emissions_tonnes: 150_000.0,
            water_usage_m3: 500_000.0,
            employment_generated: 2_400.0,
            community_investment: 12_000_000.0,
            ..SustainabilityInput::default()
        }
    }
}
