//! Deterministic impact calculation
//!
//! Turns a scenario into carbon, energy, water and circularity figures. The
//! formulas are illustrative approximations, not a certified LCA method.
//! Material baselines carry a bounded +/- variation drawn from a generator
//! seeded per call, so the same scenario and seed always give the same
//! result.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{
    CarbonBreakdown, CarbonFootprint, CircularityBreakdown, CircularityScore, EndOfLife, EnergyBreakdown,
    EnergyConsumption, EnergyMix, ImpactResult, Material, ProductionRoute, ScenarioSpec, Transport, WaterBreakdown,
    WaterConsumption, CARBON_UNIT, ENERGY_UNIT, WATER_UNIT,
};

/// Process energy demand in MJ per kg of material
pub const BASE_ENERGY_MJ: f64 = 25.5;
/// Water drawn per MJ of process energy
pub const WATER_PER_MJ: f64 = 0.1;
/// Transport energy in MJ per km per kg
pub const TRANSPORT_ENERGY_PER_KM: f64 = 0.5;
/// Emissions avoided per unit of recycled and recovered material
pub const AVOIDED_EMISSIONS_PER_UNIT: f64 = 0.5;

/// Baseline material intensities used when a type is not in the table
pub const DEFAULT_MATERIAL_CO2: f64 = 2.1;
pub const DEFAULT_MATERIAL_WATER: f64 = 150.0;

/// (material, kg CO2e/kg, L/kg)
const MATERIAL_BASELINES: &[(&str, f64, f64)] = &[
    ("steel", 2.1, 150.0),
    ("aluminum", 8.2, 120.0),
    ("aluminium", 8.2, 120.0),
    ("copper", 3.8, 240.0),
    ("plastic", 2.5, 90.0),
    ("concrete", 0.15, 20.0),
    ("glass", 0.9, 15.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialImpact {
    pub co2: f64,
    pub water: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyImpact {
    pub co2: f64,
    pub energy: f64,
    pub water: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportImpact {
    pub co2: f64,
    pub energy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndOfLifeImpact {
    pub co2: f64,
}

/// Seedable impact model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactModel {
    seed: u64,
    variation: f64,
}

impl ImpactModel {
    pub fn new(seed: u64, variation: f64) -> Self {
        Self { seed, variation }
    }

    /// Model without any material variation
    pub fn exact() -> Self {
        Self::new(0, 0.0)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn variation(&self) -> f64 {
        self.variation
    }

    /// Compute the full impact of a scenario
    ///
    /// Expects a validated scenario; callers at the boundary run
    /// `ScenarioSpec::validate` first.
    pub fn compute(&self, scenario: &ScenarioSpec) -> ImpactResult {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let material = self.material_impact(&scenario.material, &mut rng);
        let energy = energy_impact(&scenario.energy, &scenario.route);
        let transport = transport_impact(&scenario.transport);
        let end_of_life = end_of_life_impact(&scenario.end_of_life);

        let carbon_total = material.co2 + energy.co2 + transport.co2 + end_of_life.co2;
        let carbon_footprint = CarbonFootprint {
            total: carbon_total,
            breakdown: CarbonBreakdown {
                material: material.co2,
                energy: energy.co2,
                transport: transport.co2,
                end_of_life: end_of_life.co2,
            },
            unit: CARBON_UNIT.to_string(),
            net_negative: carbon_total < 0.0,
        };

        let energy_consumption = EnergyConsumption {
            total: energy.energy + transport.energy,
            breakdown: EnergyBreakdown {
                process: energy.energy * 0.8,
                transport: transport.energy,
                auxiliary: energy.energy * 0.2,
            },
            unit: ENERGY_UNIT.to_string(),
        };

        let water_consumption = WaterConsumption {
            total: material.water + energy.water,
            breakdown: WaterBreakdown {
                process: material.water * 0.7,
                cooling: energy.water * 0.8,
                cleaning: material.water * 0.3,
            },
            unit: WATER_UNIT.to_string(),
        };

        ImpactResult {
            carbon_footprint,
            energy_consumption,
            water_consumption,
            circularity_score: circularity_score(scenario),
        }
    }

    fn material_impact(&self, material: &Material, rng: &mut StdRng) -> MaterialImpact {
        let (base_co2, base_water) = material_baseline(&material.material_type);
        MaterialImpact {
            co2: base_co2 * self.variation_factor(rng),
            water: base_water * self.variation_factor(rng),
        }
    }

    /// Uniform factor in [1 - variation, 1 + variation)
    fn variation_factor(&self, rng: &mut StdRng) -> f64 {
        let draw: f64 = rng.gen();
        1.0 + draw * 2.0 * self.variation - self.variation
    }
}

impl Default for ImpactModel {
    fn default() -> Self {
        Self::new(42, 0.1)
    }
}

/// Baseline (CO2, water) intensities for a material type, case-insensitive
pub fn material_baseline(material_type: &str) -> (f64, f64) {
    let key = material_type.trim().to_lowercase();
    MATERIAL_BASELINES
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|(_, co2, water)| (*co2, *water))
        .unwrap_or((DEFAULT_MATERIAL_CO2, DEFAULT_MATERIAL_WATER))
}

pub fn energy_impact(energy: &EnergyMix, route: &ProductionRoute) -> EnergyImpact {
    let renewable_factor = energy.renewable / 100.0;
    let carbon_intensity = energy.weighted_carbon_intensity();

    EnergyImpact {
        co2: BASE_ENERGY_MJ * carbon_intensity * (1.0 - renewable_factor * 0.5),
        energy: BASE_ENERGY_MJ * route.efficiency,
        water: BASE_ENERGY_MJ * WATER_PER_MJ,
    }
}

pub fn transport_impact(transport: &Transport) -> TransportImpact {
    TransportImpact {
        co2: transport.distance * transport.carbon_intensity,
        energy: transport.distance * TRANSPORT_ENERGY_PER_KM,
    }
}

pub fn end_of_life_impact(end_of_life: &EndOfLife) -> EndOfLifeImpact {
    EndOfLifeImpact {
        co2: -AVOIDED_EMISSIONS_PER_UNIT * end_of_life.recycling_rate * end_of_life.recovery_efficiency,
    }
}

/// Equal-weighted circularity score, each part a whole percentage
pub fn circularity_score(scenario: &ScenarioSpec) -> CircularityScore {
    let material_efficiency = scenario.route.efficiency;
    let energy_recovery = (scenario.energy.renewable / 100.0) * 0.8;
    let waste_reduction = scenario.end_of_life.recycling_rate * 0.9;
    let recycling_rate = scenario.end_of_life.recycling_rate;

    let average = (material_efficiency + energy_recovery + waste_reduction + recycling_rate) / 4.0;

    CircularityScore {
        total: as_percentage(average),
        breakdown: CircularityBreakdown {
            material_efficiency: as_percentage(material_efficiency),
            energy_recovery: as_percentage(energy_recovery),
            waste_reduction: as_percentage(waste_reduction),
            recycling_rate: as_percentage(recycling_rate),
        },
    }
}

fn as_percentage(fraction: f64) -> f64 {
    (fraction * 100.0).round().clamp(0.0, 100.0)
}
