//! Impact calculation output records

use serde::{Deserialize, Serialize};

pub const CARBON_UNIT: &str = "kg CO2e/kg material";
pub const ENERGY_UNIT: &str = "MJ/kg material";
pub const WATER_UNIT: &str = "L/kg material";

/// Full environmental impact of one scenario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactResult {
    pub carbon_footprint: CarbonFootprint,
    pub energy_consumption: EnergyConsumption,
    pub water_consumption: WaterConsumption,
    pub circularity_score: CircularityScore,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonFootprint {
    /// Exact sum of the breakdown, may be negative
    pub total: f64,
    pub breakdown: CarbonBreakdown,
    pub unit: String,
    /// Set when avoided emissions outweigh everything else
    pub net_negative: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonBreakdown {
    pub material: f64,
    pub energy: f64,
    pub transport: f64,
    /// Avoided emissions, zero or negative
    pub end_of_life: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyConsumption {
    pub total: f64,
    pub breakdown: EnergyBreakdown,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyBreakdown {
    pub process: f64,
    pub transport: f64,
    pub auxiliary: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterConsumption {
    pub total: f64,
    pub breakdown: WaterBreakdown,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterBreakdown {
    pub process: f64,
    pub cooling: f64,
    pub cleaning: f64,
}

/// Composite circularity score, all values are whole percentages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularityScore {
    pub total: f64,
    pub breakdown: CircularityBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularityBreakdown {
    pub material_efficiency: f64,
    pub energy_recovery: f64,
    pub waste_reduction: f64,
    pub recycling_rate: f64,
}
