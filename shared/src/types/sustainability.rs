//! Sustainability prediction records for mining and production sites

use serde::{Deserialize, Serialize};

/// Site-level signals; absent numbers count as zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SustainabilityInput {
    pub site_id: String,
    pub site_name: String,
    pub region: String,
    pub mineral: String,
    pub life_cycle_stage: String,
    pub production_tonnes: f64,
    pub recycled_input_percent: f64,
    pub energy_source: String,
    pub energy_consumption_mwh: f64,
    pub co2_emissions_tonnes: f64,
    pub water_usage_m3: f64,
    pub waste_generated_tonnes: f64,
    pub transport_distance_km: f64,
    pub employment_generated: f64,
    pub community_investment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityPrediction {
    pub recyclability_score: f64,
    pub reuse_potential_score: f64,
    pub product_life_extension_years: f64,
    pub confidence: f64,
    pub recommendations: Vec<String>,
}
