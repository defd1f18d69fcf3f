//! Deterministic sustainability prediction for production sites
//!
//! Scores recyclability, reuse potential and product life extension from
//! site signals. Confidence rises with the number of key signals present.

use shared::{SustainabilityInput, SustainabilityPrediction};

#[derive(Debug, Clone, Copy, Default)]
pub struct SustainabilityPredictor;

impl SustainabilityPredictor {
    pub fn new() -> Self {
        Self
    }

    pub fn predict(&self, input: &SustainabilityInput) -> SustainabilityPrediction {
        let recycled = non_negative(input.recycled_input_percent);
        let production = non_negative(input.production_tonnes);
        let co2 = non_negative(input.co2_emissions_tonnes);
        let water = non_negative(input.water_usage_m3);
        let energy_source = if input.energy_source.trim().is_empty() {
            "grid".to_string()
        } else {
            input.energy_source.trim().to_lowercase()
        };
        let mineral = input.mineral.trim().to_lowercase();

        let mineral_bonus = match mineral.as_str() {
            "aluminium" | "aluminum" => 18.0,
            "steel" => 12.0,
            _ => 6.0,
        };
        let recyclability = (40.0 + recycled * 0.6 + mineral_bonus - (co2 / 200_000.0).min(10.0)).clamp(10.0, 95.0);

        let clean_energy_bonus = match energy_source.as_str() {
            "solar" | "hydro" | "wind" => 15.0,
            "mixed" => 5.0,
            _ => 0.0,
        };
        let reuse = (35.0 + production / 12_000.0 + clean_energy_bonus - (water / 2_000_000.0).min(8.0)).clamp(15.0, 90.0);

        let life = (2.5
            + non_negative(input.employment_generated) / 12_000.0
            + non_negative(input.community_investment) / 120_000_000.0)
            .clamp(1.0, 8.0);

        let mut confidence: f64 = 0.65;
        if production > 0.0 {
            confidence += 0.08;
        }
        if co2 > 0.0 {
            confidence += 0.07;
        }
        if recycled > 0.0 {
            confidence += 0.05;
        }
        let confidence = confidence.clamp(0.6, 0.95);

        let mut recommendations = vec![
            if recyclability > 70.0 {
                "Excellent recyclability potential - invest in recycling streams"
            } else if recyclability > 50.0 {
                "Good recyclability - scale up recycling programs"
            } else {
                "Low recyclability - prioritize waste minimization"
            }
            .to_string(),
            if reuse > 70.0 {
                "High reuse potential - develop circular initiatives"
            } else if reuse > 50.0 {
                "Moderate reuse potential - expand repurposing use-cases"
            } else {
                "Limited reuse potential - improve process efficiencies"
            }
            .to_string(),
        ];
        if energy_source == "coal" {
            recommendations.push("Transition away from coal to renewables to improve sustainability".to_string());
        }
        if co2 > 120_000.0 {
            recommendations.push("Implement CO2 reduction tactics (efficiency, capture, offsets)".to_string());
        }
        if water > 1_200_000.0 {
            recommendations.push("Introduce water recycling and conservation measures".to_string());
        }

        SustainabilityPrediction {
            recyclability_score: round_to(recyclability, 10.0),
            reuse_potential_score: round_to(reuse, 10.0),
            product_life_extension_years: round_to(life, 10.0),
            confidence: round_to(confidence, 100.0),
            recommendations,
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}
