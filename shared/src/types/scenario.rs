//! Scenario input records
//!
//! A scenario describes one material production chain: the material, the
//! process route, the energy mix feeding it, transport, and end-of-life
//! handling. Records are validated once at the boundary and then passed by
//! value through the engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{SharedError, SharedResult};

/// Allowed deviation of the energy mix percentages from 100
pub const ENERGY_MIX_TOLERANCE: f64 = 0.5;

/// Complete scenario specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScenarioSpec {
    pub material: Material,
    pub route: ProductionRoute,
    pub energy: EnergyMix,
    pub transport: Transport,
    pub end_of_life: EndOfLife,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Material {
    #[serde(rename = "type")]
    pub material_type: String,
    #[serde(default)]
    pub composition: HashMap<String, f64>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductionRoute {
    pub process: String,
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
    /// Process efficiency in [0, 1]
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnergyMix {
    pub sources: Vec<EnergySource>,
    /// Renewable share in percent
    pub renewable: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnergySource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub percentage: f64,
    pub carbon_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Transport {
    /// Distance in km
    pub distance: f64,
    pub method: String,
    pub carbon_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EndOfLife {
    pub recycling_rate: f64,
    pub disposal_method: String,
    pub recovery_efficiency: f64,
}

impl ScenarioSpec {
    /// Check every field against its documented range
    pub fn validate(&self) -> SharedResult<()> {
        require_text("material.type", &self.material.material_type)?;
        for (component, share) in &self.material.composition {
            require_min(&format!("material.composition.{component}"), *share, 0.0)?;
        }

        require_text("route.process", &self.route.process)?;
        require_range("route.efficiency", self.route.efficiency, 0.0, 1.0)?;

        self.energy.validate()?;

        require_min("transport.distance", self.transport.distance, 0.0)?;
        require_min("transport.carbonIntensity", self.transport.carbon_intensity, 0.0)?;

        require_range("endOfLife.recyclingRate", self.end_of_life.recycling_rate, 0.0, 1.0)?;
        require_range(
            "endOfLife.recoveryEfficiency",
            self.end_of_life.recovery_efficiency,
            0.0,
            1.0,
        )?;

        Ok(())
    }

    /// Parse and validate a scenario from its JSON form
    pub fn from_json(raw: &str) -> SharedResult<Self> {
        let spec: ScenarioSpec = serde_json::from_str(raw).map_err(|e| SharedError::DeserializationError {
            message: e.to_string(),
        })?;
        spec.validate()?;
        Ok(spec)
    }
}

impl EnergyMix {
    fn validate(&self) -> SharedResult<()> {
        require_range("energy.renewable", self.renewable, 0.0, 100.0)?;

        if self.sources.is_empty() {
            return Err(SharedError::invalid("energy.sources", "at least one source is required"));
        }

        for (index, source) in self.sources.iter().enumerate() {
            require_text(&format!("energy.sources[{index}].type"), &source.source_type)?;
            require_range(&format!("energy.sources[{index}].percentage"), source.percentage, 0.0, 100.0)?;
            require_min(
                &format!("energy.sources[{index}].carbonIntensity"),
                source.carbon_intensity,
                0.0,
            )?;
        }

        let total = self.total_percentage();
        if (total - 100.0).abs() > ENERGY_MIX_TOLERANCE {
            return Err(SharedError::invalid(
                "energy.sources",
                format!("percentages sum to {total:.2}, expected 100"),
            ));
        }

        Ok(())
    }

    /// Sum of all source percentages
    pub fn total_percentage(&self) -> f64 {
        self.sources.iter().map(|s| s.percentage).sum()
    }

    /// Percentage-weighted carbon intensity of the mix
    pub fn weighted_carbon_intensity(&self) -> f64 {
        self.sources
            .iter()
            .map(|s| s.carbon_intensity * s.percentage / 100.0)
            .sum()
    }
}

fn require_text(field: &str, value: &str) -> SharedResult<()> {
    if value.trim().is_empty() {
        return Err(SharedError::invalid(field, "must not be empty"));
    }
    Ok(())
}

fn require_min(field: &str, value: f64, min: f64) -> SharedResult<()> {
    if !value.is_finite() {
        return Err(SharedError::invalid(field, "must be a finite number"));
    }
    if value < min {
        return Err(SharedError::invalid(field, format!("{value} is below {min}")));
    }
    Ok(())
}

fn require_range(field: &str, value: f64, min: f64, max: f64) -> SharedResult<()> {
    require_min(field, value, min)?;
    if value > max {
        return Err(SharedError::invalid(field, format!("{value} is above {max}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steel() -> ScenarioSpec {
        ScenarioSpec {
            material: Material {
                material_type: "Steel".to_string(),
                composition: HashMap::from([("iron".to_string(), 0.98)]),
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
    fn test_valid_scenario_passes() {
        assert!(steel().validate().is_ok());
    }

    #[test]
    fn test_energy_mix_must_sum_to_100() {
        let mut spec = steel();
        spec.energy.sources[0].percentage = 80.0;
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("energy.sources"));

        // Within tolerance is accepted
        spec.energy.sources[0].percentage = 99.8;
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut spec = steel();
        spec.route.efficiency = 1.2;
        assert!(spec.validate().is_err());

        let mut spec = steel();
        spec.transport.distance = -1.0;
        assert!(spec.validate().is_err());

        let mut spec = steel();
        spec.end_of_life.recycling_rate = f64::NAN;
        assert!(spec.validate().is_err());

        let mut spec = steel();
        spec.energy.sources.clear();
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let json = r#"{
            "material": {"type": "Steel", "colour": "grey"},
            "route": {"process": "Primary", "efficiency": 0.85},
            "energy": {"sources": [{"type": "grid", "percentage": 100, "carbonIntensity": 0.5}], "renewable": 40},
            "transport": {"distance": 100, "method": "truck", "carbonIntensity": 0.1},
            "endOfLife": {"recyclingRate": 0.75, "disposalMethod": "landfill", "recoveryEfficiency": 0.8}
        }"#;
        assert!(ScenarioSpec::from_json(json).is_err());
    }

    #[test]
    fn test_json_round_trip_uses_camel_case() {
        let json = serde_json::to_value(steel()).unwrap();
        assert_eq!(json["endOfLife"]["recyclingRate"], 0.75);
        assert_eq!(json["material"]["type"], "Steel");
        assert_eq!(json["energy"]["sources"][0]["carbonIntensity"], 0.5);
    }

    #[test]
    fn test_weighted_carbon_intensity() {
        let mut spec = steel();
        spec.energy.sources = vec![
            EnergySource { source_type: "grid".into(), percentage: 60.0, carbon_intensity: 0.5 },
            EnergySource { source_type: "solar".into(), percentage: 40.0, carbon_intensity: 0.05 },
        ];
        let intensity = spec.energy.weighted_carbon_intensity();
        assert!((intensity - 0.32).abs() < 1e-9);
    }
}
