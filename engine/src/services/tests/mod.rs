//! Service-specific tests
//!
//! Each service has its own test file; shared fixtures live in `common`.

#[cfg(test)]
mod memory_store;

// Common test utilities for services
#[cfg(test)]
pub mod common {
    use shared::ScenarioSpec;

    /// Reference steel scenario as a JSON document
    pub const STEEL_JSON: &str = r#"{
        "material": { "type": "Steel", "composition": { "Fe": 0.98, "C": 0.02 } },
        "route": { "process": "Primary", "efficiency": 0.85 },
        "energy": {
            "sources": [
                { "type": "grid", "percentage": 60, "carbonIntensity": 0.5 },
                { "type": "solar", "percentage": 40, "carbonIntensity": 0.0 }
            ],
            "renewable": 40
        },
        "transport": { "distance": 100, "method": "truck", "carbonIntensity": 0.1 },
        "endOfLife": { "recyclingRate": 0.75, "disposalMethod": "landfill", "recoveryEfficiency": 0.8 }
    }"#;

    pub fn steel_scenario() -> ScenarioSpec {
        ScenarioSpec::from_json(STEEL_JSON).expect("Valid steel scenario")
    }
}
