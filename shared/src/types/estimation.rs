//! Statistical estimation records

use serde::{Deserialize, Serialize};

/// Request to estimate values for fields missing from a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EstimationRequest {
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub process: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub technology_level: Option<String>,
    #[serde(default)]
    pub missing_fields: Vec<String>,
}

impl EstimationRequest {
    pub fn new(material: impl Into<String>, process: impl Into<String>) -> Self {
        Self {
            material: Some(material.into()),
            process: Some(process.into()),
            region: None,
            technology_level: None,
            missing_fields: Vec::new(),
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_technology_level(mut self, level: impl Into<String>) -> Self {
        self.technology_level = Some(level.into());
        self
    }
}

/// Distribution estimate for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub field: String,
    pub mean: f64,
    pub p05: f64,
    pub p50: f64,
    pub p95: f64,
    pub confidence: f64,
    pub drivers: Vec<String>,
    pub provenance: String,
}
