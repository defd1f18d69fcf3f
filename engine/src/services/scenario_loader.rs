//! Loads scenario documents from disk

use std::path::Path;
use tokio::fs;

use shared::{process_debug, ProcessId, ScenarioSpec};

use crate::error::EngineResult;

/// Read a JSON scenario file and validate it
pub async fn load_scenario(path: impl AsRef<Path>) -> EngineResult<ScenarioSpec> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).await?;
    let scenario = ScenarioSpec::from_json(&contents)?;

    process_debug!(
        ProcessId::current(),
        "📂 Loaded {} scenario from {}",
        scenario.material.material_type,
        path.display()
    );
    Ok(scenario)
}
