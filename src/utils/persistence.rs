//! JSON load/save helpers for input files and saved reports.

use crate::core::SimError;
use crate::election::ElectionInput;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read and parse a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, SimError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Save a value as pretty-printed JSON.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), SimError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load regions and portfolios, rejecting portfolios over the pick limit.
pub fn load_input(path: &Path) -> Result<ElectionInput, SimError> {
    let input: ElectionInput = load_json(path)?;
    for portfolio in &input.portfolios {
        portfolio.validate()?;
    }
    Ok(input)
}

/// `<prefix>_YYYYmmdd_HHMMSS.json`
pub fn timestamped_filename(prefix: &str) -> String {
    format!(
        "{}_{}.json",
        prefix,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    )
}
