//! Grade preset management.
//!
//! A preset is a serialized `Adjustments` snapshot. Loading one and
//! handing it to `render` reproduces a grade exactly, LUT and all.

use crate::models::Adjustments;
use std::path::Path;

/// Load a grade preset from a YAML file
pub fn load_grade_preset<P: AsRef<Path>>(path: P) -> Result<Adjustments, String> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read preset file: {}", e))?;

    serde_yaml::from_str(&contents).map_err(|e| format!("Failed to parse preset YAML: {}", e))
}

/// Save a grade preset to a YAML file
pub fn save_grade_preset<P: AsRef<Path>>(preset: &Adjustments, path: P) -> Result<(), String> {
    let path = path.as_ref();
    let yaml =
        serde_yaml::to_string(preset).map_err(|e| format!("Failed to serialize preset: {}", e))?;

    std::fs::write(path, yaml).map_err(|e| format!("Failed to write preset file: {}", e))
}
