use crate::domain::{ComputeResult, GridError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CENTERS_FILE: &str = "centers.txt";
pub const DEFAULT_RESULTS_FILE: &str = "I_line_values_without_reversing.txt";
pub const DEFAULT_WORKERS: usize = 40;
pub const DEFAULT_HDEN_FLOOR: f64 = -10.0;
pub const DEFAULT_REDSHIFT: f64 = 3.0;
pub const DEFAULT_COSMIC_RAY_BACKGROUND: f64 = 1.0;
pub const DEFAULT_RESTART_THRESHOLD: f64 = 0.0;

/// Tunables shared by the three grid commands. Every field has a default,
/// so a JSON config only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub centers_file: String,
    pub skip_rows: usize,
    pub workers: usize,
    pub hden_floor: f64,
    pub redshift: f64,
    pub cosmic_ray_background: f64,
    pub restart_threshold: f64,
    pub results_file: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            centers_file: DEFAULT_CENTERS_FILE.to_string(),
            skip_rows: 0,
            workers: DEFAULT_WORKERS,
            hden_floor: DEFAULT_HDEN_FLOOR,
            redshift: DEFAULT_REDSHIFT,
            cosmic_ray_background: DEFAULT_COSMIC_RAY_BACKGROUND,
            restart_threshold: DEFAULT_RESTART_THRESHOLD,
            results_file: DEFAULT_RESULTS_FILE.to_string(),
        }
    }
}

impl GridConfig {
    pub fn load(path: &Path) -> ComputeResult<Self> {
        let source = fs::read_to_string(path).map_err(|source| {
            GridError::io_system(
                "IO.CONFIG_READ",
                format!("failed to read grid config '{}': {}", path.display(), source),
            )
        })?;
        let config: Self = serde_json::from_str(&source).map_err(|source| {
            GridError::input_validation(
                "INPUT.CONFIG_PARSE",
                format!("failed to parse grid config '{}': {}", path.display(), source),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ComputeResult<()> {
        if self.workers == 0 {
            return Err(GridError::input_validation(
                "INPUT.CONFIG_WORKERS",
                "worker count must be at least 1",
            ));
        }

        let finite_fields = [
            ("hdenFloor", self.hden_floor),
            ("redshift", self.redshift),
            ("cosmicRayBackground", self.cosmic_ray_background),
            ("restartThreshold", self.restart_threshold),
        ];
        for (field, value) in finite_fields {
            if !value.is_finite() {
                return Err(GridError::input_validation(
                    "INPUT.CONFIG_VALUE",
                    format!("config field '{}' must be finite, got {}", field, value),
                ));
            }
        }

        Ok(())
    }
}
