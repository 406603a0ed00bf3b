//! Configuration structures for extraction and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for fisa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FisaConfig {
    /// Curriculum plan configuration.
    pub plan: PlanConfig,

    /// Validation rule configuration.
    pub validation: ValidationConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Where the reference curriculum plan lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Path to the plan JSON file.
    pub path: PathBuf,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("plan_invatamant.json"),
        }
    }
}

/// Tunables for the validation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Name similarity at or above which names match (0.0 - 1.0).
    pub ok_threshold: f64,

    /// Name similarity at or above which a mismatch is only a warning.
    pub warning_threshold: f64,

    /// Workload hours per credit.
    pub hours_per_credit: u32,

    /// Minimum accepted examination hours.
    pub exam_hours_min: u32,

    /// Maximum accepted examination hours.
    pub exam_hours_max: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            ok_threshold: 0.95,
            warning_threshold: 0.85,
            hours_per_credit: 25,
            exam_hours_min: 2,
            exam_hours_max: 3,
        }
    }
}

impl ValidationConfig {
    /// Check that thresholds and bounds are consistent.
    pub fn check(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.ok_threshold) || !(0.0..=1.0).contains(&self.warning_threshold) {
            return Err("similarity thresholds must be between 0 and 1".to_string());
        }
        if self.warning_threshold > self.ok_threshold {
            return Err(format!(
                "warning_threshold ({}) must not exceed ok_threshold ({})",
                self.warning_threshold, self.ok_threshold
            ));
        }
        if self.exam_hours_min > self.exam_hours_max {
            return Err(format!(
                "exam_hours_min ({}) must not exceed exam_hours_max ({})",
                self.exam_hours_min, self.exam_hours_max
            ));
        }
        Ok(())
    }
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl FisaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        config
            .validation
            .check()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
