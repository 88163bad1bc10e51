//! Engine configuration
//!
//! Defines the schema for listo.yaml configuration files. The config is
//! constructed once at process start and passed into the evaluators; there
//! is no global state, so tests can substitute alternate rule sets freely.

use crate::checklist::Checklist;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// External checklist document; the bundled checklist is used when unset
    pub checklist_path: Option<PathBuf>,

    /// Consistency checker tuning
    pub consistency: ConsistencyConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `listo.yaml` from a directory, or fall back to defaults
    pub fn load_or_default(dir: &Path) -> Self {
        let config_path = dir.join("listo.yaml");
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a YAML file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the checklist document this configuration points at
    pub fn checklist(&self) -> anyhow::Result<Checklist> {
        match &self.checklist_path {
            Some(path) => Checklist::load(path),
            None => Ok(Checklist::builtin()),
        }
    }
}

/// Tuning knobs for the consistency checker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsistencyConfig {
    /// Unit type codes that admit patients into beds
    pub bed_based_type_codes: Vec<String>,

    /// Unit type codes whose rooms need critical-care amenities
    pub critical_care_type_codes: Vec<String>,

    /// Warn when unavailable resources exceed this percentage
    pub unavailable_percent_threshold: u32,

    /// Skip the unavailable-percentage check below this resource count
    pub unavailable_min_resources: usize,

    /// Skip the wheelchair-access check below this node count
    pub wheelchair_min_nodes: usize,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            bed_based_type_codes: [
                "WARD", "ICU", "HDU", "NICU", "PICU", "CCU", "ER", "EMERGENCY", "IPD",
                "OBSERVATION", "DAYCARE", "BIRTHING", "BURN", "DIALYSIS", "REHAB", "ISOLATION",
            ]
            .map(String::from)
            .to_vec(),
            critical_care_type_codes: ["ICU", "HDU", "NICU", "PICU", "CCU"]
                .map(String::from)
                .to_vec(),
            unavailable_percent_threshold: 30,
            unavailable_min_resources: 5,
            wheelchair_min_nodes: 3,
        }
    }
}

impl ConsistencyConfig {
    /// Whether a unit type code is bed-based (case-insensitive)
    pub fn is_bed_based(&self, type_code: &str) -> bool {
        let upper = type_code.to_uppercase();
        self.bed_based_type_codes.iter().any(|c| *c == upper)
    }

    /// Whether a unit type code is a critical-care type (case-insensitive)
    pub fn is_critical_care(&self, type_code: &str) -> bool {
        let upper = type_code.to_uppercase();
        self.critical_care_type_codes.iter().any(|c| *c == upper)
    }
}
