//! Build configuration with documented constants
//!
//! Point costs and the default resource pool live here so the front end and
//! tests agree on them. Everything can be overridden from a TOML file.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{BuildError, Result};
use crate::core::types::ResourceType;
use crate::resources::ResourcePool;

/// Display cost in build points for each sigil type
///
/// Only used for the sigil tree cost readout; selection is gated by
/// resource counts, never by this total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SigilCostTable {
    costs: AHashMap<ResourceType, u32>,
}

impl SigilCostTable {
    /// Point cost of one sigil of the given type
    pub fn cost(&self, resource: ResourceType) -> u32 {
        self.costs.get(&resource).copied().unwrap_or(0)
    }
}

impl Default for SigilCostTable {
    fn default() -> Self {
        // Rarer sigils cost more; xuth is the apex tier
        let costs = [
            (ResourceType::Kaarn, 3),
            (ResourceType::Purth, 5),
            (ResourceType::Juathas, 8),
            (ResourceType::Xuth, 12),
            (ResourceType::Lekolu, 6),
            (ResourceType::Sinthru, 10),
        ]
        .into_iter()
        .collect();
        Self { costs }
    }
}

/// Configuration for a build session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Point cost per sigil type for the cost readout
    pub sigil_costs: SigilCostTable,

    /// Pool handed to a fresh session before anything upstream adjusts it
    ///
    /// Roughly what the dominion and career sections grant a typical build.
    pub starting_pool: ResourcePool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            sigil_costs: SigilCostTable::default(),
            starting_pool: ResourcePool::new()
                .with(ResourceType::Kaarn, 4)
                .with(ResourceType::Purth, 3)
                .with(ResourceType::Juathas, 2)
                .with(ResourceType::Xuth, 1)
                .with(ResourceType::Lekolu, 2)
                .with(ResourceType::Sinthru, 1),
        }
    }
}

impl BuildConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing sections keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BuildConfig = toml::from_str(content).map_err(|e| BuildError::TomlError {
            origin: "build config".into(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BuildConfig = toml::from_str(&content).map_err(|e| BuildError::TomlError {
            origin: path.display().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        // Every sigil type needs a cost, otherwise the readout silently undercounts
        let missing: Vec<String> = ResourceType::ALL
            .iter()
            .filter(|r| !self.sigil_costs.costs.contains_key(r))
            .map(|r| r.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(BuildError::InvalidConfig(format!(
                "sigil_costs missing entries for: {}",
                missing.join(", ")
            )));
        }

        if self.sigil_costs.costs.values().any(|c| *c == 0) {
            return Err(BuildError::InvalidConfig(
                "sigil costs must be positive".into(),
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<BuildConfig> = OnceLock::new();

/// Get the global build config (initializes with defaults if not set)
pub fn config() -> &'static BuildConfig {
    CONFIG.get_or_init(BuildConfig::default)
}

/// Set the global build config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: BuildConfig) -> std::result::Result<(), BuildConfig> {
    CONFIG.set(config)
}
