//! Resource pool - sigil units available to the whole build

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{BuildError, Result};
use crate::core::types::ResourceType;
use crate::resources::ResourceTally;

/// Units of each sigil type the build may spend
///
/// Produced upstream and handed to the engines as a read-only snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcePool {
    counts: AHashMap<ResourceType, u32>,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper for setting one count
    pub fn with(mut self, resource: ResourceType, amount: u32) -> Self {
        self.set(resource, amount);
        self
    }

    /// Units available of a resource type
    pub fn get(&self, resource: ResourceType) -> u32 {
        self.counts.get(&resource).copied().unwrap_or(0)
    }

    /// Set the available units of a resource type
    pub fn set(&mut self, resource: ResourceType, amount: u32) {
        self.counts.insert(resource, amount);
    }

    /// Units still unspent once `used` has been taken out
    pub fn remaining(&self, used: &ResourceTally) -> ResourceTally {
        ResourceType::ALL
            .into_iter()
            .map(|r| (r, self.get(r).saturating_sub(used.get(r))))
            .collect()
    }

    /// Whether `used` overdraws any resource type
    pub fn is_overdrawn(&self, used: &ResourceTally) -> bool {
        ResourceType::ALL.iter().any(|r| used.get(*r) > self.get(*r))
    }

    /// Parse a pool from `kaarn=2,purth=1` style text
    pub fn parse_spec(spec: &str) -> Result<Self> {
        let mut pool = ResourcePool::new();
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, amount) = entry
                .split_once('=')
                .ok_or_else(|| BuildError::InvalidPool(format!("expected type=count, got '{}'", entry)))?;
            let resource: ResourceType = name.parse().map_err(BuildError::InvalidPool)?;
            let amount: u32 = amount
                .trim()
                .parse()
                .map_err(|e| BuildError::InvalidPool(format!("{}: {}", entry, e)))?;
            pool.set(resource, amount);
        }
        Ok(pool)
    }
}
