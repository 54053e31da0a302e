//! Character build - every blessing engine plus the shared resource pool
//!
//! Blessings never talk to each other. The build sums their usage, takes it
//! away from the pool, and hands the remainder to whichever engine is being
//! asked to spend something.

use crate::blessings::BlessingCatalog;
use crate::core::config::SigilCostTable;
use crate::core::error::Result;
use crate::core::types::{AuxField, BlessingId, CategoryId, PowerId, ResourceType, SigilId};
use crate::engine::{EngineSnapshot, SigilGraphEngine, Toggle};
use crate::resources::{compute_totals, ResourcePool, ResourceTally};

/// One session's worth of blessing selections
pub struct CharacterBuild {
    catalog: BlessingCatalog,
    engines: Vec<SigilGraphEngine>,
    pool: ResourcePool,
}

impl CharacterBuild {
    /// Empty build over every blessing in the catalog
    pub fn new(catalog: BlessingCatalog, pool: ResourcePool) -> Result<Self> {
        let engines = catalog
            .ids()
            .map(|id| catalog.engine(id))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            catalog,
            engines,
            pool,
        })
    }

    /// Build over the ten built-in blessings
    pub fn with_builtin(pool: ResourcePool) -> Result<Self> {
        Self::new(BlessingCatalog::builtin()?, pool)
    }

    pub fn catalog(&self) -> &BlessingCatalog {
        &self.catalog
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Replace the pool after an upstream section changed it
    ///
    /// Existing selections are kept even if the new pool no longer covers
    /// them; `is_overdrawn` reports that case.
    pub fn set_pool(&mut self, pool: ResourcePool) {
        if pool.is_overdrawn(&self.totals()) {
            tracing::warn!("Resource pool shrank below what the build already uses");
        }
        self.pool = pool;
    }

    pub fn set_pool_count(&mut self, resource: ResourceType, amount: u32) {
        let mut pool = self.pool.clone();
        pool.set(resource, amount);
        self.set_pool(pool);
    }

    pub fn engine(&self, blessing: &BlessingId) -> Option<&SigilGraphEngine> {
        self.engines.iter().find(|e| e.id() == blessing)
    }

    pub fn engines(&self) -> impl Iterator<Item = &SigilGraphEngine> {
        self.engines.iter()
    }

    /// Used resources summed over every blessing
    pub fn totals(&self) -> ResourceTally {
        let tallies: Vec<ResourceTally> = self.engines.iter().map(|e| e.used_resources()).collect();
        compute_totals(&tallies)
    }

    /// Pool minus totals - what gated operations may still spend
    pub fn remaining(&self) -> ResourceTally {
        self.pool.remaining(&self.totals())
    }

    pub fn is_overdrawn(&self) -> bool {
        self.pool.is_overdrawn(&self.totals())
    }

    /// Sigil tree cost of every blessing together (display only)
    pub fn total_sigil_cost(&self, costs: &SigilCostTable) -> u32 {
        self.engines.iter().map(|e| e.sigil_tree_cost(costs)).sum()
    }

    fn engine_mut(&mut self, blessing: &BlessingId) -> Option<&mut SigilGraphEngine> {
        let found = self.engines.iter_mut().find(|e| e.id() == blessing);
        if found.is_none() {
            tracing::debug!(%blessing, "unknown blessing ignored");
        }
        found
    }

    pub fn select(&mut self, blessing: &BlessingId, sigil: &SigilId) -> Toggle {
        let available = self.remaining();
        match self.engine_mut(blessing) {
            Some(engine) => engine.select(sigil, &available),
            None => Toggle::Ignored,
        }
    }

    pub fn select_power(
        &mut self,
        blessing: &BlessingId,
        category: &CategoryId,
        power: &PowerId,
    ) -> Toggle {
        match self.engine_mut(blessing) {
            Some(engine) => engine.select_power(category, power),
            None => Toggle::Ignored,
        }
    }

    pub fn toggle_boost(&mut self, blessing: &BlessingId, category: &CategoryId) -> Toggle {
        let available = self.remaining();
        match self.engine_mut(blessing) {
            Some(engine) => engine.toggle_boost(category, &available),
            None => Toggle::Ignored,
        }
    }

    pub fn assign_auxiliary(
        &mut self,
        blessing: &BlessingId,
        field: &AuxField,
        value: impl Into<String>,
    ) -> bool {
        match self.engine_mut(blessing) {
            Some(engine) => engine.assign_auxiliary(field, value),
            None => false,
        }
    }

    pub fn can_select(&self, blessing: &BlessingId, sigil: &SigilId) -> bool {
        let available = self.remaining();
        self.engine(blessing)
            .is_some_and(|e| e.can_select(sigil, &available))
    }

    pub fn can_toggle_boost(&self, blessing: &BlessingId, category: &CategoryId) -> bool {
        let available = self.remaining();
        self.engine(blessing)
            .is_some_and(|e| e.can_toggle_boost(category, &available))
    }

    pub fn snapshot(&self, blessing: &BlessingId, costs: &SigilCostTable) -> Option<EngineSnapshot> {
        self.engine(blessing).map(|e| e.snapshot(costs))
    }

    /// Clear every blessing
    pub fn reset(&mut self) {
        for engine in &mut self.engines {
            engine.reset();
        }
    }

    /// Whether the blessing has a category by this id
    pub fn has_category(&self, blessing: &BlessingId, category: &CategoryId) -> bool {
        self.engine(blessing).is_some_and(|e| e.has_category(category))
    }
}
