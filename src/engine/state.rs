//! Per-blessing mutable selection state and the snapshots built from it

use ahash::{AHashMap, AHashSet};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::types::{AuxField, BlessingId, CategoryId, PowerId, SigilId};
use crate::resources::ResourceTally;

/// Everything a user has picked inside one blessing
///
/// Only the engine mutates this, through `Arc::make_mut`, so a handle taken
/// before an operation keeps describing the state from before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub(crate) sigils: AHashSet<SigilId>,
    /// Selected powers per category, in pick order
    pub(crate) powers: AHashMap<CategoryId, Vec<PowerId>>,
    pub(crate) boosts: AHashSet<CategoryId>,
    pub(crate) auxiliary: AHashMap<AuxField, String>,
}

impl SelectionState {
    pub fn is_sigil_selected(&self, id: &SigilId) -> bool {
        self.sigils.contains(id)
    }

    /// Powers picked in a category, oldest first
    pub fn selected_powers(&self, category: &CategoryId) -> &[PowerId] {
        self.powers.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_power_selected(&self, category: &CategoryId, power: &PowerId) -> bool {
        self.selected_powers(category).contains(power)
    }

    pub fn is_boosted(&self, category: &CategoryId) -> bool {
        self.boosts.contains(category)
    }

    pub fn auxiliary(&self, field: &AuxField) -> Option<&str> {
        self.auxiliary.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sigils.is_empty()
            && self.powers.values().all(Vec::is_empty)
            && self.boosts.is_empty()
            && self.auxiliary.is_empty()
    }
}

/// What an operation removed as a side effect (and the target itself, if it
/// was turned off)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cleanup {
    pub sigils: Vec<SigilId>,
    pub powers: Vec<(CategoryId, PowerId)>,
    pub auxiliaries: Vec<AuxField>,
}

impl Cleanup {
    pub fn is_empty(&self) -> bool {
        self.sigils.is_empty() && self.powers.is_empty() && self.auxiliaries.is_empty()
    }
}

/// Result of a toggle-style operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Toggle {
    On,
    Off(Cleanup),
    /// Rejected or unknown target; state is untouched
    Ignored,
}

impl Toggle {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Toggle::Ignored)
    }
}

/// Read-only view of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySnapshot {
    pub id: CategoryId,
    pub quota: u32,
    pub selected: Vec<PowerId>,
    pub boosted: bool,
}

/// Read-only view of one blessing, recomputed after each mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    pub blessing: BlessingId,
    /// Selected sigils in definition order
    pub selected_sigils: Vec<SigilId>,
    pub categories: Vec<CategorySnapshot>,
    pub used_resources: ResourceTally,
    pub sigil_tree_cost: u32,
    pub auxiliary: BTreeMap<AuxField, String>,
}
