//! Generic prerequisite-graph selection engine
//!
//! One instance per blessing. Sigil selection is gated on prerequisites and
//! on the aggregate remaining resources passed in by the caller; deselection
//! cascades through selected dependents and then reconciles powers and
//! auxiliary assignments so the invariants hold after every call.

use std::sync::Arc;

use crate::core::config::SigilCostTable;
use crate::core::error::Result;
use crate::core::types::{BlessingId, CategoryId, SigilId};
use crate::engine::quota::compute_quotas;
use crate::engine::state::{CategorySnapshot, Cleanup, EngineSnapshot, SelectionState, Toggle};
use crate::graph::{
    dependent_closure, validate_definition, BlessingDefinition, PowerDef, PowerNode, SigilDef,
    SigilNode,
};
use crate::resources::ResourceTally;

/// Selection engine bound to one blessing's static content
pub struct SigilGraphEngine<S = SigilNode, P = PowerNode> {
    pub(crate) definition: Arc<BlessingDefinition<S, P>>,
    pub(crate) state: Arc<SelectionState>,
}

impl<S, P> Clone for SigilGraphEngine<S, P> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: SigilDef, P: PowerDef> SigilGraphEngine<S, P> {
    /// Create an empty engine after validating the definition
    pub fn new(definition: Arc<BlessingDefinition<S, P>>) -> Result<Self> {
        validate_definition(definition.as_ref())?;
        Ok(Self {
            definition,
            state: Arc::new(SelectionState::default()),
        })
    }

    pub fn id(&self) -> &BlessingId {
        &self.definition.id
    }

    pub fn definition(&self) -> &BlessingDefinition<S, P> {
        &self.definition
    }

    /// Shared handle to the current state; later operations never change it
    pub fn state(&self) -> Arc<SelectionState> {
        Arc::clone(&self.state)
    }

    /// Drop every selection, boost and assignment
    pub fn reset(&mut self) {
        self.state = Arc::new(SelectionState::default());
    }

    pub fn is_selected(&self, id: &SigilId) -> bool {
        self.state.is_sigil_selected(id)
    }

    /// Whether `select` would add this sigil given the remaining resources
    pub fn can_select(&self, id: &SigilId, available: &ResourceTally) -> bool {
        let Some(sigil) = self.definition.sigil(id) else {
            return false;
        };
        !self.state.sigils.contains(id)
            && sigil
                .prerequisites()
                .iter()
                .all(|p| self.state.sigils.contains(p))
            && !sigil.resource().is_some_and(|r| !available.has_unit(r))
    }

    /// Toggle a sigil
    ///
    /// Selecting needs every prerequisite selected and one unit of the
    /// sigil's resource in `available`. Deselecting removes the sigil and
    /// every selected dependent, then prunes whatever relied on them.
    /// Anything else is a silent no-op.
    pub fn select(&mut self, id: &SigilId, available: &ResourceTally) -> Toggle {
        if self.definition.sigil(id).is_none() {
            tracing::debug!(blessing = %self.id(), sigil = %id, "unknown sigil ignored");
            return Toggle::Ignored;
        }

        if self.state.sigils.contains(id) {
            let closure = dependent_closure(&self.definition.sigils, id, &self.state.sigils);
            let state = Arc::make_mut(&mut self.state);
            state.sigils.retain(|s| !closure.contains(s));

            let mut cleanup = Cleanup {
                sigils: self
                    .definition
                    .sigils
                    .iter()
                    .map(|s| s.id())
                    .filter(|s| closure.contains(*s))
                    .cloned()
                    .collect(),
                ..Cleanup::default()
            };
            self.reconcile(&mut cleanup);
            tracing::debug!(
                blessing = %self.id(),
                sigil = %id,
                removed = ?cleanup.sigils,
                pruned = cleanup.powers.len(),
                "cascade deselect"
            );
            return Toggle::Off(cleanup);
        }

        if !self.can_select(id, available) {
            tracing::debug!(blessing = %self.id(), sigil = %id, "sigil not selectable");
            return Toggle::Ignored;
        }

        Arc::make_mut(&mut self.state).sigils.insert(id.clone());
        tracing::debug!(blessing = %self.id(), sigil = %id, "sigil selected");
        Toggle::On
    }

    /// Restore the power and auxiliary invariants after sigils or boosts
    /// were removed
    ///
    /// Order matters: requirement pruning first, then quota trimming (latest
    /// picks go first), then auxiliaries whose owner power is gone.
    pub(crate) fn reconcile(&mut self, cleanup: &mut Cleanup) {
        let def: &BlessingDefinition<S, P> = &self.definition;
        let state = Arc::make_mut(&mut self.state);

        for category in &def.categories {
            let Some(picked) = state.powers.get_mut(&category.id) else {
                continue;
            };
            picked.retain(|power_id| {
                let satisfied = category.power(power_id).is_some_and(|p| {
                    p.requires().iter().all(|s| state.sigils.contains(s))
                });
                if !satisfied {
                    cleanup.powers.push((category.id.clone(), power_id.clone()));
                }
                satisfied
            });
        }

        let quotas = compute_quotas(def, state);
        for category in &def.categories {
            let quota = quotas.get(&category.id).copied().unwrap_or(0) as usize;
            if let Some(picked) = state.powers.get_mut(&category.id) {
                while picked.len() > quota {
                    if let Some(dropped) = picked.pop() {
                        cleanup.powers.push((category.id.clone(), dropped));
                    }
                }
            }
        }
        state.powers.retain(|_, picked| !picked.is_empty());

        for aux in &def.auxiliaries {
            let owner_selected = state
                .powers
                .get(&aux.category)
                .is_some_and(|picked| picked.contains(&aux.owner));
            if !owner_selected && state.auxiliary.remove(&aux.field).is_some() {
                cleanup.auxiliaries.push(aux.field.clone());
            }
        }
    }

    /// Resources consumed by selected sigils and active boosts
    pub fn used_resources(&self) -> ResourceTally {
        let sigils = self
            .definition
            .sigils
            .iter()
            .filter(|s| self.state.sigils.contains(s.id()))
            .filter_map(|s| s.resource());
        let boosts = self
            .definition
            .boosts
            .iter()
            .filter(|b| self.state.boosts.contains(&b.category))
            .map(|b| b.resource);
        sigils.chain(boosts).map(|r| (r, 1)).collect()
    }

    /// Display cost of the selected sigils under the given table
    pub fn sigil_tree_cost(&self, costs: &SigilCostTable) -> u32 {
        self.definition
            .sigils
            .iter()
            .filter(|s| self.state.sigils.contains(s.id()))
            .filter_map(|s| s.resource())
            .map(|r| costs.cost(r))
            .sum()
    }

    /// Selected sigils in definition order
    pub fn selected_sigils(&self) -> Vec<SigilId> {
        self.definition
            .sigils
            .iter()
            .map(|s| s.id())
            .filter(|id| self.state.sigils.contains(*id))
            .cloned()
            .collect()
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self, costs: &SigilCostTable) -> EngineSnapshot {
        let quotas = compute_quotas(self.definition.as_ref(), self.state.as_ref());
        let categories = self
            .definition
            .categories
            .iter()
            .map(|c| CategorySnapshot {
                id: c.id.clone(),
                quota: quotas.get(&c.id).copied().unwrap_or(0),
                selected: self.state.selected_powers(&c.id).to_vec(),
                boosted: self.state.is_boosted(&c.id),
            })
            .collect();

        EngineSnapshot {
            blessing: self.id().clone(),
            selected_sigils: self.selected_sigils(),
            categories,
            used_resources: self.used_resources(),
            sigil_tree_cost: self.sigil_tree_cost(costs),
            auxiliary: self
                .state
                .auxiliary
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    pub(crate) fn has_category(&self, category: &CategoryId) -> bool {
        self.definition.category(category).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PowerId, ResourceType};
    use crate::graph::BlessingDefinition;

    fn engine(content: &str) -> SigilGraphEngine {
        let def: BlessingDefinition = toml::from_str(content).unwrap();
        SigilGraphEngine::new(Arc::new(def)).unwrap()
    }

    fn plenty() -> ResourceTally {
        ResourceType::ALL.into_iter().map(|r| (r, 10)).collect()
    }

    const CHAIN: &str = r#"
id = "chain"
name = "Chain"

[[sigils]]
id = "a"
name = "A"
resource = "kaarn"
benefits = [{ category = "gifts", amount = 2 }]

[[sigils]]
id = "b"
name = "B"
resource = "purth"
prerequisites = ["a"]
benefits = [{ category = "gifts", amount = 1 }]

[[sigils]]
id = "c"
name = "C"
prerequisites = ["b"]

[[sigils]]
id = "side"
name = "Side"
resource = "kaarn"
prerequisites = ["a"]

[[sigils]]
id = "free"
name = "Free"

[[categories]]
id = "gifts"
name = "Gifts"
powers = [
    { id = "g1", name = "G1" },
    { id = "g2", name = "G2" },
    { id = "g3", name = "G3", requires = ["b"] },
]
"#;

    #[test]
    fn test_select_requires_prerequisites() {
        let mut e = engine(CHAIN);
        assert!(e.select(&"b".into(), &plenty()).is_ignored());
        assert_eq!(e.select(&"a".into(), &plenty()), Toggle::On);
        assert_eq!(e.select(&"b".into(), &plenty()), Toggle::On);
        assert!(e.is_selected(&"b".into()));
    }

    #[test]
    fn test_select_requires_resource_unit() {
        let mut e = engine(CHAIN);
        let no_kaarn: ResourceTally = [(ResourceType::Purth, 1)].into_iter().collect();
        assert!(e.select(&"a".into(), &no_kaarn).is_ignored());
        // Resource-free sigils never need a unit
        assert_eq!(e.select(&"free".into(), &ResourceTally::new()), Toggle::On);
    }

    #[test]
    fn test_cascade_removes_only_dependents() {
        let mut e = engine(CHAIN);
        for id in ["a", "b", "c", "side", "free"] {
            assert_eq!(e.select(&id.into(), &plenty()), Toggle::On);
        }

        let Toggle::Off(cleanup) = e.select(&"b".into(), &plenty()) else {
            panic!("expected deselect");
        };
        assert_eq!(cleanup.sigils, vec![SigilId::from("b"), SigilId::from("c")]);
        assert_eq!(
            e.selected_sigils(),
            vec![SigilId::from("a"), SigilId::from("side"), SigilId::from("free")]
        );
    }

    #[test]
    fn test_cascade_prunes_powers_needing_removed_sigils() {
        let mut e = engine(CHAIN);
        e.select(&"a".into(), &plenty());
        e.select(&"b".into(), &plenty());
        e.select_power(&"gifts".into(), &"g3".into());
        e.select_power(&"gifts".into(), &"g1".into());

        let Toggle::Off(cleanup) = e.select(&"b".into(), &plenty()) else {
            panic!("expected deselect");
        };
        assert_eq!(
            cleanup.powers,
            vec![(CategoryId::from("gifts"), PowerId::from("g3"))]
        );
        assert_eq!(
            e.state().selected_powers(&"gifts".into()).to_vec(),
            vec![PowerId::from("g1")]
        );
    }

    #[test]
    fn test_cascade_trims_to_reduced_quota() {
        let mut e = engine(CHAIN);
        e.select(&"a".into(), &plenty());
        e.select(&"b".into(), &plenty());
        for p in ["g1", "g2", "g3"] {
            assert_eq!(e.select_power(&"gifts".into(), &p.into()), Toggle::On);
        }

        // Dropping a removes b too; quota goes to zero
        e.select(&"a".into(), &plenty());
        assert!(e.state().selected_powers(&"gifts".into()).is_empty());
        assert!(e.state().is_empty());
    }

    #[test]
    fn test_used_resources_and_cost() {
        let mut e = engine(CHAIN);
        for id in ["a", "b", "side", "free"] {
            e.select(&id.into(), &plenty());
        }
        let used = e.used_resources();
        assert_eq!(used.get(ResourceType::Kaarn), 2);
        assert_eq!(used.get(ResourceType::Purth), 1);
        assert_eq!(used.total(), 3);

        // 3 + 5 + 3 under the default table
        assert_eq!(e.sigil_tree_cost(&SigilCostTable::default()), 11);
    }

    #[test]
    fn test_state_handles_are_copy_on_write() {
        let mut e = engine(CHAIN);
        let before = e.state();
        e.select(&"a".into(), &plenty());
        assert!(before.is_empty());
        assert!(e.state().is_sigil_selected(&"a".into()));
    }

    #[test]
    fn test_unknown_sigil_ignored() {
        let mut e = engine(CHAIN);
        assert!(e.select(&"nope".into(), &plenty()).is_ignored());
        assert!(!e.can_select(&"nope".into(), &plenty()));
    }

    #[test]
    fn test_snapshot_reports_quota() {
        let mut e = engine(CHAIN);
        e.select(&"a".into(), &plenty());
        let snap = e.snapshot(&SigilCostTable::default());
        assert_eq!(snap.selected_sigils, vec![SigilId::from("a")]);
        assert_eq!(snap.categories[0].quota, 2);
        assert_eq!(snap.sigil_tree_cost, 3);
    }
}
