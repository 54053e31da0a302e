//! Dependent power selection and auxiliary assignments

use std::sync::Arc;

use crate::core::types::{AuxField, CategoryId, PowerId};
use crate::engine::quota::compute_quotas;
use crate::engine::selector::SigilGraphEngine;
use crate::engine::state::{Cleanup, Toggle};
use crate::graph::{PowerDef, SigilDef};

impl<S: SigilDef, P: PowerDef> SigilGraphEngine<S, P> {
    /// Current quota of a category (0 for unknown categories)
    pub fn quota(&self, category: &CategoryId) -> u32 {
        compute_quotas(self.definition.as_ref(), self.state.as_ref())
            .get(category)
            .copied()
            .unwrap_or(0)
    }

    pub fn selected_powers(&self, category: &CategoryId) -> &[PowerId] {
        self.state.selected_powers(category)
    }

    /// Whether `select_power` would add this power right now
    pub fn can_select_power(&self, category: &CategoryId, power: &PowerId) -> bool {
        let Some(def) = self
            .definition
            .category(category)
            .and_then(|c| c.power(power))
        else {
            return false;
        };
        let picked = self.state.selected_powers(category);
        !picked.contains(power)
            && (picked.len() as u32) < self.quota(category)
            && def.requires().iter().all(|s| self.state.sigils.contains(s))
    }

    /// Toggle a power
    ///
    /// Removal is always allowed and clears any auxiliary field the power
    /// owns. Adding needs a free quota slot and every required sigil.
    pub fn select_power(&mut self, category: &CategoryId, power: &PowerId) -> Toggle {
        if self.state.is_power_selected(category, power) {
            let state = Arc::make_mut(&mut self.state);
            if let Some(picked) = state.powers.get_mut(category) {
                picked.retain(|p| p != power);
                if picked.is_empty() {
                    state.powers.remove(category);
                }
            }
            let mut cleanup = Cleanup {
                powers: vec![(category.clone(), power.clone())],
                ..Cleanup::default()
            };
            self.reconcile(&mut cleanup);
            tracing::debug!(blessing = %self.id(), %category, %power, "power deselected");
            return Toggle::Off(cleanup);
        }

        if !self.can_select_power(category, power) {
            tracing::debug!(
                blessing = %self.id(),
                %category,
                %power,
                quota = self.quota(category),
                "power not selectable"
            );
            return Toggle::Ignored;
        }

        Arc::make_mut(&mut self.state)
            .powers
            .entry(category.clone())
            .or_default()
            .push(power.clone());
        tracing::debug!(blessing = %self.id(), %category, %power, "power selected");
        Toggle::On
    }

    pub fn auxiliary(&self, field: &AuxField) -> Option<&str> {
        self.state.auxiliary(field)
    }

    /// Assign a blessing-specific field such as a companion's name
    ///
    /// Only checks that the owning power is currently selected. Returns
    /// false (and changes nothing) otherwise.
    pub fn assign_auxiliary(&mut self, field: &AuxField, value: impl Into<String>) -> bool {
        let Some(aux) = self.definition.auxiliary(field) else {
            tracing::debug!(blessing = %self.id(), %field, "unknown auxiliary field");
            return false;
        };
        if !self.state.is_power_selected(&aux.category, &aux.owner) {
            tracing::debug!(
                blessing = %self.id(),
                %field,
                owner = %aux.owner,
                "owner power not selected"
            );
            return false;
        }
        let value = value.into();
        tracing::debug!(blessing = %self.id(), %field, %value, "auxiliary assigned");
        Arc::make_mut(&mut self.state)
            .auxiliary
            .insert(field.clone(), value);
        true
    }
}
