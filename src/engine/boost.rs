//! Boost toggles - one resource unit buys extra quota for a category

use std::sync::Arc;

use crate::core::types::CategoryId;
use crate::engine::selector::SigilGraphEngine;
use crate::engine::state::{Cleanup, Toggle};
use crate::graph::{PowerDef, SigilDef};
use crate::resources::ResourceTally;

impl<S: SigilDef, P: PowerDef> SigilGraphEngine<S, P> {
    pub fn is_boosted(&self, category: &CategoryId) -> bool {
        self.state.is_boosted(category)
    }

    /// Whether `toggle_boost` would change anything
    ///
    /// Turning off is always possible; turning on needs one unit of the
    /// boost's resource left across the whole build.
    pub fn can_toggle_boost(&self, category: &CategoryId, available: &ResourceTally) -> bool {
        match self.definition.boost(category) {
            Some(_) if self.state.is_boosted(category) => true,
            Some(boost) => available.has_unit(boost.resource),
            None => false,
        }
    }

    /// Toggle the boost on a category
    ///
    /// Turning off clears the auxiliary fields the boost justified and trims
    /// the category back to its unboosted quota. A cleared field is not
    /// restored when the boost comes back on.
    pub fn toggle_boost(&mut self, category: &CategoryId, available: &ResourceTally) -> Toggle {
        let Some(boost) = self.definition.boost(category) else {
            tracing::debug!(blessing = %self.id(), %category, "no boost for category");
            return Toggle::Ignored;
        };

        if self.state.is_boosted(category) {
            let clears = boost.clears.clone();
            let state = Arc::make_mut(&mut self.state);
            state.boosts.remove(category);

            let mut cleanup = Cleanup::default();
            for field in clears {
                if state.auxiliary.remove(&field).is_some() {
                    cleanup.auxiliaries.push(field);
                }
            }
            self.reconcile(&mut cleanup);
            tracing::debug!(
                blessing = %self.id(),
                %category,
                cleared = ?cleanup.auxiliaries,
                trimmed = cleanup.powers.len(),
                "boost off"
            );
            return Toggle::Off(cleanup);
        }

        if !available.has_unit(boost.resource) {
            tracing::debug!(
                blessing = %self.id(),
                %category,
                resource = %boost.resource,
                "no resource left for boost"
            );
            return Toggle::Ignored;
        }

        Arc::make_mut(&mut self.state).boosts.insert(category.clone());
        tracing::debug!(blessing = %self.id(), %category, "boost on");
        Toggle::On
    }
}
