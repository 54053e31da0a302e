//! Category quota accumulation
//!
//! A category's quota is the sum of its benefits over the selected sigils,
//! plus the bonus of its boost while active. Sigils are visited in
//! definition order and each sigil's benefits in declaration order; the
//! choose-two rule depends on that order.

use ahash::{AHashMap, AHashSet};

use crate::core::types::CategoryId;
use crate::engine::state::SelectionState;
use crate::graph::{Benefit, BenefitRule, BlessingDefinition, SigilDef};

/// Fold one sigil's benefits into the running totals
pub fn accumulate(totals: &mut AHashMap<CategoryId, u32>, benefits: &[Benefit], rule: BenefitRule) {
    for benefit in benefits.iter().filter(|b| b.amount > 0) {
        let current = totals.get(&benefit.category).copied().unwrap_or(0);
        if rule == BenefitRule::ChooseTwo && current == 0 {
            let opened: AHashSet<&CategoryId> = benefits
                .iter()
                .map(|b| &b.category)
                .filter(|c| totals.get(*c).copied().unwrap_or(0) > 0)
                .collect();
            if opened.len() >= 2 {
                tracing::trace!(category = %benefit.category, "choose-two: category closed");
                continue;
            }
        }
        *totals.entry(benefit.category.clone()).or_insert(0) += benefit.amount;
    }
}

/// Quota of every category with a non-zero allowance
pub fn compute_quotas<S: SigilDef, P>(
    def: &BlessingDefinition<S, P>,
    state: &SelectionState,
) -> AHashMap<CategoryId, u32> {
    let mut totals = AHashMap::new();
    for sigil in def.sigils.iter().filter(|s| state.sigils.contains(s.id())) {
        accumulate(&mut totals, sigil.benefits(), sigil.benefit_rule());
    }
    for boost in def.boosts.iter().filter(|b| state.boosts.contains(&b.category)) {
        *totals.entry(boost.category.clone()).or_insert(0) += boost.bonus;
    }
    tracing::trace!(blessing = %def.id, ?totals, "quotas recomputed");
    totals
}
