//! Dependent closure used for cascade deselection

use ahash::AHashSet;
use std::collections::VecDeque;

use crate::core::types::SigilId;
use crate::graph::definition::SigilDef;

/// Every selected sigil that transitively depends on `root`, plus `root`
///
/// Breadth-first over the selected set only; unselected sigils never join
/// the closure even if they list a removed node as a prerequisite.
pub fn dependent_closure<S: SigilDef>(
    sigils: &[S],
    root: &SigilId,
    selected: &AHashSet<SigilId>,
) -> AHashSet<SigilId> {
    let mut closure = AHashSet::new();
    closure.insert(root.clone());

    let mut queue = VecDeque::from([root.clone()]);
    while let Some(current) = queue.pop_front() {
        for sigil in sigils {
            let id = sigil.id();
            if selected.contains(id)
                && !closure.contains(id)
                && sigil.prerequisites().contains(&current)
            {
                closure.insert(id.clone());
                queue.push_back(id.clone());
            }
        }
    }

    closure
}
