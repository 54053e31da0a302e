//! Used-resource counts and their aggregation across blessings

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::AddAssign;

use crate::core::types::ResourceType;

/// Per-type unit counts
///
/// Engines report what their selected sigils and active boosts consume in
/// this form, and `ResourcePool::remaining` hands back what is still
/// spendable in the same shape; gated operations take that remainder as
/// `available`. Missing entries count as zero, so two tallies compare equal
/// whenever every resource type has the same count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceTally {
    counts: AHashMap<ResourceType, u32>,
}

impl ResourceTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units counted for a resource type
    pub fn get(&self, resource: ResourceType) -> u32 {
        self.counts.get(&resource).copied().unwrap_or(0)
    }

    /// Count `amount` more units of a resource type
    pub fn add(&mut self, resource: ResourceType, amount: u32) {
        if amount > 0 {
            *self.counts.entry(resource).or_insert(0) += amount;
        }
    }

    /// Whether at least one unit of `resource` is counted
    pub fn has_unit(&self, resource: ResourceType) -> bool {
        self.get(resource) >= 1
    }

    /// Sum across every resource type
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero entries in `ResourceType::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, u32)> + '_ {
        ResourceType::ALL
            .into_iter()
            .map(|r| (r, self.get(r)))
            .filter(|(_, n)| *n > 0)
    }
}

impl PartialEq for ResourceTally {
    fn eq(&self, other: &Self) -> bool {
        ResourceType::ALL
            .iter()
            .all(|r| self.get(*r) == other.get(*r))
    }
}

impl Eq for ResourceTally {}

impl FromIterator<(ResourceType, u32)> for ResourceTally {
    fn from_iter<I: IntoIterator<Item = (ResourceType, u32)>>(iter: I) -> Self {
        let mut tally = ResourceTally::new();
        for (resource, amount) in iter {
            tally.add(resource, amount);
        }
        tally
    }
}

impl AddAssign<&ResourceTally> for ResourceTally {
    fn add_assign(&mut self, rhs: &ResourceTally) {
        for (resource, amount) in rhs.iter() {
            self.add(resource, amount);
        }
    }
}

impl std::ops::Add for ResourceTally {
    type Output = ResourceTally;

    fn add(mut self, rhs: ResourceTally) -> ResourceTally {
        self += &rhs;
        self
    }
}

impl Sum for ResourceTally {
    fn sum<I: Iterator<Item = ResourceTally>>(iter: I) -> Self {
        iter.fold(ResourceTally::new(), |acc, tally| acc + tally)
    }
}

/// Sum the used-resource tallies of every blessing into one total
///
/// Pure and order-independent; recomputed whenever any blessing changes.
pub fn compute_totals<'a, I>(tallies: I) -> ResourceTally
where
    I: IntoIterator<Item = &'a ResourceTally>,
{
    let mut totals = ResourceTally::new();
    for tally in tallies {
        totals += tally;
    }
    totals
}
