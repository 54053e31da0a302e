//! Prerequisite-graph selection engine
//!
//! A blessing is a small DAG of sigils. Picking sigils spends typed resource
//! units and opens quota in power categories; boosts spend one more unit for
//! extra quota. Removing anything prunes whatever depended on it, so a
//! blessing can never be observed with a dangling pick.

mod boost;
mod powers;
pub mod quota;
pub mod selector;
pub mod state;

pub use quota::compute_quotas;
pub use selector::SigilGraphEngine;
pub use state::{CategorySnapshot, Cleanup, EngineSnapshot, SelectionState, Toggle};
