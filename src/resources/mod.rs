//! Sigil resources - the shared pool and per-blessing usage tallies

pub mod pool;
pub mod tally;

pub use pool::ResourcePool;
pub use tally::{compute_totals, ResourceTally};
