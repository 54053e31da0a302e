//! Sigilcraft - blessing build configurator
//!
//! Each blessing is a prerequisite graph of sigils that spend typed resource
//! units and open quota for powers. One generic engine drives all of them;
//! the build layer shares the resource pool between blessings.

pub mod blessings;
pub mod build;
pub mod core;
pub mod engine;
pub mod graph;
pub mod resources;

pub use blessings::BlessingCatalog;
pub use build::CharacterBuild;
pub use core::{BuildConfig, BuildError, ResourceType};
pub use engine::{SigilGraphEngine, Toggle};
pub use resources::{compute_totals, ResourcePool, ResourceTally};
