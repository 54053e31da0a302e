pub mod config;
pub mod error;
pub mod types;

pub use config::{BuildConfig, SigilCostTable};
pub use error::{BuildError, Result};
pub use types::{AuxField, BlessingId, CategoryId, PowerId, ResourceType, SigilId};
