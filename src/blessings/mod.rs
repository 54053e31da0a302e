//! Blessing content - the built-in ten and anything loaded from disk

pub mod builtin;
pub mod catalog;

pub use builtin::BUILTIN_BLESSINGS;
pub use catalog::BlessingCatalog;
