//! Static sigil graphs and the checks that keep them well-formed

pub mod closure;
pub mod definition;
pub mod validation;

pub use closure::dependent_closure;
pub use definition::{
    AuxiliaryDef, Benefit, BenefitRule, BlessingDefinition, BoostDef, PowerCategory, PowerDef,
    PowerNode, SigilDef, SigilNode,
};
pub use validation::{topological_order, validate_definition};
