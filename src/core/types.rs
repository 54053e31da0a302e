//! Core type definitions used throughout the codebase

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The six typed sigil currencies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    #[display(fmt = "kaarn")]
    Kaarn,
    #[display(fmt = "purth")]
    Purth,
    #[display(fmt = "juathas")]
    Juathas,
    #[display(fmt = "xuth")]
    Xuth,
    #[display(fmt = "lekolu")]
    Lekolu,
    #[display(fmt = "sinthru")]
    Sinthru,
}

impl ResourceType {
    /// All resource types, cheapest first
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Kaarn,
        ResourceType::Purth,
        ResourceType::Juathas,
        ResourceType::Xuth,
        ResourceType::Lekolu,
        ResourceType::Sinthru,
    ];
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kaarn" => Ok(ResourceType::Kaarn),
            "purth" => Ok(ResourceType::Purth),
            "juathas" => Ok(ResourceType::Juathas),
            "xuth" => Ok(ResourceType::Xuth),
            "lekolu" => Ok(ResourceType::Lekolu),
            "sinthru" => Ok(ResourceType::Sinthru),
            other => Err(format!("unknown resource type '{}'", other)),
        }
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a node in a blessing's sigil graph
    SigilId
);
string_id!(
    /// Identifier of a power within its category
    PowerId
);
string_id!(
    /// Identifier of a power category (also keys boosts)
    CategoryId
);
string_id!(
    /// Name of a blessing-specific auxiliary assignment (e.g. a companion)
    AuxField
);
string_id!(
    /// Identifier of a blessing
    BlessingId
);
