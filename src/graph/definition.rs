//! Static blessing definitions - sigil graphs, power categories, boosts
//!
//! Definitions are loaded once per session and never mutated. The engine is
//! generic over the `SigilDef` / `PowerDef` traits so alternative content
//! shapes can drive it; `SigilNode` and `PowerNode` are the TOML-backed ones.

use serde::{Deserialize, Serialize};

use crate::core::types::{AuxField, BlessingId, CategoryId, PowerId, ResourceType, SigilId};

/// Quota a sigil grants to one power category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    pub category: CategoryId,
    pub amount: u32,
}

/// How a sigil's benefits are accumulated into quotas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitRule {
    /// Every benefit is added
    #[default]
    Always,
    /// Benefits only open a new category while fewer than two categories
    /// already hold quota (first come, first served)
    ChooseTwo,
}

/// A node in a blessing's prerequisite graph
pub trait SigilDef {
    fn id(&self) -> &SigilId;
    fn prerequisites(&self) -> &[SigilId];
    /// Resource consumed while selected, if any
    fn resource(&self) -> Option<ResourceType>;
    fn benefits(&self) -> &[Benefit];
    fn benefit_rule(&self) -> BenefitRule {
        BenefitRule::Always
    }
}

/// A selectable power inside a category
pub trait PowerDef {
    fn id(&self) -> &PowerId;
    /// Sigils that must stay selected for this power to remain selected
    fn requires(&self) -> &[SigilId];
}

/// TOML-backed sigil node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigilNode {
    pub id: SigilId,
    pub name: String,
    #[serde(default)]
    pub prerequisites: Vec<SigilId>,
    #[serde(default)]
    pub resource: Option<ResourceType>,
    #[serde(default)]
    pub benefits: Vec<Benefit>,
    #[serde(default)]
    pub benefit_rule: BenefitRule,
}

impl SigilDef for SigilNode {
    fn id(&self) -> &SigilId {
        &self.id
    }

    fn prerequisites(&self) -> &[SigilId] {
        &self.prerequisites
    }

    fn resource(&self) -> Option<ResourceType> {
        self.resource
    }

    fn benefits(&self) -> &[Benefit] {
        &self.benefits
    }

    fn benefit_rule(&self) -> BenefitRule {
        self.benefit_rule
    }
}

/// TOML-backed power
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerNode {
    pub id: PowerId,
    pub name: String,
    #[serde(default)]
    pub requires: Vec<SigilId>,
    #[serde(default)]
    pub description: String,
}

impl PowerDef for PowerNode {
    fn id(&self) -> &PowerId {
        &self.id
    }

    fn requires(&self) -> &[SigilId] {
        &self.requires
    }
}

/// A group of powers sharing one quota
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerCategory<P = PowerNode> {
    pub id: CategoryId,
    pub name: String,
    #[serde(default = "Vec::new")]
    pub powers: Vec<P>,
}

impl<P: PowerDef> PowerCategory<P> {
    pub fn power(&self, id: &PowerId) -> Option<&P> {
        self.powers.iter().find(|p| p.id() == id)
    }
}

/// Boost slot for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostDef {
    pub category: CategoryId,
    /// Resource consumed while the boost is active
    pub resource: ResourceType,
    /// Extra quota granted while active
    pub bonus: u32,
    /// Auxiliary fields reset when the boost is turned off
    #[serde(default)]
    pub clears: Vec<AuxField>,
}

/// Named assignment hanging off one power (e.g. which beast a bond targets)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryDef {
    pub field: AuxField,
    pub category: CategoryId,
    pub owner: PowerId,
}

/// Complete static content for one blessing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlessingDefinition<S = SigilNode, P = PowerNode> {
    pub id: BlessingId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "Vec::new")]
    pub sigils: Vec<S>,
    #[serde(default = "Vec::new")]
    pub categories: Vec<PowerCategory<P>>,
    #[serde(default)]
    pub boosts: Vec<BoostDef>,
    #[serde(default)]
    pub auxiliaries: Vec<AuxiliaryDef>,
}

impl<S: SigilDef, P: PowerDef> BlessingDefinition<S, P> {
    pub fn sigil(&self, id: &SigilId) -> Option<&S> {
        self.sigils.iter().find(|s| s.id() == id)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&PowerCategory<P>> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn boost(&self, category: &CategoryId) -> Option<&BoostDef> {
        self.boosts.iter().find(|b| &b.category == category)
    }

    pub fn auxiliary(&self, field: &AuxField) -> Option<&AuxiliaryDef> {
        self.auxiliaries.iter().find(|a| &a.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigil_defaults_from_toml() {
        let node: SigilNode = toml::from_str(
            r#"
id = "spark"
name = "Spark"
"#,
        )
        .unwrap();
        assert!(node.prerequisites.is_empty());
        assert_eq!(node.resource, None);
        assert_eq!(node.benefit_rule, BenefitRule::Always);
    }

    #[test]
    fn test_benefit_rule_snake_case() {
        let node: SigilNode = toml::from_str(
            r#"
id = "triune"
name = "Triune"
resource = "juathas"
benefit_rule = "choose_two"
benefits = [{ category = "flame", amount = 1 }]
"#,
        )
        .unwrap();
        assert_eq!(node.benefit_rule, BenefitRule::ChooseTwo);
        assert_eq!(node.resource, Some(ResourceType::Juathas));
        assert_eq!(node.benefits[0].category.as_str(), "flame");
    }
}
