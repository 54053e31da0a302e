//! Load-time checks for blessing content
//!
//! The engine assumes every reference resolves and the prerequisite graph is
//! acyclic. Content that breaks either is rejected here, before a session
//! ever sees it.

use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

use crate::core::error::{BuildError, Result};
use crate::core::types::SigilId;
use crate::graph::definition::{BlessingDefinition, PowerDef, SigilDef};

/// Validate every cross reference in a blessing definition
pub fn validate_definition<S: SigilDef, P: PowerDef>(def: &BlessingDefinition<S, P>) -> Result<()> {
    let blessing = def.id.as_str();

    let mut sigil_ids = AHashSet::new();
    for sigil in &def.sigils {
        if !sigil_ids.insert(sigil.id()) {
            return Err(BuildError::invalid_blessing(
                blessing,
                format!("duplicate sigil '{}'", sigil.id()),
            ));
        }
    }

    let mut category_ids = AHashSet::new();
    for category in &def.categories {
        if !category_ids.insert(&category.id) {
            return Err(BuildError::invalid_blessing(
                blessing,
                format!("duplicate category '{}'", category.id),
            ));
        }
        let mut power_ids = AHashSet::new();
        for power in &category.powers {
            if !power_ids.insert(power.id()) {
                return Err(BuildError::invalid_blessing(
                    blessing,
                    format!("duplicate power '{}' in '{}'", power.id(), category.id),
                ));
            }
            if let Some(missing) = power.requires().iter().find(|s| !sigil_ids.contains(s)) {
                return Err(BuildError::invalid_blessing(
                    blessing,
                    format!("power '{}' requires unknown sigil '{}'", power.id(), missing),
                ));
            }
        }
    }

    for sigil in &def.sigils {
        if let Some(missing) = sigil.prerequisites().iter().find(|p| !sigil_ids.contains(p)) {
            return Err(BuildError::invalid_blessing(
                blessing,
                format!("sigil '{}' has unknown prerequisite '{}'", sigil.id(), missing),
            ));
        }
        let mut benefited = AHashSet::new();
        if let Some(benefit) = sigil.benefits().iter().find(|b| !benefited.insert(&b.category)) {
            return Err(BuildError::invalid_blessing(
                blessing,
                format!(
                    "sigil '{}' lists category '{}' more than once",
                    sigil.id(),
                    benefit.category
                ),
            ));
        }
        if let Some(benefit) = sigil
            .benefits()
            .iter()
            .find(|b| !category_ids.contains(&b.category))
        {
            return Err(BuildError::invalid_blessing(
                blessing,
                format!(
                    "sigil '{}' benefits unknown category '{}'",
                    sigil.id(),
                    benefit.category
                ),
            ));
        }
    }

    let mut boosted = AHashSet::new();
    for boost in &def.boosts {
        if !category_ids.contains(&boost.category) {
            return Err(BuildError::invalid_blessing(
                blessing,
                format!("boost targets unknown category '{}'", boost.category),
            ));
        }
        if !boosted.insert(&boost.category) {
            return Err(BuildError::invalid_blessing(
                blessing,
                format!("category '{}' has more than one boost", boost.category),
            ));
        }
        if let Some(field) = boost.clears.iter().find(|f| def.auxiliary(f).is_none()) {
            return Err(BuildError::invalid_blessing(
                blessing,
                format!("boost on '{}' clears unknown field '{}'", boost.category, field),
            ));
        }
    }

    let mut fields = AHashSet::new();
    for aux in &def.auxiliaries {
        if !fields.insert(&aux.field) {
            return Err(BuildError::invalid_blessing(
                blessing,
                format!("duplicate auxiliary field '{}'", aux.field),
            ));
        }
        let owner_known = def
            .category(&aux.category)
            .is_some_and(|c| c.power(&aux.owner).is_some());
        if !owner_known {
            return Err(BuildError::invalid_blessing(
                blessing,
                format!(
                    "auxiliary '{}' owned by unknown power '{}/{}'",
                    aux.field, aux.category, aux.owner
                ),
            ));
        }
    }

    topological_order(def)?;
    Ok(())
}

/// Order sigils so every prerequisite precedes its dependents (Kahn's algorithm)
///
/// Returns the offending sigils if the graph has a cycle. Ties keep
/// definition order.
pub fn topological_order<S: SigilDef, P>(def: &BlessingDefinition<S, P>) -> Result<Vec<SigilId>> {
    let index: AHashMap<&SigilId, usize> = def
        .sigils
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id(), i))
        .collect();

    let mut in_degree = vec![0usize; def.sigils.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); def.sigils.len()];
    for (i, sigil) in def.sigils.iter().enumerate() {
        for prereq in sigil.prerequisites() {
            if let Some(&p) = index.get(prereq) {
                in_degree[i] += 1;
                dependents[p].push(i);
            }
        }
    }

    let mut queue: VecDeque<usize> = (0..def.sigils.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(def.sigils.len());
    while let Some(i) = queue.pop_front() {
        order.push(def.sigils[i].id().clone());
        for &d in &dependents[i] {
            in_degree[d] -= 1;
            if in_degree[d] == 0 {
                queue.push_back(d);
            }
        }
    }

    if order.len() < def.sigils.len() {
        let sigils = (0..def.sigils.len())
            .filter(|&i| in_degree[i] > 0)
            .map(|i| def.sigils[i].id().to_string())
            .collect();
        return Err(BuildError::PrerequisiteCycle {
            blessing: def.id.to_string(),
            sigils,
        });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::definition::{BlessingDefinition, PowerNode, SigilNode};

    fn parse(content: &str) -> BlessingDefinition<SigilNode, PowerNode> {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_valid_definition_passes() {
        let def = parse(
            r#"
id = "test"
name = "Test"

[[sigils]]
id = "a"
name = "A"
resource = "kaarn"
benefits = [{ category = "c", amount = 1 }]

[[sigils]]
id = "b"
name = "B"
prerequisites = ["a"]

[[categories]]
id = "c"
name = "C"
powers = [{ id = "p", name = "P", requires = ["b"] }]
"#,
        );
        assert!(validate_definition(&def).is_ok());
        let order = topological_order(&def).unwrap();
        assert_eq!(order, vec![SigilId::from("a"), SigilId::from("b")]);
    }

    #[test]
    fn test_cycle_detected() {
        let def = parse(
            r#"
id = "loop"
name = "Loop"

[[sigils]]
id = "root"
name = "Root"

[[sigils]]
id = "x"
name = "X"
prerequisites = ["y"]

[[sigils]]
id = "y"
name = "Y"
prerequisites = ["x"]
"#,
        );
        match validate_definition(&def) {
            Err(BuildError::PrerequisiteCycle { sigils, .. }) => {
                assert_eq!(sigils, vec!["x".to_string(), "y".to_string()]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_prerequisite_rejected() {
        let def = parse(
            r#"
id = "dangling"
name = "Dangling"

[[sigils]]
id = "a"
name = "A"
prerequisites = ["ghost"]
"#,
        );
        let err = validate_definition(&def).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_unknown_benefit_category_rejected() {
        let def = parse(
            r#"
id = "orphan"
name = "Orphan"

[[sigils]]
id = "a"
name = "A"
benefits = [{ category = "nowhere", amount = 2 }]
"#,
        );
        assert!(matches!(
            validate_definition(&def),
            Err(BuildError::InvalidBlessing { .. })
        ));
    }

    #[test]
    fn test_repeated_benefit_category_rejected() {
        let def = parse(
            r#"
id = "echo"
name = "Echo"

[[sigils]]
id = "spark"
name = "Spark"
benefit_rule = "choose_two"
benefits = [
    { category = "a", amount = 1 },
    { category = "a", amount = 1 },
    { category = "b", amount = 1 },
]

[[categories]]
id = "a"
name = "A"
powers = [{ id = "pa", name = "PA" }]

[[categories]]
id = "b"
name = "B"
powers = [{ id = "pb", name = "PB" }]
"#,
        );
        let err = validate_definition(&def).unwrap_err();
        assert!(matches!(err, BuildError::InvalidBlessing { .. }));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_boost_clearing_unknown_field_rejected() {
        let def = parse(
            r#"
id = "boosty"
name = "Boosty"

[[categories]]
id = "c"
name = "C"

[[boosts]]
category = "c"
resource = "kaarn"
bonus = 1
clears = ["companion"]
"#,
        );
        let err = validate_definition(&def).unwrap_err();
        assert!(err.to_string().contains("companion"));
    }
}
