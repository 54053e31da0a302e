//! Integration tests for the selection engine
//!
//! These walk the documented scenarios end to end on small hand-written
//! graphs:
//! - prerequisite gating and cascade deselection
//! - quota-capped power selection
//! - boost gating on the shared pool

use std::sync::Arc;

use sigilcraft::core::types::{AuxField, BlessingId, CategoryId, PowerId, SigilId};
use sigilcraft::engine::{SigilGraphEngine, Toggle};
use sigilcraft::graph::BlessingDefinition;
use sigilcraft::{BlessingCatalog, CharacterBuild, ResourcePool, ResourceTally, ResourceType};

fn engine(content: &str) -> SigilGraphEngine {
    let def: BlessingDefinition = toml::from_str(content).expect("test blessing should parse");
    SigilGraphEngine::new(Arc::new(def)).expect("test blessing should validate")
}

const TWO_STEP: &str = r#"
id = "two_step"
name = "Two Step"

[[sigils]]
id = "A"
name = "A"
resource = "kaarn"

[[sigils]]
id = "B"
name = "B"
resource = "purth"
prerequisites = ["A"]
"#;

// ============================================================================
// Sigil graph scenarios
// ============================================================================

/// Graph {A (kaarn), B (purth, needs A)} with pool {kaarn:1, purth:1}
#[test]
fn test_prerequisite_then_cascade_scenario() {
    let mut e = engine(TWO_STEP);
    let pool = ResourcePool::new()
        .with(ResourceType::Kaarn, 1)
        .with(ResourceType::Purth, 1);
    let a = SigilId::from("A");
    let b = SigilId::from("B");

    // B first: A is missing
    let before = e.state();
    assert!(e.select(&b, &pool.remaining(&e.used_resources())).is_ignored());
    assert_eq!(*before, *e.state());

    assert_eq!(e.select(&a, &pool.remaining(&e.used_resources())), Toggle::On);
    assert_eq!(e.select(&b, &pool.remaining(&e.used_resources())), Toggle::On);
    assert_eq!(e.used_resources().get(ResourceType::Kaarn), 1);
    assert_eq!(e.used_resources().get(ResourceType::Purth), 1);

    // Deselecting A takes B with it
    let Toggle::Off(cleanup) = e.select(&a, &pool.remaining(&e.used_resources())) else {
        panic!("expected cascade");
    };
    assert_eq!(cleanup.sigils, vec![a, b]);
    assert!(e.state().is_empty());
    assert!(e.used_resources().is_empty());
}

#[test]
fn test_resources_exhausted_blocks_second_sigil() {
    let mut e = engine(
        r#"
id = "twins"
name = "Twins"

[[sigils]]
id = "left"
name = "Left"
resource = "kaarn"

[[sigils]]
id = "right"
name = "Right"
resource = "kaarn"
"#,
    );
    let pool = ResourcePool::new().with(ResourceType::Kaarn, 1);

    assert_eq!(
        e.select(&"left".into(), &pool.remaining(&e.used_resources())),
        Toggle::On
    );
    assert!(e
        .select(&"right".into(), &pool.remaining(&e.used_resources()))
        .is_ignored());
    assert!(!e.can_select(&"right".into(), &pool.remaining(&e.used_resources())));
}

#[test]
fn test_sibling_branches_survive_cascade() {
    let mut e = engine(
        r#"
id = "tree"
name = "Tree"

[[sigils]]
id = "root"
name = "Root"

[[sigils]]
id = "left"
name = "Left"
prerequisites = ["root"]

[[sigils]]
id = "left_leaf"
name = "Left Leaf"
prerequisites = ["left"]

[[sigils]]
id = "right"
name = "Right"
prerequisites = ["root"]

[[sigils]]
id = "right_leaf"
name = "Right Leaf"
prerequisites = ["right"]
"#,
    );
    let free = ResourceTally::new();
    for id in ["root", "left", "left_leaf", "right", "right_leaf"] {
        assert_eq!(e.select(&id.into(), &free), Toggle::On);
    }

    e.select(&"left".into(), &free);
    assert_eq!(
        e.selected_sigils(),
        vec![
            SigilId::from("root"),
            SigilId::from("right"),
            SigilId::from("right_leaf")
        ]
    );
}

// ============================================================================
// Power quota scenarios
// ============================================================================

const QUOTA_TWO: &str = r#"
id = "quota_two"
name = "Quota Two"

[[sigils]]
id = "gate"
name = "Gate"
benefits = [{ category = "gifts", amount = 2 }]

[[categories]]
id = "gifts"
name = "Gifts"
powers = [
    { id = "one", name = "One" },
    { id = "two", name = "Two" },
    { id = "three", name = "Three" },
]
"#;

/// Quota 2 from one sigil: the third pick is refused until a slot frees up
#[test]
fn test_quota_scenario() {
    let mut e = engine(QUOTA_TWO);
    let gifts = CategoryId::from("gifts");
    e.select(&"gate".into(), &ResourceTally::new());
    assert_eq!(e.quota(&gifts), 2);

    assert_eq!(e.select_power(&gifts, &"one".into()), Toggle::On);
    assert_eq!(e.select_power(&gifts, &"two".into()), Toggle::On);

    let before = e.state();
    assert!(e.select_power(&gifts, &"three".into()).is_ignored());
    assert_eq!(*before, *e.state());

    assert!(matches!(
        e.select_power(&gifts, &"one".into()),
        Toggle::Off(_)
    ));
    assert_eq!(e.select_power(&gifts, &"three".into()), Toggle::On);
    assert_eq!(
        e.selected_powers(&gifts).to_vec(),
        vec![PowerId::from("two"), PowerId::from("three")]
    );
}

// ============================================================================
// Boost scenarios
// ============================================================================

/// Boost on armaments costs one kaarn out of the shared pool
#[test]
fn test_boost_scenario_on_shared_pool() {
    let iron = BlessingId::from("ironclad");
    let armaments = CategoryId::from("armaments");

    let mut starved = CharacterBuild::with_builtin(ResourcePool::new()).unwrap();
    assert!(starved.toggle_boost(&iron, &armaments).is_ignored());
    assert_eq!(starved.totals().get(ResourceType::Kaarn), 0);

    let mut build =
        CharacterBuild::with_builtin(ResourcePool::new().with(ResourceType::Kaarn, 1)).unwrap();
    assert_eq!(build.toggle_boost(&iron, &armaments), Toggle::On);
    assert_eq!(build.totals().get(ResourceType::Kaarn), 1);
    assert_eq!(build.engine(&iron).unwrap().quota(&armaments), 1);
}

/// Boost-off clears the beast companion and does not bring it back
#[test]
fn test_boost_off_clears_companion() {
    let catalog = BlessingCatalog::builtin().unwrap();
    let pool = ResourcePool::new()
        .with(ResourceType::Kaarn, 2)
        .with(ResourceType::Purth, 1);
    let mut build = CharacterBuild::new(catalog, pool).unwrap();

    let beast = BlessingId::from("beastcaller");
    let beasts = CategoryId::from("beasts");
    let companion = AuxField::from("companion");

    assert_eq!(build.select(&beast, &"call_of_the_wild".into()), Toggle::On);
    assert_eq!(build.toggle_boost(&beast, &beasts), Toggle::On);
    // Quota 1 + 1 boost: the companion needs the boosted slot
    assert_eq!(build.select_power(&beast, &beasts, &"wolf_stride".into()), Toggle::On);
    assert_eq!(
        build.select_power(&beast, &beasts, &"dire_companion".into()),
        Toggle::On
    );
    assert!(build.assign_auxiliary(&beast, &companion, "Greyfang"));

    let Toggle::Off(cleanup) = build.toggle_boost(&beast, &beasts) else {
        panic!("expected boost off");
    };
    assert_eq!(cleanup.auxiliaries, vec![companion.clone()]);
    assert_eq!(
        cleanup.powers,
        vec![(beasts.clone(), PowerId::from("dire_companion"))]
    );

    assert_eq!(build.toggle_boost(&beast, &beasts), Toggle::On);
    let engine = build.engine(&beast).unwrap();
    assert_eq!(engine.auxiliary(&companion), None);
    assert_eq!(
        engine.selected_powers(&beasts).to_vec(),
        vec![PowerId::from("wolf_stride")]
    );
}
