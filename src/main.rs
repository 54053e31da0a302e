//! Sigilcraft - Entry Point
//!
//! Line-oriented front end over a character build: pick sigils, powers and
//! boosts per blessing and watch the shared resource pool drain.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sigilcraft::core::config::{self, BuildConfig};
use sigilcraft::core::error::Result;
use sigilcraft::core::types::{BlessingId, CategoryId, ResourceType};
use sigilcraft::{BlessingCatalog, CharacterBuild, ResourcePool, Toggle};

/// Blessing build configurator
#[derive(Parser, Debug)]
#[command(name = "sigilcraft")]
#[command(about = "Configure blessing builds against a shared sigil pool")]
struct Args {
    /// Build config TOML (sigil costs, starting pool)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra blessing TOML files; same ids replace the built-ins
    #[arg(long)]
    blessings: Option<PathBuf>,

    /// Starting pool override, e.g. kaarn=3,purth=2
    #[arg(long)]
    pool: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sigilcraft=info")),
        )
        .init();

    let args = Args::parse();

    if let Some(path) = &args.config {
        let loaded = BuildConfig::load(path)?;
        if config::set_config(loaded).is_err() {
            tracing::warn!("Config already initialized; ignoring {}", path.display());
        }
    }
    let cfg = config::config();

    let mut catalog = BlessingCatalog::builtin()?;
    if let Some(dir) = &args.blessings {
        catalog.load_directory(dir)?;
    }

    let pool = match &args.pool {
        Some(spec) => ResourcePool::parse_spec(spec)?,
        None => cfg.starting_pool.clone(),
    };
    let mut build = CharacterBuild::new(catalog, pool)?;

    println!("\n=== SIGILCRAFT ===");
    println!("Commands:");
    println!("  list                              - List blessings");
    println!("  show <blessing>                   - Sigils, powers and boosts of a blessing");
    println!("  select <blessing> <sigil>         - Toggle a sigil");
    println!("  power <blessing> <category> <id>  - Toggle a power");
    println!("  boost <blessing> <category>       - Toggle a boost");
    println!("  assign <blessing> <field> <value> - Set an auxiliary field");
    println!("  pool <type> <n>                   - Change the resource pool");
    println!("  json <blessing>                   - Print a blessing snapshot as JSON");
    println!("  status / s                        - Resource totals");
    println!("  reset                             - Clear every blessing");
    println!("  quit / q                          - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["quit"] | ["q"] => break,
            ["list"] => {
                for def in build.catalog().iter() {
                    println!("  {:<12} {}", def.id, def.name);
                }
            }
            ["status"] | ["s"] => display_status(&build, &cfg.sigil_costs),
            ["reset"] => {
                build.reset();
                println!("Build cleared.");
            }
            ["show", blessing] => display_blessing(&build, &BlessingId::from(*blessing)),
            ["select", blessing, sigil] => {
                let result = build.select(&BlessingId::from(*blessing), &(*sigil).into());
                report(&result, sigil);
            }
            ["power", blessing, category, power] => {
                let result = build.select_power(
                    &BlessingId::from(*blessing),
                    &(*category).into(),
                    &(*power).into(),
                );
                report(&result, power);
            }
            ["boost", blessing, category] => {
                let blessing = BlessingId::from(*blessing);
                let category = CategoryId::from(*category);
                if build.has_category(&blessing, &category) {
                    let result = build.toggle_boost(&blessing, &category);
                    report(&result, category.as_str());
                } else {
                    println!("Unknown category: {}", category);
                }
            }
            ["assign", blessing, field, value @ ..] if !value.is_empty() => {
                let value = value.join(" ");
                if build.assign_auxiliary(&BlessingId::from(*blessing), &(*field).into(), &value) {
                    println!("{} = {}", field, value);
                } else {
                    println!("Cannot assign {} (owner power not selected?)", field);
                }
            }
            ["pool", resource, amount] => match (resource.parse::<ResourceType>(), amount.parse::<u32>()) {
                (Ok(resource), Ok(amount)) => {
                    build.set_pool_count(resource, amount);
                    println!("{} pool set to {}", resource, amount);
                }
                _ => println!("Usage: pool <kaarn|purth|juathas|xuth|lekolu|sinthru> <n>"),
            },
            ["json", blessing] => match build.snapshot(&BlessingId::from(*blessing), &cfg.sigil_costs) {
                Some(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                None => println!("Unknown blessing: {}", blessing),
            },
            _ => println!("Unknown command. Available: list, show, select, power, boost, assign, pool, json, status, reset, quit"),
        }
    }

    println!(
        "\nFinal build: {} sigil points across {} blessings.",
        build.total_sigil_cost(&cfg.sigil_costs),
        build.catalog().len()
    );
    Ok(())
}

/// Print the outcome of a toggle
fn report(result: &Toggle, target: &str) {
    match result {
        Toggle::On => println!("{} on", target),
        Toggle::Off(cleanup) => {
            println!("{} off", target);
            if cleanup.sigils.len() > 1 {
                let ids: Vec<String> = cleanup.sigils.iter().map(|s| s.to_string()).collect();
                println!("  sigils removed: {}", ids.join(", "));
            }
            for (category, power) in &cleanup.powers {
                println!("  power dropped: {}/{}", category, power);
            }
            for field in &cleanup.auxiliaries {
                println!("  cleared: {}", field);
            }
        }
        Toggle::Ignored => println!("{}: not available", target),
    }
}

/// Resource totals against the pool
fn display_status(build: &CharacterBuild, costs: &config::SigilCostTable) {
    let totals = build.totals();
    println!();
    println!("--- Resources (used / pool) ---");
    for resource in ResourceType::ALL {
        println!(
            "  {:<8} {:>2} / {:>2}",
            resource,
            totals.get(resource),
            build.pool().get(resource)
        );
    }
    if build.is_overdrawn() {
        println!("  (overdrawn: remove sigils or boosts)");
    }
    println!("  Sigil points: {}", build.total_sigil_cost(costs));
    println!();
}

/// Sigils, quotas and picks of one blessing
fn display_blessing(build: &CharacterBuild, blessing: &BlessingId) {
    let Some(engine) = build.engine(blessing) else {
        println!("Unknown blessing: {}", blessing);
        return;
    };
    let def = engine.definition();
    println!();
    println!("=== {} ===", def.name);
    if !def.description.is_empty() {
        println!("{}", def.description);
    }

    println!("Sigils:");
    for sigil in &def.sigils {
        let mark = if engine.is_selected(&sigil.id) {
            "*"
        } else if build.can_select(blessing, &sigil.id) {
            " "
        } else {
            "x"
        };
        let resource = sigil.resource.map_or("-".to_string(), |r| r.to_string());
        println!("  [{}] {:<20} {:<8} {}", mark, sigil.id, resource, sigil.name);
    }

    for category in &def.categories {
        let picked = engine.selected_powers(&category.id);
        let boost = if engine.is_boosted(&category.id) {
            " (boosted)"
        } else {
            ""
        };
        println!(
            "{} [{}/{}]{}:",
            category.name,
            picked.len(),
            engine.quota(&category.id),
            boost
        );
        for power in &category.powers {
            let mark = if picked.contains(&power.id) {
                "*"
            } else if engine.can_select_power(&category.id, &power.id) {
                " "
            } else {
                "x"
            };
            println!("  [{}] {:<20} {}", mark, power.id, power.name);
        }
    }

    for aux in &def.auxiliaries {
        println!(
            "{}: {}",
            aux.field,
            engine.auxiliary(&aux.field).unwrap_or("(unassigned)")
        );
    }
    println!();
}
