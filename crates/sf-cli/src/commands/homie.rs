use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use sf_core::{HomieDraft, HomieKind, UpgradeStat};

use super::{field_or_dash, find_domain, find_homie, find_soul, load_store, save_store};

/// Arguments for `sf homie create`.
pub struct CreateArgs {
    pub name: String,
    pub kind: String,
    pub role: String,
    pub hp: i64,
    pub ac: i64,
    pub move_speed: i64,
    pub attack: String,
    pub personality: String,
    pub location: String,
    pub soul: Option<String>,
    pub domain: Option<String>,
    pub spu: i64,
}

pub fn create(file: &Path, args: CreateArgs) -> Result<(), String> {
    let mut store = load_store(file);

    let linked_soul_id = match &args.soul {
        Some(needle) => Some(find_soul(&store, needle)?),
        None => None,
    };
    let domain_id = match &args.domain {
        Some(needle) => Some(find_domain(&store, needle)?),
        None => None,
    };

    let id = store
        .create_homie(HomieDraft {
            name: args.name.clone(),
            kind: HomieKind::parse(&args.kind),
            role: args.role,
            hp: args.hp,
            ac: args.ac,
            move_speed: args.move_speed,
            attack: args.attack,
            personality: args.personality,
            location: args.location,
            linked_soul_id,
            domain_id,
            spu_invested: args.spu,
        })
        .map_err(|e| e.to_string())?;
    save_store(file, &store)?;

    println!("Created homie '{}' ({id})", args.name);
    Ok(())
}

pub fn list(file: &Path) -> Result<(), String> {
    let store = load_store(file);
    if store.homies().is_empty() {
        println!("  No homies created.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Kind", "HP", "AC", "SPU", "Status"]);

    for homie in store.homies() {
        table.add_row(vec![
            homie.id.to_string(),
            homie.name.clone(),
            homie.kind.to_string(),
            homie.hp.to_string(),
            homie.ac.to_string(),
            homie.spu_invested.to_string(),
            if homie.destroyed {
                "destroyed".to_string()
            } else {
                "active".to_string()
            },
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} homies", store.homies().len());
    Ok(())
}

pub fn show(file: &Path, needle: &str) -> Result<(), String> {
    let store = load_store(file);
    let id = find_homie(&store, needle)?;
    let homie = store.get_homie(id).ok_or("homie not found")?;

    let status = if homie.destroyed {
        "DESTROYED".red().to_string()
    } else {
        "active".green().to_string()
    };
    println!("{} ({}) [{status}]", homie.name, homie.id);
    println!("  Kind: {}  Role: {}", homie.kind, field_or_dash(&homie.role));
    println!(
        "  HP {}  AC {}  Move {}",
        homie.hp, homie.ac, homie.move_speed
    );
    println!("  Attack: {}", field_or_dash(&homie.attack));
    println!("  Personality: {}", field_or_dash(&homie.personality));
    println!("  Location: {}", field_or_dash(&homie.location));
    println!(
        "  SPU invested: {}  Revival SPU spent: {}",
        homie.spu_invested, homie.revival_spu_spent
    );
    println!(
        "  Upgrades: hp {}, ac {}, damage {}, utility {}",
        homie.upgrades.hp, homie.upgrades.ac, homie.upgrades.damage, homie.upgrades.utility
    );

    match homie.linked_soul_id.and_then(|sid| store.get_soul(sid)) {
        Some(soul) => println!("  Bound soul: {} ({})", soul.name, soul.id),
        None => println!("  Bound soul: none"),
    }
    match homie.domain_id.and_then(|did| store.get_domain(did)) {
        Some(domain) => println!("  Domain: {} ({})", domain.name, domain.id),
        None => println!("  Domain: none"),
    }

    let abilities = store.abilities_for_homie(id);
    if !abilities.is_empty() {
        println!("  Abilities:");
        for ability in abilities {
            println!("    {} (power {})", ability.name, ability.power);
        }
    }
    Ok(())
}

pub fn upgrade(file: &Path, needle: &str, stat: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_homie(&store, needle)?;
    let stat = UpgradeStat::parse(stat)
        .ok_or_else(|| format!("unknown stat '{stat}' (expected hp, ac, damage, or utility)"))?;
    let cost = store.upgrade_tier(id, stat).map_err(|e| e.to_string())?;
    save_store(file, &store)?;

    let homie = store.get_homie(id).ok_or("homie not found")?;
    println!(
        "Upgraded {stat} to tier {} for {cost} SPU (total invested: {})",
        homie.upgrades.get(stat),
        homie.spu_invested
    );
    Ok(())
}

pub fn destroy(file: &Path, needle: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_homie(&store, needle)?;
    store.mark_destroyed(id).map_err(|e| e.to_string())?;
    save_store(file, &store)?;
    println!("Marked '{needle}' destroyed");
    Ok(())
}

pub fn restore(file: &Path, needle: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_homie(&store, needle)?;
    store.restore(id).map_err(|e| e.to_string())?;
    save_store(file, &store)?;
    println!("Restored '{needle}' (no SPU spent)");
    Ok(())
}

pub fn revive(file: &Path, needle: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_homie(&store, needle)?;
    let cost = store.revive(id).map_err(|e| e.to_string())?;
    save_store(file, &store)?;
    println!("Revived '{needle}' for {cost} SPU");
    Ok(())
}

pub fn remove(file: &Path, needle: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_homie(&store, needle)?;
    let name = store
        .get_homie(id)
        .map(|h| h.name.clone())
        .ok_or("homie not found")?;
    store.remove_homie(id);
    save_store(file, &store)?;
    println!("Removed homie '{name}'; its abilities reverted to general");
    Ok(())
}
