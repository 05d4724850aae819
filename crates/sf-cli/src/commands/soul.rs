use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use sf_core::SoulDraft;

use super::{field_or_dash, find_soul, load_store, save_store};

pub fn add(
    file: &Path,
    name: &str,
    might: i64,
    tier: i64,
    will: i64,
    tags: &str,
    notes: &str,
) -> Result<(), String> {
    let mut store = load_store(file);
    let id = store
        .add_soul(SoulDraft {
            name: name.to_string(),
            might,
            tier,
            will,
            tags: tags.to_string(),
            notes: notes.to_string(),
        })
        .map_err(|e| e.to_string())?;
    save_store(file, &store)?;

    let soul = store.get_soul(id).ok_or("soul vanished after creation")?;
    println!(
        "Harvested '{}' ({id}): rating {}, level {}, {} SPU",
        soul.name, soul.stats.rating, soul.stats.level, soul.stats.energy
    );
    Ok(())
}

pub fn list(file: &Path) -> Result<(), String> {
    let store = load_store(file);
    if store.souls().is_empty() {
        println!("  No souls harvested.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "ID", "Name", "M/T/W", "Rating", "Level", "SPU", "Flags",
    ]);

    for soul in store.souls() {
        let mut flags = Vec::new();
        if !soul.available_for_crafting {
            flags.push("locked");
        }
        if soul.soul_rip_immune {
            flags.push("rip-immune");
        }
        table.add_row(vec![
            soul.id.to_string(),
            soul.name.clone(),
            format!("{}/{}/{}", soul.might, soul.tier, soul.will),
            soul.stats.rating.to_string(),
            soul.stats.level.to_string(),
            soul.stats.energy.to_string(),
            flags.join(", "),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} souls", store.souls().len());
    Ok(())
}

pub fn show(file: &Path, needle: &str) -> Result<(), String> {
    let store = load_store(file);
    let id = find_soul(&store, needle)?;
    let soul = store.get_soul(id).ok_or("soul not found")?;

    println!("{} ({})", soul.name, soul.id);
    println!("  Might {} / Tier {} / Will {}", soul.might, soul.tier, soul.will);
    println!(
        "  Rating {}  Level {}  SPU {}  HP cost {}",
        soul.stats.rating, soul.stats.level, soul.stats.energy, soul.stats.hp_cost
    );
    println!(
        "  Available for crafting: {}",
        if soul.available_for_crafting { "yes" } else { "no" }
    );
    println!(
        "  Soul-rip immune: {}",
        if soul.soul_rip_immune { "yes" } else { "no" }
    );
    println!("  Tags: {}", field_or_dash(&soul.tags));
    println!("  Notes: {}", field_or_dash(&soul.notes));

    let linked: Vec<_> = store
        .homies()
        .iter()
        .filter(|h| h.linked_soul_id == Some(id))
        .map(|h| h.name.as_str())
        .collect();
    if !linked.is_empty() {
        println!("  Bound homies: {}", linked.join(", "));
    }
    Ok(())
}

pub fn toggle_crafting(file: &Path, needle: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_soul(&store, needle)?;
    let now = store.toggle_availability(id).map_err(|e| e.to_string())?;
    save_store(file, &store)?;
    println!(
        "'{needle}' is now {} for crafting",
        if now { "available" } else { "locked" }
    );
    Ok(())
}

pub fn toggle_immunity(file: &Path, needle: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_soul(&store, needle)?;
    let now = store.toggle_immunity(id).map_err(|e| e.to_string())?;
    save_store(file, &store)?;
    println!(
        "'{needle}' is now {} to soul rip",
        if now { "immune" } else { "vulnerable" }
    );
    Ok(())
}

pub fn tag(file: &Path, needle: &str, tags: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_soul(&store, needle)?;
    store.set_soul_tags(id, tags).map_err(|e| e.to_string())?;
    save_store(file, &store)?;
    println!("Tags updated");
    Ok(())
}

pub fn note(file: &Path, needle: &str, notes: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_soul(&store, needle)?;
    store.set_soul_notes(id, notes).map_err(|e| e.to_string())?;
    save_store(file, &store)?;
    println!("Notes updated");
    Ok(())
}

pub fn remove(file: &Path, needle: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_soul(&store, needle)?;
    let name = store
        .get_soul(id)
        .map(|s| s.name.clone())
        .ok_or("soul not found")?;
    store.remove_soul(id);
    save_store(file, &store)?;
    println!("Removed soul '{name}'; linked homies were unbound");
    Ok(())
}
