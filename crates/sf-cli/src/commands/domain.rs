use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use sf_core::DomainDraft;
use sf_gen::{generate_lair_actions, HttpGenerator, LairRequest};

use super::{field_or_dash, find_domain, find_homie, load_store, save_store};

/// Arguments for `sf domain create`.
pub struct CreateArgs {
    pub name: String,
    pub tier: i64,
    pub spu: i64,
    pub range: String,
    pub dc: i64,
    pub personality: String,
    pub notes: String,
}

pub fn create(file: &Path, args: CreateArgs) -> Result<(), String> {
    let mut store = load_store(file);
    let id = store
        .create_domain(DomainDraft {
            name: args.name.clone(),
            tier: args.tier,
            spu_invested: args.spu,
            range: args.range,
            fear_dc: args.dc,
            personality: args.personality,
            notes: args.notes,
            homie_ids: Vec::new(),
        })
        .map_err(|e| e.to_string())?;
    save_store(file, &store)?;

    println!("Created domain '{}' ({id})", args.name);
    Ok(())
}

pub fn list(file: &Path) -> Result<(), String> {
    let store = load_store(file);
    if store.domains().is_empty() {
        println!("  No domains claimed.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "ID", "Name", "Tier", "SPU", "Fear DC", "Homies", "Lair Actions",
    ]);

    for domain in store.domains() {
        table.add_row(vec![
            domain.id.to_string(),
            domain.name.clone(),
            domain.tier.to_string(),
            domain.spu_invested.to_string(),
            domain.fear_dc.to_string(),
            domain.homie_ids.len().to_string(),
            domain.lair_actions.len().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} domains", store.domains().len());
    Ok(())
}

pub fn show(file: &Path, needle: &str) -> Result<(), String> {
    let store = load_store(file);
    let id = find_domain(&store, needle)?;
    let domain = store.get_domain(id).ok_or("domain not found")?;

    println!("{} ({})", domain.name, domain.id);
    println!(
        "  Tier {}  SPU {}  Fear DC {}",
        domain.tier, domain.spu_invested, domain.fear_dc
    );
    println!("  Range: {}", field_or_dash(&domain.range));
    println!("  Personality: {}", field_or_dash(&domain.personality));
    println!("  Notes: {}", field_or_dash(&domain.notes));

    if domain.homie_ids.is_empty() {
        println!("  Territory homies: none");
    } else {
        println!("  Territory homies:");
        for homie_id in &domain.homie_ids {
            match store.get_homie(*homie_id) {
                Some(homie) => println!("    {} ({})", homie.name, homie.id),
                None => println!("    (missing) ({homie_id})"),
            }
        }
    }

    if domain.lair_actions.is_empty() {
        println!("  Lair actions: none");
    } else {
        println!("  Lair actions:");
        for action in &domain.lair_actions {
            println!("    {} (power {})", action.name, action.power);
            if !action.effect_text.is_empty() {
                println!("      {}", action.effect_text);
            }
        }
    }

    let abilities = store.abilities_for_domain(id);
    if !abilities.is_empty() {
        println!("  Abilities:");
        for ability in abilities {
            println!("    {} (power {})", ability.name, ability.power);
        }
    }
    Ok(())
}

pub fn add_homie(file: &Path, domain_needle: &str, homie_needle: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let domain_id = find_domain(&store, domain_needle)?;
    let homie_id = find_homie(&store, homie_needle)?;
    store
        .add_territory_homie(domain_id, homie_id)
        .map_err(|e| e.to_string())?;
    save_store(file, &store)?;
    println!("Bound '{homie_needle}' to '{domain_needle}'");
    Ok(())
}

pub fn remove_homie(file: &Path, domain_needle: &str, homie_needle: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let domain_id = find_domain(&store, domain_needle)?;
    let homie_id = find_homie(&store, homie_needle)?;
    store
        .remove_territory_homie(domain_id, homie_id)
        .map_err(|e| e.to_string())?;
    save_store(file, &store)?;
    println!("Released '{homie_needle}' from '{domain_needle}'");
    Ok(())
}

pub fn generate(
    file: &Path,
    needle: &str,
    power: u32,
    count: u32,
    extra: &str,
    endpoint: &str,
) -> Result<(), String> {
    let mut store = load_store(file);
    let domain_id = find_domain(&store, needle)?;

    let generator = HttpGenerator::new(endpoint);
    let request = LairRequest {
        domain_id,
        power,
        count,
        extra: extra.to_string(),
    };
    let stored =
        generate_lair_actions(&generator, &mut store, &request).map_err(|e| e.to_string())?;
    save_store(file, &store)?;

    println!("Generated {stored} lair actions for '{needle}'");
    Ok(())
}

pub fn remove(file: &Path, needle: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_domain(&store, needle)?;
    let name = store
        .get_domain(id)
        .map(|d| d.name.clone())
        .ok_or("domain not found")?;
    store.remove_domain(id);
    save_store(file, &store)?;
    println!("Removed domain '{name}'; its homies and abilities were unbound");
    Ok(())
}
