use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use sf_core::{AbilityDraft, Assignment, Provenance, SoulStore};
use sf_gen::{generate_ability, reroll_ability, AbilityRequest, HttpGenerator};

use super::{field_or_dash, find_ability, find_domain, find_homie, load_store, save_store};

/// Arguments for `sf ability add`.
pub struct AddArgs {
    pub name: String,
    pub power: u32,
    pub homie: Option<String>,
    pub domain: Option<String>,
    pub action: String,
    pub range: String,
    pub target: String,
    pub save: String,
    pub damage: String,
    pub effect: String,
    pub combo: String,
    pub cost: Option<u64>,
}

/// Arguments for `sf ability generate`.
pub struct GenerateArgs {
    pub concept: String,
    pub power: u32,
    pub role: String,
    pub homie: Option<String>,
    pub domain: Option<String>,
    pub cost: Option<u64>,
    pub endpoint: String,
}

fn resolve_assignment_args(
    store: &SoulStore,
    homie: Option<&str>,
    domain: Option<&str>,
) -> Result<Assignment, String> {
    match (homie, domain) {
        (Some(needle), _) => Ok(Assignment::Homie(find_homie(store, needle)?)),
        (_, Some(needle)) => Ok(Assignment::Domain(find_domain(store, needle)?)),
        _ => Ok(Assignment::General),
    }
}

fn describe_assignment(store: &SoulStore, assignment: Assignment) -> String {
    match assignment {
        Assignment::General => "general".to_string(),
        Assignment::Homie(id) => match store.get_homie(id) {
            Some(homie) => format!("homie: {}", homie.name),
            None => "general (missing homie)".to_string(),
        },
        Assignment::Domain(id) => match store.get_domain(id) {
            Some(domain) => format!("domain: {}", domain.name),
            None => "general (missing domain)".to_string(),
        },
    }
}

pub fn add(file: &Path, args: AddArgs) -> Result<(), String> {
    let mut store = load_store(file);
    let assignment =
        resolve_assignment_args(&store, args.homie.as_deref(), args.domain.as_deref())?;

    let id = store.create_ability(AbilityDraft {
        name: args.name,
        power: args.power,
        assignment,
        action: args.action,
        range: args.range,
        target: args.target,
        save_or_dc: args.save,
        damage: args.damage,
        effect_text: args.effect,
        combo_notes: args.combo,
        soul_cost: args.cost,
        provenance: Provenance::Manual,
    });
    save_store(file, &store)?;

    let ability = store.get_ability(id).ok_or("ability vanished after creation")?;
    println!("Added ability '{}' ({id})", ability.name);
    Ok(())
}

pub fn list(file: &Path) -> Result<(), String> {
    let store = load_store(file);
    if store.abilities().is_empty() {
        println!("  No abilities.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Power", "Assigned To", "Source"]);

    for ability in store.abilities() {
        let source = match ability.provenance {
            Provenance::Manual => "manual",
            Provenance::Ai => "generated",
        };
        table.add_row(vec![
            ability.id.to_string(),
            ability.name.clone(),
            ability.power.to_string(),
            describe_assignment(&store, store.resolve_assignment(ability)),
            source.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} abilities", store.abilities().len());
    Ok(())
}

pub fn show(file: &Path, needle: &str) -> Result<(), String> {
    let store = load_store(file);
    let id = find_ability(&store, needle)?;
    let ability = store.get_ability(id).ok_or("ability not found")?;

    println!("{} ({})", ability.name, ability.id);
    println!(
        "  Power {}  Assigned to: {}",
        ability.power,
        describe_assignment(&store, store.resolve_assignment(ability))
    );
    println!("  Action: {}", field_or_dash(&ability.action));
    println!("  Range: {}", field_or_dash(&ability.range));
    println!("  Target: {}", field_or_dash(&ability.target));
    println!("  Save/DC: {}", field_or_dash(&ability.save_or_dc));
    println!("  Damage: {}", field_or_dash(&ability.damage));
    println!("  Effect: {}", field_or_dash(&ability.effect_text));
    println!("  Combo: {}", field_or_dash(&ability.combo_notes));
    if let Some(cost) = ability.soul_cost {
        println!("  Soul cost: {cost} SPU");
    }
    Ok(())
}

pub fn generate(file: &Path, args: GenerateArgs) -> Result<(), String> {
    let mut store = load_store(file);
    let assignment =
        resolve_assignment_args(&store, args.homie.as_deref(), args.domain.as_deref())?;

    let generator = HttpGenerator::new(&args.endpoint);
    let request = AbilityRequest {
        concept: args.concept,
        power: args.power,
        role: args.role,
        assignment,
        soul_cost: args.cost,
    };
    let id = generate_ability(&generator, &mut store, &request).map_err(|e| e.to_string())?;
    save_store(file, &store)?;

    let ability = store.get_ability(id).ok_or("ability vanished after creation")?;
    println!("Generated ability '{}' ({id})", ability.name);
    Ok(())
}

pub fn reroll(
    file: &Path,
    needle: &str,
    concept: Option<&str>,
    power: u32,
    role: &str,
    endpoint: &str,
) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_ability(&store, needle)?;
    let ability = store.get_ability(id).ok_or("ability not found")?;

    let request = AbilityRequest {
        concept: concept
            .map(str::to_string)
            .unwrap_or_else(|| ability.effect_text.clone()),
        power,
        role: role.to_string(),
        assignment: ability.assignment,
        soul_cost: ability.soul_cost,
    };
    let generator = HttpGenerator::new(endpoint);
    reroll_ability(&generator, &mut store, id, &request).map_err(|e| e.to_string())?;
    save_store(file, &store)?;

    let ability = store.get_ability(id).ok_or("ability not found")?;
    println!("Rerolled ability '{}' ({id})", ability.name);
    Ok(())
}

pub fn remove(file: &Path, needle: &str) -> Result<(), String> {
    let mut store = load_store(file);
    let id = find_ability(&store, needle)?;
    let name = store
        .get_ability(id)
        .map(|a| a.name.clone())
        .ok_or("ability not found")?;
    store.remove_ability(id);
    save_store(file, &store)?;
    println!("Removed ability '{name}'");
    Ok(())
}
