pub mod ability;
pub mod budget;
pub mod domain;
pub mod homie;
pub mod soul;

use std::fs;
use std::path::Path;

use sf_core::{AbilityId, DomainId, HomieId, Snapshot, SoulId, SoulStore, StatPolicy};

/// Load the store from a snapshot file.
///
/// An absent or malformed snapshot yields an empty store, never an error;
/// a malformed one is warned about so a typo'd path doesn't silently wipe
/// data on the next save.
pub fn load_store(path: &Path) -> SoulStore {
    let Ok(json) = fs::read_to_string(path) else {
        return SoulStore::new(StatPolicy::standard());
    };
    match Snapshot::from_json(&json) {
        Ok(snapshot) => SoulStore::from_snapshot(StatPolicy::standard(), snapshot),
        Err(e) => {
            eprintln!(
                "warning: could not parse {} ({e}); starting from an empty state",
                path.display()
            );
            SoulStore::new(StatPolicy::standard())
        }
    }
}

/// Write the full store back to the snapshot file.
pub fn save_store(path: &Path, store: &SoulStore) -> Result<(), String> {
    let json = store
        .snapshot()
        .to_json()
        .map_err(|e| format!("could not serialize snapshot: {e}"))?;
    fs::write(path, json).map_err(|e| format!("could not write {}: {e}", path.display()))
}

/// Match a user-supplied reference (id prefix or case-insensitive name)
/// against a candidate list of `(full_id, name, id)` triples.
fn resolve_ref<I: Copy>(
    kind: &str,
    needle: &str,
    candidates: &[(String, String, I)],
) -> Result<I, String> {
    let lowered = needle.to_lowercase();
    let matches: Vec<_> = candidates
        .iter()
        .filter(|(full_id, name, _)| {
            full_id.starts_with(&lowered) || name.to_lowercase() == lowered
        })
        .collect();
    match matches.as_slice() {
        [] => Err(format!("no {kind} matches '{needle}'")),
        [(_, _, id)] => Ok(*id),
        _ => Err(format!(
            "'{needle}' is ambiguous: {} {kind}s match",
            matches.len()
        )),
    }
}

/// Find a soul by name or id prefix.
pub fn find_soul(store: &SoulStore, needle: &str) -> Result<SoulId, String> {
    let candidates: Vec<_> = store
        .souls()
        .iter()
        .map(|s| (s.id.0.to_string(), s.name.clone(), s.id))
        .collect();
    resolve_ref("soul", needle, &candidates)
}

/// Find a homie by name or id prefix.
pub fn find_homie(store: &SoulStore, needle: &str) -> Result<HomieId, String> {
    let candidates: Vec<_> = store
        .homies()
        .iter()
        .map(|h| (h.id.0.to_string(), h.name.clone(), h.id))
        .collect();
    resolve_ref("homie", needle, &candidates)
}

/// Find a domain by name or id prefix.
pub fn find_domain(store: &SoulStore, needle: &str) -> Result<DomainId, String> {
    let candidates: Vec<_> = store
        .domains()
        .iter()
        .map(|d| (d.id.0.to_string(), d.name.clone(), d.id))
        .collect();
    resolve_ref("domain", needle, &candidates)
}

/// Find an ability by name or id prefix.
pub fn find_ability(store: &SoulStore, needle: &str) -> Result<AbilityId, String> {
    let candidates: Vec<_> = store
        .abilities()
        .iter()
        .map(|a| (a.id.0.to_string(), a.name.clone(), a.id))
        .collect();
    resolve_ref("ability", needle, &candidates)
}

/// Render an optional free-text field for detail views.
pub fn field_or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "—" } else { value }
}
