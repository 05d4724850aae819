//! Abilities: attack/technique cards, manually authored or generator-drafted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainId;
use crate::homie::HomieId;

/// Placeholder shown for mechanical fields the author (or generator) left out.
pub const FIELD_PLACEHOLDER: &str = "—";

/// Name given to abilities created without one.
pub const UNNAMED_ABILITY: &str = "Unnamed Ability";

/// Unique identifier for an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityId(pub Uuid);

impl AbilityId {
    /// Generate a new random ability ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AbilityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// What an ability is assigned to.
///
/// Stored as written; a dangling target is tolerated and resolves to
/// `General` at read time via
/// [`SoulStore::resolve_assignment`](crate::SoulStore::resolve_assignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assignment {
    /// Usable by the party at large.
    General,
    /// Assigned to a specific homie.
    Homie(HomieId),
    /// Assigned to a specific domain.
    Domain(DomainId),
}

impl Default for Assignment {
    fn default() -> Self {
        Self::General
    }
}

/// Where an ability's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Hand-entered by the user.
    Manual,
    /// Drafted by the text generator.
    Ai,
}

/// An attack or technique card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    /// Unique identifier.
    pub id: AbilityId,
    /// Display name; defaults to [`UNNAMED_ABILITY`] when blank.
    pub name: String,
    /// Suggested power level (1-10).
    pub power: u32,
    /// What the ability is assigned to.
    pub assignment: Assignment,
    /// Action economy required.
    pub action: String,
    /// Range or area.
    pub range: String,
    /// Target shape.
    pub target: String,
    /// Save type and DC, or "None".
    pub save_or_dc: String,
    /// Damage dice and types, if any.
    pub damage: String,
    /// Full effect text.
    pub effect_text: String,
    /// How the ability combos with homies, domains, and souls.
    pub combo_notes: String,
    /// Optional SPU cost to use the ability.
    pub soul_cost: Option<u64>,
    /// Whether the card was hand-written or generator-drafted.
    pub provenance: Provenance,
    /// Timestamp when the ability was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the ability was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Input fields for creating an ability.
#[derive(Debug, Clone)]
pub struct AbilityDraft {
    /// Display name; blank falls back to [`UNNAMED_ABILITY`].
    pub name: String,
    /// Suggested power level.
    pub power: u32,
    /// Assignment target; a dangling reference is tolerated.
    pub assignment: Assignment,
    /// Action economy required.
    pub action: String,
    /// Range or area.
    pub range: String,
    /// Target shape.
    pub target: String,
    /// Save type and DC.
    pub save_or_dc: String,
    /// Damage dice and types.
    pub damage: String,
    /// Full effect text.
    pub effect_text: String,
    /// Combo notes.
    pub combo_notes: String,
    /// Optional SPU cost.
    pub soul_cost: Option<u64>,
    /// Provenance tag.
    pub provenance: Provenance,
}

impl Default for AbilityDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            power: 0,
            assignment: Assignment::General,
            action: String::new(),
            range: String::new(),
            target: String::new(),
            save_or_dc: String::new(),
            damage: String::new(),
            effect_text: String::new(),
            combo_notes: String::new(),
            soul_cost: None,
            provenance: Provenance::Manual,
        }
    }
}

impl Ability {
    /// Create an ability from a draft, applying the unnamed-ability fallback.
    pub(crate) fn from_draft(draft: AbilityDraft) -> Self {
        let now = Utc::now();
        let name = if draft.name.trim().is_empty() {
            UNNAMED_ABILITY.to_string()
        } else {
            draft.name
        };
        Self {
            id: AbilityId::new(),
            name,
            power: draft.power,
            assignment: draft.assignment,
            action: draft.action,
            range: draft.range,
            target: draft.target,
            save_or_dc: draft.save_or_dc,
            damage: draft.damage,
            effect_text: draft.effect_text,
            combo_notes: draft.combo_notes,
            soul_cost: draft.soul_cost,
            provenance: draft.provenance,
            created_at: now,
            updated_at: now,
        }
    }
}
