//! Domains: lairs funded by SPU, hosting territory homies and lair actions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::homie::HomieId;

/// Unique identifier for a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainId(pub Uuid);

impl DomainId {
    /// Generate a new random domain ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DomainId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Unique identifier for a lair action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LairActionId(pub Uuid);

impl LairActionId {
    /// Generate a new random lair action ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LairActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LairActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A structured effect triggered by a domain, hand-entered or parsed from
/// a generation response. The mechanical fields mirror an ability card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LairAction {
    /// Unique identifier.
    pub id: LairActionId,
    /// Action name.
    pub name: String,
    /// Suggested power level (1-10).
    pub power: u32,
    /// Action economy (usually "Lair Action").
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
    /// Free-text notes.
    pub notes: String,
}

impl LairAction {
    /// Create a named lair action with empty mechanical fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: LairActionId::new(),
            name: name.into(),
            power: 0,
            action: String::new(),
            range: String::new(),
            target: String::new(),
            save_or_dc: String::new(),
            damage: String::new(),
            effect_text: String::new(),
            notes: String::new(),
        }
    }
}

/// A lair or territory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    /// Unique identifier.
    pub id: DomainId,
    /// Display name.
    pub name: String,
    /// Domain tier.
    pub tier: i64,
    /// Total SPU invested in the domain.
    pub spu_invested: u64,
    /// Free-text range or size.
    pub range: String,
    /// Fear DC imposed inside the domain.
    pub fear_dc: i64,
    /// Free-text personality.
    pub personality: String,
    /// Free-text notes.
    pub notes: String,
    /// Territory homies bound to this domain.
    pub homie_ids: Vec<HomieId>,
    /// Ordered lair actions. Replaced wholesale on (re)generation.
    pub lair_actions: Vec<LairAction>,
    /// Timestamp when the domain was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the domain was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Input fields for creating a domain.
#[derive(Debug, Clone, Default)]
pub struct DomainDraft {
    /// Display name (required, non-blank).
    pub name: String,
    /// Domain tier.
    pub tier: i64,
    /// Initial SPU investment; negative values clamp to 0.
    pub spu_invested: i64,
    /// Free-text range or size.
    pub range: String,
    /// Fear DC.
    pub fear_dc: i64,
    /// Free-text personality.
    pub personality: String,
    /// Free-text notes.
    pub notes: String,
    /// Territory homies; unknown ids are silently dropped.
    pub homie_ids: Vec<HomieId>,
}

impl Domain {
    /// Create a domain from a draft with an already-filtered territory list.
    pub(crate) fn from_draft(draft: DomainDraft, homie_ids: Vec<HomieId>) -> Self {
        let now = Utc::now();
        Self {
            id: DomainId::new(),
            name: draft.name,
            tier: draft.tier,
            spu_invested: draft.spu_invested.max(0) as u64,
            range: draft.range,
            fear_dc: draft.fear_dc,
            personality: draft.personality,
            notes: draft.notes,
            homie_ids,
            lair_actions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lair_action_new_defaults() {
        let action = LairAction::new("Candy Wall");
        assert_eq!(action.name, "Candy Wall");
        assert_eq!(action.power, 0);
        assert!(action.effect_text.is_empty());
    }

    #[test]
    fn negative_spu_clamps() {
        let domain = Domain::from_draft(
            DomainDraft {
                name: "Whole Cake".to_string(),
                spu_invested: -100,
                ..DomainDraft::default()
            },
            Vec::new(),
        );
        assert_eq!(domain.spu_invested, 0);
        assert!(domain.lair_actions.is_empty());
    }
}
