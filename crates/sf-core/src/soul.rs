//! Souls: harvested essences and their cached derived stats.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::policy::SoulStats;

/// Unique identifier for a soul.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoulId(pub Uuid);

impl SoulId {
    /// Generate a new random soul ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SoulId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SoulId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A harvested creature's spiritual essence, the source of SPU energy.
///
/// Raw attributes and the derived stats are fixed at creation; only the
/// free-text fields and the two boolean flags change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Soul {
    /// Unique identifier.
    pub id: SoulId,
    /// Display name of the creature the soul came from.
    pub name: String,
    /// Raw might score (1-10).
    pub might: i64,
    /// Raw threat tier (0-9).
    pub tier: i64,
    /// Raw will score (1-10).
    pub will: i64,
    /// Derived stats, cached at creation time.
    pub stats: SoulStats,
    /// Free-text tags.
    pub tags: String,
    /// Free-text notes.
    pub notes: String,
    /// Whether this soul may be consumed when crafting.
    pub available_for_crafting: bool,
    /// Whether this soul resists being ripped back out.
    pub soul_rip_immune: bool,
    /// Timestamp when the soul was harvested.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the soul was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Input fields for creating a soul. Derived stats are computed by the
/// store's [`StatPolicy`](crate::StatPolicy), not supplied here.
#[derive(Debug, Clone, Default)]
pub struct SoulDraft {
    /// Display name (required, non-blank).
    pub name: String,
    /// Raw might score; clamped to 1-10.
    pub might: i64,
    /// Raw threat tier; clamped to 0-9.
    pub tier: i64,
    /// Raw will score; clamped to 1-10.
    pub will: i64,
    /// Free-text tags.
    pub tags: String,
    /// Free-text notes.
    pub notes: String,
}

impl Soul {
    /// Create a soul from a draft and its computed stats.
    pub(crate) fn from_draft(draft: SoulDraft, stats: SoulStats) -> Self {
        let now = Utc::now();
        Self {
            id: SoulId::new(),
            name: draft.name,
            might: draft.might,
            tier: draft.tier,
            will: draft.will,
            stats,
            tags: draft.tags,
            notes: draft.notes,
            available_for_crafting: true,
            soul_rip_immune: false,
            created_at: now,
            updated_at: now,
        }
    }
}
