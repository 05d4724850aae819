//! Homies: companion creatures funded by spent SPU.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainId;
use crate::soul::SoulId;

/// SPU cost of tier 1 of any stat upgrade; tier N costs `5 * N`.
pub const UPGRADE_BASE_COST: u64 = 5;

/// Unique identifier for a homie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HomieId(pub Uuid);

impl HomieId {
    /// Generate a new random homie ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HomieId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HomieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The category of a homie. Extensible via `Custom(String)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomieKind {
    /// A named signature companion.
    Signature,
    /// A homie bound to a domain's territory.
    Territory,
    /// A minor, disposable homie.
    Minor,
    /// A user-defined category.
    Custom(String),
}

impl HomieKind {
    /// Parse a kind from a string, falling back to `Custom`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "signature" => Self::Signature,
            "territory" => Self::Territory,
            "minor" => Self::Minor,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for HomieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signature => write!(f, "signature"),
            Self::Territory => write!(f, "territory"),
            Self::Minor => write!(f, "minor"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// Which stat a tier upgrade applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeStat {
    /// Hit points.
    Hp,
    /// Armor class.
    Ac,
    /// Damage output.
    Damage,
    /// Non-combat utility.
    Utility,
}

impl UpgradeStat {
    /// Parse a stat key from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hp" => Some(Self::Hp),
            "ac" => Some(Self::Ac),
            "damage" | "dmg" => Some(Self::Damage),
            "utility" => Some(Self::Utility),
            _ => None,
        }
    }
}

impl fmt::Display for UpgradeStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hp => write!(f, "hp"),
            Self::Ac => write!(f, "ac"),
            Self::Damage => write!(f, "damage"),
            Self::Utility => write!(f, "utility"),
        }
    }
}

/// Per-stat tier upgrade counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierUpgrades {
    /// HP upgrade tier.
    pub hp: u32,
    /// AC upgrade tier.
    pub ac: u32,
    /// Damage upgrade tier.
    pub damage: u32,
    /// Utility upgrade tier.
    pub utility: u32,
}

impl TierUpgrades {
    /// Get the tier counter for a stat.
    pub fn get(&self, stat: UpgradeStat) -> u32 {
        match stat {
            UpgradeStat::Hp => self.hp,
            UpgradeStat::Ac => self.ac,
            UpgradeStat::Damage => self.damage,
            UpgradeStat::Utility => self.utility,
        }
    }

    /// Get a mutable reference to the tier counter for a stat.
    pub fn get_mut(&mut self, stat: UpgradeStat) -> &mut u32 {
        match stat {
            UpgradeStat::Hp => &mut self.hp,
            UpgradeStat::Ac => &mut self.ac,
            UpgradeStat::Damage => &mut self.damage,
            UpgradeStat::Utility => &mut self.utility,
        }
    }
}

/// A companion creature bound to the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Homie {
    /// Unique identifier.
    pub id: HomieId,
    /// Display name.
    pub name: String,
    /// Homie category.
    pub kind: HomieKind,
    /// Free-text role (e.g. "scout", "bruiser").
    pub role: String,
    /// Hit points.
    pub hp: i64,
    /// Armor class.
    pub ac: i64,
    /// Movement speed.
    pub move_speed: i64,
    /// Free-text attack description.
    pub attack: String,
    /// Free-text personality.
    pub personality: String,
    /// Free-text location or bound object.
    pub location: String,
    /// The soul this homie was made from, if any.
    pub linked_soul_id: Option<SoulId>,
    /// The domain this homie belongs to, if any.
    pub domain_id: Option<DomainId>,
    /// Total SPU paid for creation and upgrades. Only ever increases.
    pub spu_invested: u64,
    /// Per-stat upgrade tiers.
    pub upgrades: TierUpgrades,
    /// Whether the homie is currently destroyed.
    pub destroyed: bool,
    /// Cumulative SPU spent on revivals, tracked separately from
    /// `spu_invested` so revival cost stays `spu_invested / 2`.
    pub revival_spu_spent: u64,
    /// Timestamp when the homie was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the homie was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Input fields for creating a homie.
#[derive(Debug, Clone)]
pub struct HomieDraft {
    /// Display name (required, non-blank).
    pub name: String,
    /// Homie category.
    pub kind: HomieKind,
    /// Free-text role.
    pub role: String,
    /// Hit points.
    pub hp: i64,
    /// Armor class.
    pub ac: i64,
    /// Movement speed.
    pub move_speed: i64,
    /// Free-text attack description.
    pub attack: String,
    /// Free-text personality.
    pub personality: String,
    /// Free-text location.
    pub location: String,
    /// Soul to link; must exist in the store.
    pub linked_soul_id: Option<SoulId>,
    /// Domain to join; must exist in the store.
    pub domain_id: Option<DomainId>,
    /// Initial SPU investment; negative values clamp to 0.
    pub spu_invested: i64,
}

impl Default for HomieDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: HomieKind::Minor,
            role: String::new(),
            hp: 0,
            ac: 0,
            move_speed: 0,
            attack: String::new(),
            personality: String::new(),
            location: String::new(),
            linked_soul_id: None,
            domain_id: None,
            spu_invested: 0,
        }
    }
}

impl Homie {
    /// Create a homie from a draft.
    pub(crate) fn from_draft(draft: HomieDraft) -> Self {
        let now = Utc::now();
        Self {
            id: HomieId::new(),
            name: draft.name,
            kind: draft.kind,
            role: draft.role,
            hp: draft.hp,
            ac: draft.ac,
            move_speed: draft.move_speed,
            attack: draft.attack,
            personality: draft.personality,
            location: draft.location,
            linked_soul_id: draft.linked_soul_id,
            domain_id: draft.domain_id,
            spu_invested: draft.spu_invested.max(0) as u64,
            upgrades: TierUpgrades::default(),
            destroyed: false,
            revival_spu_spent: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
