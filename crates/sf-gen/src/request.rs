//! Request shapes for the generation proxy.
//!
//! The proxy accepts one JSON object per call: a `mode` discriminator, the
//! mode's own fields, and a bounded summary of the current ecosystem so the
//! generator can write abilities that reference what's actually in play.
//! Field names here are the proxy's wire names, not ours.

use serde::Serialize;

use sf_core::{Domain, SoulStore};

/// Most entities of each kind included in a context summary. Keeps prompts
/// small no matter how large the collections grow.
pub const MAX_CONTEXT_ENTRIES: usize = 12;

/// Lair actions per batch accepted by the proxy.
pub const MAX_LAIR_ACTIONS: u32 = 5;

/// Name and key stats of one soul, as the proxy expects them.
#[derive(Debug, Clone, Serialize)]
pub struct SoulBrief {
    /// Soul name.
    pub name: String,
    /// Soul level.
    pub level: u32,
    /// SPU energy, under the proxy's historical field name.
    #[serde(rename = "spu")]
    pub energy: u64,
}

/// Name and key stats of one homie.
#[derive(Debug, Clone, Serialize)]
pub struct HomieBrief {
    /// Homie name.
    pub name: String,
    /// Homie category.
    #[serde(rename = "type")]
    pub kind: String,
    /// Hit points.
    pub hp: i64,
    /// Armor class.
    pub ac: i64,
}

/// Name and key stats of one domain.
#[derive(Debug, Clone, Serialize)]
pub struct DomainBrief {
    /// Domain name.
    pub name: String,
    /// Domain tier.
    pub tier: i64,
    /// Fear DC, under the proxy's historical field name.
    #[serde(rename = "dc")]
    pub fear_dc: i64,
}

/// Bounded summary of the current collections, sent with every request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContextSummary {
    /// Up to [`MAX_CONTEXT_ENTRIES`] souls.
    pub souls: Vec<SoulBrief>,
    /// Up to [`MAX_CONTEXT_ENTRIES`] homies.
    pub homies: Vec<HomieBrief>,
    /// Up to [`MAX_CONTEXT_ENTRIES`] domains.
    pub domains: Vec<DomainBrief>,
}

impl ContextSummary {
    /// Summarize a store: names plus key stats only, capped per kind.
    pub fn from_store(store: &SoulStore) -> Self {
        Self {
            souls: store
                .souls()
                .iter()
                .take(MAX_CONTEXT_ENTRIES)
                .map(|s| SoulBrief {
                    name: s.name.clone(),
                    level: s.stats.level,
                    energy: s.stats.energy,
                })
                .collect(),
            homies: store
                .homies()
                .iter()
                .take(MAX_CONTEXT_ENTRIES)
                .map(|h| HomieBrief {
                    name: h.name.clone(),
                    kind: h.kind.to_string(),
                    hp: h.hp,
                    ac: h.ac,
                })
                .collect(),
            domains: store
                .domains()
                .iter()
                .take(MAX_CONTEXT_ENTRIES)
                .map(|d| DomainBrief {
                    name: d.name.clone(),
                    tier: d.tier,
                    fear_dc: d.fear_dc,
                })
                .collect(),
        }
    }
}

/// The domain a lair batch is generated for, with the card-relevant fields.
#[derive(Debug, Clone, Serialize)]
pub struct LairTarget {
    /// Domain name.
    pub name: String,
    /// Domain tier.
    pub tier: i64,
    /// SPU invested, under the proxy's historical field name.
    #[serde(rename = "spu")]
    pub spu_invested: u64,
    /// Fear DC, under the proxy's historical field name.
    #[serde(rename = "dc")]
    pub fear_dc: i64,
    /// Range or size.
    pub range: String,
    /// Personality.
    pub personality: String,
}

impl From<&Domain> for LairTarget {
    fn from(domain: &Domain) -> Self {
        Self {
            name: domain.name.clone(),
            tier: domain.tier,
            spu_invested: domain.spu_invested,
            fear_dc: domain.fear_dc,
            range: domain.range.clone(),
            personality: domain.personality.clone(),
        }
    }
}

/// The request modes the proxy understands.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode")]
pub enum GenerationMode {
    /// Draft one ability card from a concept.
    #[serde(rename = "abilityCard")]
    AbilityCard {
        /// What the ability should do, in the user's words.
        concept: String,
        /// Desired power level (1-10).
        power: u32,
        /// Intended role (offense, defense, control, ...).
        role: String,
    },
    /// Draft a batch of lair actions for one domain.
    #[serde(rename = "domainLairs")]
    DomainLairs {
        /// The target domain.
        domain: LairTarget,
        /// Desired power level (1-10).
        power: u32,
        /// How many actions to draft; clamped to 1..=[`MAX_LAIR_ACTIONS`].
        count: u32,
        /// Extra notes or requested themes.
        extra: String,
    },
}

/// One complete request to the proxy.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Mode discriminator and mode-specific fields, flattened to the top
    /// level as the proxy expects.
    #[serde(flatten)]
    pub mode: GenerationMode,
    /// Ecosystem context, flattened to the top level.
    #[serde(flatten)]
    pub context: ContextSummary,
}
