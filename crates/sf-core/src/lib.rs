//! Core types for Soulforge: souls, homies, domains, abilities, and the SPU
//! economy that ties them together.
//!
//! This crate defines the entity model and its consistency rules. It is
//! independent of any UI or generation backend — you can drive a
//! [`SoulStore`] programmatically or rebuild one from a JSON [`Snapshot`].

/// Ability cards and their assignment model.
pub mod ability;
/// The derived SPU budget report.
pub mod budget;
/// Domains (lairs) and lair actions.
pub mod domain;
/// Error types used throughout the crate.
pub mod error;
/// Homies and their upgrade/revival economy.
pub mod homie;
/// The derived-stat formula as configurable policy.
pub mod policy;
/// Full-state snapshot serialization.
pub mod snapshot;
/// Souls and their cached derived stats.
pub mod soul;
/// The central store that owns all collections.
pub mod store;

/// Re-export ability types.
pub use ability::{Ability, AbilityDraft, AbilityId, Assignment, Provenance};
/// Re-export the budget report.
pub use budget::BudgetReport;
/// Re-export domain types.
pub use domain::{Domain, DomainDraft, DomainId, LairAction, LairActionId};
/// Re-export error types.
pub use error::{SfError, SfResult};
/// Re-export homie types.
pub use homie::{Homie, HomieDraft, HomieId, HomieKind, TierUpgrades, UpgradeStat};
/// Re-export the stat policy.
pub use policy::{EnergyCurve, SoulStats, StatPolicy};
/// Re-export the snapshot type.
pub use snapshot::Snapshot;
/// Re-export soul types.
pub use soul::{Soul, SoulDraft, SoulId};
/// Re-export the store.
pub use store::SoulStore;
