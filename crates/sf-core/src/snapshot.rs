//! Full-state snapshot: the persisted layout is one object holding all four
//! collections, written in full on every mutation and read once at startup.

use serde::{Deserialize, Serialize};

use crate::ability::Ability;
use crate::domain::Domain;
use crate::homie::Homie;
use crate::policy::StatPolicy;
use crate::soul::Soul;
use crate::store::SoulStore;

/// Serialized form of a [`SoulStore`]'s collections.
///
/// The stat policy is deliberately not part of the snapshot: souls carry
/// their cached derived stats, so an old snapshot stays valid even if the
/// table later changes formula presets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// All souls.
    pub souls: Vec<Soul>,
    /// All homies.
    pub homies: Vec<Homie>,
    /// All domains.
    pub domains: Vec<Domain>,
    /// All abilities.
    pub abilities: Vec<Ability>,
}

impl Snapshot {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl SoulStore {
    /// Clone the current collections into a snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            souls: self.souls().to_vec(),
            homies: self.homies().to_vec(),
            domains: self.domains().to_vec(),
            abilities: self.abilities().to_vec(),
        }
    }

    /// Rebuild a store from a snapshot under the given policy.
    ///
    /// The snapshot is trusted as-is; cached soul stats are not recomputed.
    pub fn from_snapshot(policy: StatPolicy, snapshot: Snapshot) -> Self {
        let mut store = Self::new(policy);
        store.restore_collections(
            snapshot.souls,
            snapshot.homies,
            snapshot.domains,
            snapshot.abilities,
        );
        store
    }
}
