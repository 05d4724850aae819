//! The SPU budget audit: a derived report, never an enforced constraint.

use serde::{Deserialize, Serialize};

use crate::store::SoulStore;

/// Snapshot of the SPU economy, recomputed on demand from the live
/// collections and never cached.
///
/// `available` may go negative; the report is advisory for the game master
/// and no store operation is ever blocked by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetReport {
    /// Sum of every soul's energy.
    pub total_energy: u64,
    /// Sum of homie investment, homie revival spend, and domain investment.
    pub spent: u64,
    /// `total_energy - spent`, signed.
    pub available: i64,
}

impl BudgetReport {
    /// Compute the current budget from the store.
    pub fn audit(store: &SoulStore) -> Self {
        let total_energy: u64 = store.souls().iter().map(|s| s.stats.energy).sum();
        let spent: u64 = store
            .homies()
            .iter()
            .map(|h| h.spu_invested + h.revival_spu_spent)
            .sum::<u64>()
            + store.domains().iter().map(|d| d.spu_invested).sum::<u64>();
        Self {
            total_energy,
            spent,
            available: total_energy as i64 - spent as i64,
        }
    }

    /// True when more SPU has been spent than harvested.
    pub fn overdrawn(&self) -> bool {
        self.available < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainDraft;
    use crate::homie::HomieDraft;
    use crate::policy::{EnergyCurve, StatPolicy};
    use crate::soul::SoulDraft;

    /// Policy where energy equals rating, for legible test arithmetic.
    fn unit_policy() -> StatPolicy {
        StatPolicy {
            energy_curve: EnergyCurve::Linear { per_rating: 1.0 },
            ..StatPolicy::standard()
        }
    }

    fn soul_with_energy(store: &mut SoulStore, name: &str, might: i64, tier: i64, will: i64) {
        store
            .add_soul(SoulDraft {
                name: name.to_string(),
                might,
                tier,
                will,
                ..SoulDraft::default()
            })
            .unwrap();
    }

    #[test]
    fn audit_reference_figures() {
        let mut store = SoulStore::new(unit_policy());
        soul_with_energy(&mut store, "Alpha", 10, 5, 10); // rating 20+15+50 = 85
        soul_with_energy(&mut store, "Beta", 5, 0, 8); // rating 10+0+40 = 50

        store
            .create_homie(HomieDraft {
                name: "Napoleon".to_string(),
                spu_invested: 30,
                ..HomieDraft::default()
            })
            .unwrap();
        store
            .create_homie(HomieDraft {
                name: "Prometheus".to_string(),
                ..HomieDraft::default()
            })
            .unwrap();
        store
            .create_domain(DomainDraft {
                name: "Whole Cake".to_string(),
                spu_invested: 20,
                ..DomainDraft::default()
            })
            .unwrap();

        let report = BudgetReport::audit(&store);
        assert_eq!(report.total_energy, 135);
        assert_eq!(report.spent, 50);
        assert_eq!(report.available, 85);
        assert!(!report.overdrawn());
    }

    #[test]
    fn revival_spend_counts_against_budget() {
        let mut store = SoulStore::new(unit_policy());
        let id = store
            .create_homie(HomieDraft {
                name: "Zeus".to_string(),
                spu_invested: 100,
                ..HomieDraft::default()
            })
            .unwrap();
        store.mark_destroyed(id).unwrap();
        store.revive(id).unwrap();

        let report = BudgetReport::audit(&store);
        assert_eq!(report.spent, 150);
        assert_eq!(report.available, -150);
        assert!(report.overdrawn());
    }

    #[test]
    fn empty_store_is_balanced() {
        let store = SoulStore::new(StatPolicy::standard());
        let report = BudgetReport::audit(&store);
        assert_eq!(report.total_energy, 0);
        assert_eq!(report.spent, 0);
        assert_eq!(report.available, 0);
    }
}
