//! The derived-stat formula as configurable data.
//!
//! The rating/energy/HP-cost constants were never settled law in play — the
//! table tweaked them between campaigns. A [`StatPolicy`] captures one set of
//! constants; the preset constructors cover the two formula families that
//! actually saw use. Everything here is pure so callers can recompute a live
//! preview as often as they like.

use serde::{Deserialize, Serialize};

/// Inclusive range for a soul's might score.
pub const MIGHT_RANGE: (i64, i64) = (1, 10);
/// Inclusive range for a soul's threat tier.
pub const TIER_RANGE: (i64, i64) = (0, 9);
/// Inclusive range for a soul's will score.
pub const WILL_RANGE: (i64, i64) = (1, 10);

/// Derived values computed from a soul's raw attributes.
///
/// Computed once at creation time and cached on the [`Soul`](crate::Soul);
/// never recomputed automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoulStats {
    /// Combined power score.
    pub rating: u32,
    /// Soul level, always at least 1.
    pub level: u32,
    /// Soul power units this soul contributes to the budget.
    pub energy: u64,
    /// Advisory maximum HP a creature may lose to produce this soul.
    pub hp_cost: u32,
}

/// How a rating converts into SPU energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyCurve {
    /// `energy = floor(rating * per_rating)`.
    Linear {
        /// SPU granted per point of rating.
        per_rating: f64,
    },
    /// `energy = floor(max_energy * (rating / max_rating)^2)`.
    ///
    /// `max_rating` is the highest rating the policy's weights can produce.
    Normalized {
        /// SPU granted at the maximum possible rating.
        max_energy: u64,
    },
}

/// One complete set of soul-math constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatPolicy {
    /// Rating weight for might.
    pub might_weight: i64,
    /// Rating weight for tier.
    pub tier_weight: i64,
    /// Rating weight for will.
    pub will_weight: i64,
    /// Rating-to-energy conversion.
    pub energy_curve: EnergyCurve,
    /// HP cost charged per soul level.
    pub hp_cost_per_level: u32,
}

impl StatPolicy {
    /// The most frequently recurring formula set:
    /// `rating = might*2 + tier*3 + will*5`, `energy = floor(rating * 8.5)`,
    /// `hp_cost = level * 2`.
    pub fn standard() -> Self {
        Self {
            might_weight: 2,
            tier_weight: 3,
            will_weight: 5,
            energy_curve: EnergyCurve::Linear { per_rating: 8.5 },
            hp_cost_per_level: 2,
        }
    }

    /// The normalized-quadratic variant: same rating weights, but energy
    /// scales with the square of rating relative to the maximum possible
    /// rating, topping out at 850 SPU.
    pub fn normalized() -> Self {
        Self {
            might_weight: 2,
            tier_weight: 3,
            will_weight: 5,
            energy_curve: EnergyCurve::Normalized { max_energy: 850 },
            hp_cost_per_level: 2,
        }
    }

    /// The highest rating this policy's weights can produce.
    pub fn max_rating(&self) -> u32 {
        let rating = MIGHT_RANGE.1 * self.might_weight
            + TIER_RANGE.1 * self.tier_weight
            + WILL_RANGE.1 * self.will_weight;
        rating.max(0) as u32
    }

    /// Compute the derived stats for a set of raw attributes.
    ///
    /// Pure and deterministic. Out-of-range inputs are clamped to their
    /// documented bounds before use, so this is safe to call on raw user
    /// input for live preview.
    pub fn compute(&self, might: i64, tier: i64, will: i64) -> SoulStats {
        let might = might.clamp(MIGHT_RANGE.0, MIGHT_RANGE.1);
        let tier = tier.clamp(TIER_RANGE.0, TIER_RANGE.1);
        let will = will.clamp(WILL_RANGE.0, WILL_RANGE.1);

        let rating =
            (might * self.might_weight + tier * self.tier_weight + will * self.will_weight).max(0)
                as u32;
        let level = (rating / 10).max(1);

        let energy = match self.energy_curve {
            EnergyCurve::Linear { per_rating } => {
                (f64::from(rating) * per_rating).floor().max(0.0) as u64
            }
            EnergyCurve::Normalized { max_energy } => {
                let max_rating = f64::from(self.max_rating().max(1));
                let fraction = f64::from(rating) / max_rating;
                (max_energy as f64 * fraction * fraction).floor() as u64
            }
        };

        SoulStats {
            rating,
            level,
            energy,
            hp_cost: level * self.hp_cost_per_level,
        }
    }
}

impl Default for StatPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn standard_reference_values() {
        // might 4, tier 3, will 6: rating = 8 + 9 + 30 = 47
        let stats = StatPolicy::standard().compute(4, 3, 6);
        assert_eq!(stats.rating, 47);
        assert_eq!(stats.level, 4);
        assert_eq!(stats.energy, 399); // floor(47 * 8.5)
        assert_eq!(stats.hp_cost, 8);
    }

    #[test]
    fn weakest_soul_is_still_level_one() {
        let stats = StatPolicy::standard().compute(1, 0, 1);
        assert_eq!(stats.rating, 7);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.hp_cost, 2);
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        let policy = StatPolicy::standard();
        assert_eq!(policy.compute(-5, -5, -5), policy.compute(1, 0, 1));
        assert_eq!(policy.compute(99, 99, 99), policy.compute(10, 9, 10));
    }

    #[test]
    fn max_rating_standard() {
        // 10*2 + 9*3 + 10*5
        assert_eq!(StatPolicy::standard().max_rating(), 97);
    }

    #[test]
    fn normalized_curve_tops_out_at_max_energy() {
        let policy = StatPolicy::normalized();
        let stats = policy.compute(10, 9, 10);
        assert_eq!(stats.energy, 850);
        // Partial ratings land strictly below the cap.
        assert!(policy.compute(5, 4, 5).energy < 850);
    }

    proptest! {
        #[test]
        fn compute_is_deterministic(might in 1i64..=10, tier in 0i64..=9, will in 1i64..=10) {
            let policy = StatPolicy::standard();
            prop_assert_eq!(policy.compute(might, tier, will), policy.compute(might, tier, will));
        }

        #[test]
        fn level_is_at_least_one(might in i64::MIN..i64::MAX, tier in i64::MIN..i64::MAX, will in i64::MIN..i64::MAX) {
            let stats = StatPolicy::standard().compute(might, tier, will);
            prop_assert!(stats.level >= 1);
        }

        #[test]
        fn energy_monotone_in_rating(a in 1i64..=10, b in 1i64..=10) {
            // Raising a single attribute never lowers rating or energy.
            let policy = StatPolicy::standard();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let low = policy.compute(lo, 3, 5);
            let high = policy.compute(hi, 3, 5);
            prop_assert!(high.rating >= low.rating);
            prop_assert!(high.energy >= low.energy);
            prop_assert!(high.level >= low.level);
        }
    }
}
