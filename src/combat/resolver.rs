//! Fight resolution: three distinct stats, three weights summing to 1, a
//! weighted score per contestant, ties to side A.
//!
//! Sampling is direct (partial Fisher-Yates for stats, bounded draws in
//! hundredths for weights), so resolution terminates for any random source.

use serde::Serialize;

use crate::combat::contestant::{AttributeCategory, Contestant, Side, ATTRIBUTE_COUNT};
use crate::combat::rng::RandomSource;

pub const PICKED_STATS: usize = 3;

/// Primary weight bounds, in hundredths.
pub const PRIMARY_WEIGHT_MIN: u32 = 10;
pub const PRIMARY_WEIGHT_MAX: u32 = 80;
/// Upper bound for the secondary weight, in hundredths.
pub const SECONDARY_WEIGHT_MAX: u32 = 90;
/// Minimum share left for the third weight, in hundredths.
pub const TERTIARY_WEIGHT_MARGIN: u32 = 1;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// The stats and weights a fight is scored on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatPicks {
    indices: [usize; PICKED_STATS],
    weights: [f64; PICKED_STATS],
}

impl StatPicks {
    /// Returns `None` unless indices are distinct and in range and weights are
    /// non-negative, finite and sum to 1.
    pub fn new(indices: [usize; PICKED_STATS], weights: [f64; PICKED_STATS]) -> Option<Self> {
        let in_range = indices.iter().all(|&i| i < ATTRIBUTE_COUNT);
        let distinct = indices[0] != indices[1] && indices[0] != indices[2] && indices[1] != indices[2];
        let weights_ok = weights.iter().all(|w| w.is_finite() && *w >= 0.0);
        let sum: f64 = weights.iter().sum();
        if in_range && distinct && weights_ok && (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
            Some(Self { indices, weights })
        } else {
            None
        }
    }

    pub fn sample<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self {
            indices: sample_indices(rng),
            weights: sample_weights(rng),
        }
    }

    pub fn indices(&self) -> [usize; PICKED_STATS] {
        self.indices
    }

    pub fn weights(&self) -> [f64; PICKED_STATS] {
        self.weights
    }

    fn score(&self, contestant: &Contestant) -> f64 {
        self.indices
            .iter()
            .zip(self.weights.iter())
            .map(|(&i, &w)| w * f64::from(contestant.attributes()[i]))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FightOutcome {
    pub stat_indices: [usize; PICKED_STATS],
    pub stat_names: [AttributeCategory; PICKED_STATS],
    pub weights: [f64; PICKED_STATS],
    pub values_a: [u8; PICKED_STATS],
    pub values_b: [u8; PICKED_STATS],
    pub score_a: f64,
    pub score_b: f64,
    pub winner: Side,
}

impl FightOutcome {
    /// The first-sampled stat, which carries the primary weight.
    pub fn primary_stat(&self) -> AttributeCategory {
        self.stat_names[0]
    }

    pub fn score_for(&self, side: Side) -> f64 {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }
}

/// Resolves a fight with freshly sampled stats and weights.
pub fn resolve<R: RandomSource + ?Sized>(a: &Contestant, b: &Contestant, rng: &mut R) -> FightOutcome {
    let picks = StatPicks::sample(rng);
    let outcome = resolve_with(a, b, picks);
    log::debug!(
        "fight resolved: stats={:?} weights={:?} score_a={:.2} score_b={:.2} winner={:?}",
        outcome.stat_names,
        outcome.weights,
        outcome.score_a,
        outcome.score_b,
        outcome.winner
    );
    outcome
}

/// Scores both contestants on fixed picks. Ties go to side A.
pub fn resolve_with(a: &Contestant, b: &Contestant, picks: StatPicks) -> FightOutcome {
    let score_a = picks.score(a);
    let score_b = picks.score(b);
    let winner = if score_a >= score_b { Side::A } else { Side::B };
    let values_at = |c: &Contestant| picks.indices.map(|i| c.attributes()[i]);

    FightOutcome {
        stat_indices: picks.indices,
        stat_names: picks.indices.map(|i| AttributeCategory::ALL[i]),
        weights: picks.weights,
        values_a: values_at(a),
        values_b: values_at(b),
        score_a,
        score_b,
        winner,
    }
}

/// Partial Fisher-Yates over the category indices; the first three slots are the picks.
fn sample_indices<R: RandomSource + ?Sized>(rng: &mut R) -> [usize; PICKED_STATS] {
    let mut pool: [usize; ATTRIBUTE_COUNT] = [0, 1, 2, 3, 4];
    let last = (ATTRIBUTE_COUNT - 1) as u32;
    for k in 0..PICKED_STATS {
        let j = rng.randint(k as u32, last) as usize;
        pool.swap(k, j.min(ATTRIBUTE_COUNT - 1));
    }
    [pool[0], pool[1], pool[2]]
}

/// Primary weight in [0.10, 0.80], secondary bounded so at least 0.01 remains
/// for the third. Drawn in hundredths so the sum is exact before scaling.
fn sample_weights<R: RandomSource + ?Sized>(rng: &mut R) -> [f64; PICKED_STATS] {
    let w1 = rng
        .randint(PRIMARY_WEIGHT_MIN, PRIMARY_WEIGHT_MAX)
        .clamp(PRIMARY_WEIGHT_MIN, PRIMARY_WEIGHT_MAX);
    let max_w2 = SECONDARY_WEIGHT_MAX.min(100 - w1 - TERTIARY_WEIGHT_MARGIN);
    let w2 = rng.randint(0, max_w2).min(max_w2);
    let w3 = 100 - w1 - w2;
    [w1, w2, w3].map(|w| f64::from(w) / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::rng::Rng;

    #[test]
    fn stat_picks_rejects_duplicates_and_bad_weights() {
        assert!(StatPicks::new([0, 0, 1], [0.5, 0.25, 0.25]).is_none());
        assert!(StatPicks::new([0, 1, 5], [0.5, 0.25, 0.25]).is_none());
        assert!(StatPicks::new([0, 1, 2], [0.5, 0.5, 0.5]).is_none());
        assert!(StatPicks::new([0, 1, 2], [1.2, -0.1, -0.1]).is_none());
        assert!(StatPicks::new([0, 1, 2], [f64::NAN, 0.5, 0.5]).is_none());
        assert!(StatPicks::new([4, 2, 0], [0.5, 0.25, 0.25]).is_some());
    }

    #[test]
    fn sampled_weights_respect_bounds() {
        let mut rng = Rng::new(5);
        for _ in 0..5_000 {
            let [w1, w2, w3] = sample_weights(&mut rng);
            assert!((0.10..=0.80).contains(&w1), "w1 {w1}");
            assert!((0.0..=0.90).contains(&w2), "w2 {w2}");
            assert!(w3 >= 0.01 - 1e-12, "w3 {w3}");
            assert!((w1 + w2 + w3 - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn sampled_indices_are_distinct() {
        let mut rng = Rng::new(8);
        for _ in 0..5_000 {
            let [i, j, k] = sample_indices(&mut rng);
            assert!(i < 5 && j < 5 && k < 5);
            assert!(i != j && i != k && j != k);
        }
    }

    #[test]
    fn every_category_can_be_primary() {
        let mut rng = Rng::new(13);
        let mut seen = [false; ATTRIBUTE_COUNT];
        for _ in 0..2_000 {
            seen[sample_indices(&mut rng)[0]] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn tie_goes_to_a() {
        let a = Contestant::from_attributes([50, 50, 50, 50, 50]);
        let picks = StatPicks::new([0, 1, 2], [0.4, 0.3, 0.3]).unwrap();
        let outcome = resolve_with(&a, &a, picks);
        assert_eq!(outcome.score_a, outcome.score_b);
        assert_eq!(outcome.winner, Side::A);
    }
}
