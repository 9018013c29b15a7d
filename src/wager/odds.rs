//! Parimutuel odds: each side pays out total pool / own stake, with both
//! totals floored before dividing and each ratio capped.

use serde::Serialize;

use crate::combat::Side;
use crate::config::OddsConfig;
use crate::wager::population::WagerEntry;

/// The player's pending bet, folded into the pool when odds are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserStake {
    pub side: Side,
    pub amount: u64,
}

impl UserStake {
    pub fn new(side: Side, amount: u64) -> Self {
        Self { side, amount }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsInfo {
    /// Raw per-side totals, user stake included.
    pub bet_a: u64,
    pub bet_b: u64,
    /// Totals after the floor, as used for division.
    pub floored_a: u64,
    pub floored_b: u64,
    pub odds_a: f64,
    pub odds_b: f64,
    pub display_a: String,
    pub display_b: String,
}

impl OddsInfo {
    /// Payout multiplier for a winning bet on `side`.
    pub fn multiplier_for(&self, side: Side) -> f64 {
        match side {
            Side::A => self.odds_a,
            Side::B => self.odds_b,
        }
    }

    pub fn total_for(&self, side: Side) -> u64 {
        match side {
            Side::A => self.bet_a,
            Side::B => self.bet_b,
        }
    }

    pub fn display_for(&self, side: Side) -> &str {
        match side {
            Side::A => &self.display_a,
            Side::B => &self.display_b,
        }
    }

    /// Side with the longer odds; A when level.
    pub fn underdog(&self) -> Side {
        if self.odds_b > self.odds_a {
            Side::B
        } else {
            Side::A
        }
    }

    pub fn pool_total(&self) -> u64 {
        self.bet_a.saturating_add(self.bet_b)
    }
}

/// Sum of stakes per side, `(a, b)`.
pub fn side_totals(population: &[WagerEntry]) -> (u64, u64) {
    population.iter().fold((0u64, 0u64), |(a, b), entry| match entry.side {
        Side::A => (a.saturating_add(entry.amount), b),
        Side::B => (a, b.saturating_add(entry.amount)),
    })
}

/// Default odds: floor 1, cap 10.0.
pub fn compute_odds(population: &[WagerEntry], user: Option<UserStake>) -> OddsInfo {
    compute_odds_with(population, user, &OddsConfig::default())
}

pub fn compute_odds_with(
    population: &[WagerEntry],
    user: Option<UserStake>,
    config: &OddsConfig,
) -> OddsInfo {
    let (mut bet_a, mut bet_b) = side_totals(population);
    match user {
        Some(UserStake { side: Side::A, amount }) => bet_a = bet_a.saturating_add(amount),
        Some(UserStake { side: Side::B, amount }) => bet_b = bet_b.saturating_add(amount),
        None => {}
    }

    let floor = config.min_side_total.max(1);
    let floored_a = bet_a.max(floor);
    let floored_b = bet_b.max(floor);
    let pool = floored_a as f64 + floored_b as f64;

    let odds_a = cap_ratio(pool / floored_a as f64, config.max_odds);
    let odds_b = cap_ratio(pool / floored_b as f64, config.max_odds);

    log::debug!("odds: bet_a={bet_a} bet_b={bet_b} odds_a={odds_a:.4} odds_b={odds_b:.4}");

    OddsInfo {
        bet_a,
        bet_b,
        floored_a,
        floored_b,
        odds_a,
        odds_b,
        display_a: format_odds(odds_a),
        display_b: format_odds(odds_b),
    }
}

/// `1:x.xx` display form.
pub fn format_odds(ratio: f64) -> String {
    format!("1:{ratio:.2}")
}

fn cap_ratio(ratio: f64, cap: Option<f64>) -> f64 {
    match cap {
        Some(cap) if cap.is_finite() => ratio.min(cap),
        _ => ratio,
    }
}
