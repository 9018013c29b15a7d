//! Monte Carlo batch runner: plays many independent rounds under a fixed
//! betting strategy and reports how the house and the player fared.

use rayon::prelude::*;
use serde::Serialize;

use crate::combat::{derive_seed, Contestant, Rng, Side};
use crate::config::GameConfig;
use crate::round::Round;
use crate::wager::OddsInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BettingStrategy {
    AlwaysA,
    AlwaysB,
    /// Back the contestant with the higher attribute total (A when level).
    Favorite,
    /// Back the side with the longer odds before the player's stake.
    Underdog,
}

impl Default for BettingStrategy {
    fn default() -> Self {
        Self::Favorite
    }
}

impl BettingStrategy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "a" | "always_a" => Some(Self::AlwaysA),
            "b" | "always_b" => Some(Self::AlwaysB),
            "favorite" => Some(Self::Favorite),
            "underdog" => Some(Self::Underdog),
            _ => None,
        }
    }

    pub fn pick(self, a: &Contestant, b: &Contestant, odds: &OddsInfo) -> Side {
        match self {
            Self::AlwaysA => Side::A,
            Self::AlwaysB => Side::B,
            Self::Favorite => {
                if b.total() > a.total() {
                    Side::B
                } else {
                    Side::A
                }
            }
            Self::Underdog => odds.underdog(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub rounds: usize,
    pub seed: u64,
    pub strategy: BettingStrategy,
    /// Stake placed every round. The player is given exactly this balance.
    pub bet: u64,
    pub game: GameConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: 1000,
            seed: 0,
            strategy: BettingStrategy::default(),
            bet: 100,
            game: GameConfig::default(),
        }
    }
}

/// Per-round counters. Merged associatively so batches can be summed in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoundTally {
    pub rounds: u64,
    pub a_wins: u64,
    pub ties: u64,
    pub player_wins: u64,
    pub rejected: u64,
    pub total_staked: u64,
    pub total_returned: u64,
    pub multiplier_sum: f64,
}

impl RoundTally {
    pub fn merge(mut self, other: RoundTally) -> RoundTally {
        self.rounds += other.rounds;
        self.a_wins += other.a_wins;
        self.ties += other.ties;
        self.player_wins += other.player_wins;
        self.rejected += other.rejected;
        self.total_staked = self.total_staked.saturating_add(other.total_staked);
        self.total_returned = self.total_returned.saturating_add(other.total_returned);
        self.multiplier_sum += other.multiplier_sum;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub rounds: u64,
    pub seed: u64,
    pub strategy: BettingStrategy,
    pub bet: u64,
    pub a_win_rate: f64,
    pub tie_rate: f64,
    pub player_win_rate: f64,
    pub rejected_rounds: u64,
    pub total_staked: u64,
    pub total_returned: u64,
    /// Returned / staked. 0 when nothing was staked.
    pub return_to_player: f64,
    pub avg_multiplier: f64,
}

impl SimulationReport {
    pub fn from_tally(config: &SimulationConfig, tally: RoundTally) -> Self {
        let rate = |count: u64| {
            if tally.rounds == 0 {
                0.0
            } else {
                count as f64 / tally.rounds as f64
            }
        };
        let settled = tally.rounds.saturating_sub(tally.rejected);
        let return_to_player = if tally.total_staked == 0 {
            0.0
        } else {
            tally.total_returned as f64 / tally.total_staked as f64
        };
        let avg_multiplier = if settled == 0 {
            0.0
        } else {
            tally.multiplier_sum / settled as f64
        };
        Self {
            rounds: tally.rounds,
            seed: config.seed,
            strategy: config.strategy,
            bet: config.bet,
            a_win_rate: rate(tally.a_wins),
            tie_rate: rate(tally.ties),
            player_win_rate: rate(tally.player_wins),
            rejected_rounds: tally.rejected,
            total_staked: tally.total_staked,
            total_returned: tally.total_returned,
            return_to_player,
            avg_multiplier,
        }
    }
}

pub fn run_simulation(config: &SimulationConfig) -> SimulationReport {
    run_simulation_with_parallelism(config, false)
}

/// Like [run_simulation] but spreads rounds across all CPU cores via Rayon.
/// Same seed gives the same report as the serial runner.
pub fn run_simulation_parallel(config: &SimulationConfig) -> SimulationReport {
    run_simulation_with_parallelism(config, true)
}

fn run_simulation_with_parallelism(config: &SimulationConfig, parallel: bool) -> SimulationReport {
    let tally = simulate_range(config, 0, config.rounds, parallel);
    let report = SimulationReport::from_tally(config, tally);
    log::info!(
        "simulated {} rounds ({:?}): a_win_rate={:.4} player_win_rate={:.4} rtp={:.4}",
        report.rounds,
        report.strategy,
        report.a_win_rate,
        report.player_win_rate,
        report.return_to_player
    );
    report
}

/// Plays rounds `[start, end)`. Each round seeds its own generator from
/// `(config.seed, index)`, so results do not depend on how rounds are split.
pub fn simulate_range(config: &SimulationConfig, start: usize, end: usize, parallel: bool) -> RoundTally {
    let play = |index: usize| play_round(config, index as u64);
    if parallel {
        (start..end)
            .into_par_iter()
            .map(play)
            .reduce(RoundTally::default, RoundTally::merge)
    } else {
        (start..end).map(play).fold(RoundTally::default(), RoundTally::merge)
    }
}

fn play_round(config: &SimulationConfig, index: u64) -> RoundTally {
    let mut rng = Rng::new(derive_seed(config.seed, index));
    let mut round = Round::new(&mut rng, config.game);
    let side = config
        .strategy
        .pick(round.contestant(Side::A), round.contestant(Side::B), round.odds());

    let mut tally = RoundTally {
        rounds: 1,
        ..RoundTally::default()
    };

    let placed = round.select_side(side).map(|_| ());
    if let Err(err) = placed.and_then(|()| round.set_bet_amount(config.bet, config.bet).map(|_| ())) {
        log::warn!("round {index} rejected: {err}");
        tally.rejected = 1;
        return tally;
    }

    match round.play(&mut rng, config.bet) {
        Ok(settlement) => {
            let outcome = &settlement.outcome;
            if outcome.winner == Side::A {
                tally.a_wins = 1;
            }
            if outcome.score_a == outcome.score_b {
                tally.ties = 1;
            }
            if settlement.won {
                tally.player_wins = 1;
            }
            tally.total_staked = settlement.bet;
            tally.total_returned = settlement.winnings;
            tally.multiplier_sum = settlement.multiplier;
        }
        Err(err) => {
            log::debug!("round {index} rejected: {err}");
            tally.rejected = 1;
        }
    }
    tally
}
