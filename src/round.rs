//! Caller-side round state: contestants, wager pool, the player's pending bet
//! and the phase machine Betting -> Fighting -> Result.
//!
//! The point balance is owned by whoever persists it; it is passed in when a
//! fight starts and the settlement reports the balance to write back.

use serde::Serialize;

use crate::combat::{create_contestant, resolve, Contestant, FightOutcome, RandomSource, Side};
use crate::config::GameConfig;
use crate::wager::{
    compute_odds_with, generate_population_with, try_compute_winnings, OddsInfo, UserStake,
    WagerEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Betting,
    Fighting,
    Result,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoundError {
    #[error("action not allowed in {actual:?} phase (expected {expected:?})")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("no side selected")]
    NoSideSelected,

    #[error("bet must be positive")]
    ZeroBet,

    #[error("bet {bet} exceeds balance {balance}")]
    InsufficientBalance { bet: u64, balance: u64 },

    #[error("odds multiplier is not usable: {0}")]
    DegenerateOdds(f64),

    #[error("settlement rejected: {0}")]
    InvalidSettlement(String),
}

/// Result of a settled fight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settlement {
    pub outcome: FightOutcome,
    pub side: Side,
    pub bet: u64,
    pub multiplier: f64,
    pub won: bool,
    pub winnings: u64,
    pub balance_before: u64,
    pub new_balance: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Round {
    contestant_a: Contestant,
    contestant_b: Contestant,
    population: Vec<WagerEntry>,
    odds: OddsInfo,
    selected: Option<Side>,
    bet_amount: u64,
    phase: Phase,
    /// Balance captured when the fight started.
    staked_balance: Option<u64>,
    settlement: Option<Settlement>,
    #[serde(skip)]
    config: GameConfig,
}

impl Round {
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R, config: GameConfig) -> Self {
        let contestant_a = create_contestant(rng);
        let contestant_b = create_contestant(rng);
        Self::with_contestants(rng, config, contestant_a, contestant_b)
    }

    /// Starts a round on given contestants with a freshly generated pool.
    pub fn with_contestants<R: RandomSource + ?Sized>(
        rng: &mut R,
        config: GameConfig,
        contestant_a: Contestant,
        contestant_b: Contestant,
    ) -> Self {
        let population = generate_population_with(rng, &config.population);
        Self::with_population(config, contestant_a, contestant_b, population)
    }

    pub fn with_population(
        config: GameConfig,
        contestant_a: Contestant,
        contestant_b: Contestant,
        population: Vec<WagerEntry>,
    ) -> Self {
        let odds = compute_odds_with(&population, None, &config.odds);
        Self {
            contestant_a,
            contestant_b,
            population,
            odds,
            selected: None,
            bet_amount: 0,
            phase: Phase::Betting,
            staked_balance: None,
            settlement: None,
            config,
        }
    }

    pub fn contestant(&self, side: Side) -> &Contestant {
        match side {
            Side::A => &self.contestant_a,
            Side::B => &self.contestant_b,
        }
    }

    pub fn population(&self) -> &[WagerEntry] {
        &self.population
    }

    pub fn odds(&self) -> &OddsInfo {
        &self.odds
    }

    pub fn selected_side(&self) -> Option<Side> {
        self.selected
    }

    pub fn bet_amount(&self) -> u64 {
        self.bet_amount
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    pub fn select_side(&mut self, side: Side) -> Result<&OddsInfo, RoundError> {
        self.expect_phase(Phase::Betting)?;
        self.selected = Some(side);
        self.refresh_odds();
        Ok(&self.odds)
    }

    /// Sets the pending bet, clamped to `[0, balance]`. Returns the stored amount.
    pub fn set_bet_amount(&mut self, amount: u64, balance: u64) -> Result<u64, RoundError> {
        self.expect_phase(Phase::Betting)?;
        self.bet_amount = amount.min(balance);
        self.refresh_odds();
        Ok(self.bet_amount)
    }

    /// Validates the pending bet and freezes the round. Odds no longer change
    /// until the round settles.
    pub fn begin_fight(&mut self, balance: u64) -> Result<(), RoundError> {
        self.expect_phase(Phase::Betting)?;
        if self.selected.is_none() {
            return Err(RoundError::NoSideSelected);
        }
        if self.bet_amount == 0 {
            return Err(RoundError::ZeroBet);
        }
        if self.bet_amount > balance {
            return Err(RoundError::InsufficientBalance {
                bet: self.bet_amount,
                balance,
            });
        }
        let multiplier = self.current_multiplier();
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(RoundError::DegenerateOdds(multiplier));
        }
        self.staked_balance = Some(balance);
        self.phase = Phase::Fighting;
        Ok(())
    }

    /// Resolves the frozen fight and settles the bet. A rejected settlement
    /// sends the round back to betting with the balance untouched.
    pub fn settle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<&Settlement, RoundError> {
        self.expect_phase(Phase::Fighting)?;
        let (Some(side), Some(balance)) = (self.selected, self.staked_balance) else {
            self.phase = Phase::Betting;
            return Err(RoundError::NoSideSelected);
        };
        let outcome = resolve(&self.contestant_a, &self.contestant_b, rng);
        let settlement = match self.build_settlement(outcome, side, balance) {
            Ok(settlement) => settlement,
            Err(err) => {
                log::warn!("{err}");
                self.phase = Phase::Betting;
                self.staked_balance = None;
                return Err(err);
            }
        };
        self.phase = Phase::Result;
        let settlement = self.settlement.insert(settlement);
        Ok(&*settlement)
    }

    /// [begin_fight](Round::begin_fight) then [settle](Round::settle).
    pub fn play<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        balance: u64,
    ) -> Result<&Settlement, RoundError> {
        self.begin_fight(balance)?;
        self.settle(rng)
    }

    /// New contestants, new pool, cleared selection. Not allowed mid-fight.
    pub fn next_round<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<(), RoundError> {
        if self.phase == Phase::Fighting {
            return Err(RoundError::WrongPhase {
                expected: Phase::Result,
                actual: self.phase,
            });
        }
        *self = Self::new(rng, self.config);
        Ok(())
    }

    fn build_settlement(
        &self,
        outcome: FightOutcome,
        side: Side,
        balance: u64,
    ) -> Result<Settlement, RoundError> {
        let multiplier = self.current_multiplier();
        let won = outcome.winner == side;
        let winnings = if won {
            try_compute_winnings(self.bet_amount as f64, multiplier)
                .map_err(|err| RoundError::InvalidSettlement(err.to_string()))?
        } else {
            0
        };
        let new_balance = balance
            .checked_sub(self.bet_amount)
            .and_then(|rest| rest.checked_add(winnings))
            .ok_or_else(|| {
                RoundError::InvalidSettlement(format!(
                    "balance {balance} - bet {} + winnings {winnings} is out of range",
                    self.bet_amount
                ))
            })?;

        log::debug!(
            "settled: side={side} bet={} won={won} winnings={winnings} balance {balance} -> {new_balance}",
            self.bet_amount
        );

        Ok(Settlement {
            outcome,
            side,
            bet: self.bet_amount,
            multiplier,
            won,
            winnings,
            balance_before: balance,
            new_balance,
        })
    }

    fn current_multiplier(&self) -> f64 {
        self.selected
            .map(|side| self.odds.multiplier_for(side))
            .unwrap_or(0.0)
    }

    fn refresh_odds(&mut self) {
        let user = self
            .selected
            .map(|side| UserStake::new(side, self.bet_amount));
        self.odds = compute_odds_with(&self.population, user, &self.config.odds);
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), RoundError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RoundError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}
