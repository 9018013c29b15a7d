use serde::Serialize;

use crate::combat::{RandomSource, Side};
use crate::config::PopulationConfig;

/// One simulated bettor's stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WagerEntry {
    pub side: Side,
    pub amount: u64,
}

impl WagerEntry {
    /// Zero stakes are bumped to 1 so every entry stays positive.
    pub fn new(side: Side, amount: u64) -> Self {
        Self {
            side,
            amount: amount.max(1),
        }
    }
}

/// Default pool: 5..=20 bettors, one seeded per side.
pub fn generate_population<R: RandomSource + ?Sized>(rng: &mut R) -> Vec<WagerEntry> {
    generate_population_with(rng, &PopulationConfig::default())
}

pub fn generate_population_with<R: RandomSource + ?Sized>(
    rng: &mut R,
    config: &PopulationConfig,
) -> Vec<WagerEntry> {
    let size = rng.randint(config.size.min, config.size.max) as usize;
    let mut population = Vec::with_capacity(size.max(2));

    if config.guarantee_both_sides {
        for side in [Side::A, Side::B] {
            let amount = rng.randint(config.guaranteed_stake.min, config.guaranteed_stake.max);
            population.push(WagerEntry::new(side, u64::from(amount)));
        }
    }

    while population.len() < size {
        let side = if rng.randint(0, 1) == 0 { Side::A } else { Side::B };
        let amount = rng.randint(config.stake.min, config.stake.max);
        population.push(WagerEntry::new(side, u64::from(amount)));
    }

    population
}
