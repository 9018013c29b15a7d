pub mod contestant;
pub mod resolver;
pub mod rng;
pub mod tier;

pub use contestant::{
    create_contestant, AttributeCategory, Contestant, Side, ATTRIBUTE_COUNT, ATTRIBUTE_MAX,
    ATTRIBUTE_MIN,
};
pub use resolver::{resolve, resolve_with, FightOutcome, StatPicks, PICKED_STATS};
pub use rng::{derive_seed, RandomSource, Rng};
pub use tier::{classify, Tier};
