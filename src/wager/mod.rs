pub mod odds;
pub mod payout;
pub mod population;

pub use odds::{compute_odds, compute_odds_with, format_odds, side_totals, OddsInfo, UserStake};
pub use payout::{compute_winnings, try_compute_winnings, PayoutError};
pub use population::{generate_population, generate_population_with, WagerEntry};
