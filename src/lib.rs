//! Chicken Fight: contestant generation, weighted-stat fight resolution,
//! simulated wager pools, parimutuel odds and payout settlement.

pub mod cli;
pub mod combat;
pub mod config;
pub mod parallel;
pub mod round;
pub mod simulation;
pub mod wager;
