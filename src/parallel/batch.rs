//! Batch distribution for simulation runs.
//!
//! Splits rounds into batches so long runs can report progress between them.
//! Rounds inside a batch run in parallel.

use crate::parallel::pool::WorkerPool;
use crate::simulation::{simulate_range, RoundTally, SimulationConfig, SimulationReport};

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; earlier batches take the remainder.
///
/// # Example
/// ```
/// # use chicken_fight::parallel::batch_ranges;
/// let ranges = batch_ranges(100, 4);
/// assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + if i < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Runs the simulation in `num_batches` parallel batches on `pool`, calling
/// `on_progress(done, total)` after each. The report equals
/// [crate::simulation::run_simulation] for the same config.
pub fn run_simulation_batches<P>(
    config: &SimulationConfig,
    pool: &WorkerPool,
    num_batches: usize,
    mut on_progress: P,
) -> SimulationReport
where
    P: FnMut(usize, usize) + Send,
{
    let tally = pool.install(|| {
        let mut tally = RoundTally::default();
        for (start, end) in batch_ranges(config.rounds, num_batches) {
            tally = tally.merge(simulate_range(config, start, end, true));
            on_progress(end, config.rounds);
        }
        tally
    });
    SimulationReport::from_tally(config, tally)
}
