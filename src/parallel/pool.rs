//! Rayon thread pool sizing for simulation batches.
//!
//! Use [WorkerPool::install] to run a batch with a fixed number of threads,
//! or rely on Rayon's default (all CPU cores).

use rayon::ThreadPoolBuilder;

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use the Rayon default.
    pub workers: usize,
}

impl WorkerPool {
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run `f` on a pool of [workers](WorkerPool::workers) threads. With 0 workers,
    /// or if the dedicated pool cannot be built, runs on the global Rayon pool.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(err) => {
                log::warn!("could not build {}-thread pool ({err}), using global pool", self.workers);
                f()
            }
        }
    }
}
