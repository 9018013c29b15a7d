//! Random source for fights and wager pools. [Rng] is a SplitMix64 generator:
//! same seed produces the same sequence. Not cryptographically secure.

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

/// 2^-53, maps the top 53 bits of a `u64` onto [0, 1).
const UNIT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

/// Uniform sampling seam. Implementors provide a [0, 1) draw; `randint` is
/// derived from it by floor-scaling and may be overridden by scripted sources.
pub trait RandomSource {
    /// Uniform value in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in the closed interval `[min, max]`.
    /// Reversed bounds are swapped rather than rejected.
    fn randint(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = f64::from(hi - lo) + 1.0;
        let offset = (self.next_f64() * span).floor() as u32;
        lo + offset.min(hi - lo)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn randint(&mut self, min: u32, max: u32) -> u32 {
        (**self).randint(min, max)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seeds from the operating system. Falls back to a fixed seed if the OS
    /// source is unavailable, which only costs unpredictability.
    pub fn from_entropy() -> Self {
        let mut bytes = [0u8; 8];
        match getrandom::getrandom(&mut bytes) {
            Ok(()) => Self::new(u64::from_le_bytes(bytes)),
            Err(err) => {
                log::warn!("os entropy unavailable ({err}), using fixed seed");
                Self::new(SPLITMIX64_GOLDEN)
            }
        }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }
}

impl RandomSource for Rng {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * UNIT_SCALE
    }
}

/// Stable per-item seed derived from a base seed, so parallel runs stay reproducible.
pub fn derive_seed(base_seed: u64, index: u64) -> u64 {
    let mut rng = Rng::new(base_seed ^ index.wrapping_mul(SPLITMIX64_M1));
    rng.next_u64()
}
