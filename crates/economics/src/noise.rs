use rand::{Rng, SeedableRng, rngs::StdRng};

/// Upper bound (exclusive) of the seasonal phase shift.
pub const MAX_SEASONAL_SHIFT: f64 = 4.0;
/// Half-width of the multiplicative jitter applied per month and per day.
pub const JITTER_AMPLITUDE: f64 = 0.025;

/// Source of the random inputs of price synthesis.
///
/// Generation draws one [`seasonal_shift`](Self::seasonal_shift) per call and
/// two [`jitter`](Self::jitter) values per day, monthly first.
pub trait PriceNoise {
    /// Phase shift of the seasonal curve, in `[0, 4)`.
    fn seasonal_shift(&mut self) -> f64;
    /// Jitter offset in `[-0.025, 0.025)`; the factor applied is `1 + jitter`.
    fn jitter(&mut self) -> f64;
}

/// [`PriceNoise`] drawing uniform values from a random number generator.
#[derive(Debug, Clone)]
pub struct RngNoise<R> {
    rng: R,
}

impl<R: Rng> RngNoise<R> {
    /// Wrap an existing generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngNoise<StdRng> {
    /// Reproducible noise for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Noise seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> PriceNoise for RngNoise<R> {
    fn seasonal_shift(&mut self) -> f64 {
        self.rng.random_range(0.0..MAX_SEASONAL_SHIFT)
    }

    fn jitter(&mut self) -> f64 {
        self.rng.random_range(-JITTER_AMPLITUDE..JITTER_AMPLITUDE)
    }
}

/// [`PriceNoise`] returning constant values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedNoise {
    /// Returned by every `seasonal_shift` call
    pub shift: f64,
    /// Returned by every `jitter` call
    pub jitter: f64,
}

impl FixedNoise {
    /// No shift and no jitter: prices follow the bare seasonal curve.
    pub const NONE: Self = Self { shift: 0.0, jitter: 0.0 };
}

impl PriceNoise for FixedNoise {
    fn seasonal_shift(&mut self) -> f64 {
        self.shift
    }

    fn jitter(&mut self) -> f64 {
        self.jitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_range() {
        let mut noise = RngNoise::seeded(7);
        for _ in 0..10_000 {
            let shift = noise.seasonal_shift();
            assert!((0.0..MAX_SEASONAL_SHIFT).contains(&shift));
            let jitter = noise.jitter();
            assert!((-JITTER_AMPLITUDE..JITTER_AMPLITUDE).contains(&jitter));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RngNoise::seeded(42);
        let mut b = RngNoise::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.jitter(), b.jitter());
        }
        assert_eq!(a.seasonal_shift(), b.seasonal_shift());
    }

    #[test]
    fn fixed_noise_is_constant() {
        let mut noise = FixedNoise { shift: 1.5, jitter: -0.01 };
        assert_eq!(noise.seasonal_shift(), 1.5);
        assert_eq!(noise.jitter(), -0.01);
        assert_eq!(noise.jitter(), -0.01);
    }
}
