//! Standard-normal noise sources that drive the price recurrences
//!
//! The simulators only ever ask for "the next N(0, 1) draw", so anything that
//! can answer that question can drive a path: a seeded `rand` generator in
//! production, a fixed list of draws in tests, or a closure wrapped in
//! `FnNoise`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of standard-normal samples (mean 0, variance 1)
pub trait NoiseSource {
    fn next_standard_normal(&mut self) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn next_standard_normal(&mut self) -> f64 {
        (**self).next_standard_normal()
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn next_standard_normal(&mut self) -> f64 {
        (**self).next_standard_normal()
    }
}

/// Gaussian draws from a `rand` generator
#[derive(Debug, Clone)]
pub struct GaussianNoise<R: Rng> {
    rng: R,
}

impl<R: Rng> GaussianNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl GaussianNoise<StdRng> {
    /// Generator seeded once from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> NoiseSource for GaussianNoise<R> {
    fn next_standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
/// An empty sequence yields 0.0 forever.
#[derive(Debug, Clone, Default)]
pub struct FixedNoise {
    draws: Vec<f64>,
    position: usize,
}

impl FixedNoise {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }

    /// Number of draws handed out so far
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl NoiseSource for FixedNoise {
    fn next_standard_normal(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.position % self.draws.len()];
        self.position += 1;
        value
    }
}

/// Closure adapter: each call to the closure is one draw
#[derive(Debug, Clone)]
pub struct FnNoise<F>(pub F);

impl<F: FnMut() -> f64> NoiseSource for FnNoise<F> {
    fn next_standard_normal(&mut self) -> f64 {
        (self.0)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_noise_cycles() {
        let mut noise = FixedNoise::new(vec![1.0, -0.5]);
        let draws: Vec<f64> = (0..5).map(|_| noise.next_standard_normal()).collect();
        assert_eq!(draws, vec![1.0, -0.5, 1.0, -0.5, 1.0]);
        assert_eq!(noise.consumed(), 5);
    }

    #[test]
    fn test_empty_fixed_noise_is_zero() {
        let mut noise = FixedNoise::default();
        assert_eq!(noise.next_standard_normal(), 0.0);
        assert_eq!(noise.consumed(), 0);
    }

    #[test]
    fn test_closure_as_noise_source() {
        let mut counter = 0.0;
        let mut source = FnNoise(|| {
            counter += 1.0;
            counter
        });
        assert_eq!(source.next_standard_normal(), 1.0);
        assert_eq!(source.next_standard_normal(), 2.0);
    }

    fn first_draw<N: NoiseSource>(mut noise: N) -> f64 {
        noise.next_standard_normal()
    }

    #[test]
    fn test_borrowed_and_boxed_sources() {
        let mut fixed = FixedNoise::new(vec![0.25, 0.75]);
        assert_eq!(first_draw(&mut fixed), 0.25);
        assert_eq!(fixed.consumed(), 1);

        let boxed: Box<dyn NoiseSource> = Box::new(fixed);
        assert_eq!(first_draw(boxed), 0.75);
    }

    #[test]
    fn test_seeded_gaussian_is_repeatable() {
        let mut a = GaussianNoise::new(StdRng::seed_from_u64(7));
        let mut b = GaussianNoise::new(StdRng::seed_from_u64(7));
        for _ in 0..10 {
            assert_eq!(a.next_standard_normal(), b.next_standard_normal());
        }
    }

    #[test]
    fn test_gaussian_moments() {
        let mut noise = GaussianNoise::new(StdRng::seed_from_u64(42));
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| noise.next_standard_normal()).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

        assert!(mean.abs() < 0.05, "mean {} too far from 0", mean);
        assert!((variance - 1.0).abs() < 0.05, "variance {} too far from 1", variance);
    }
}
