// Common test utilities and helpers

#![allow(dead_code)]

use gbm_sim::{GaussianNoise, SimulationConfig, SimulationParameters};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Reference run: S0=100, mu=0.05, sigma=0.2, T=1, dt=0.01
pub fn reference_params() -> SimulationParameters {
    SimulationParameters::default()
}

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.run.show_progress = false;
    config.logging.level = "warn".to_string();
    config
}

/// Seeded noise source so statistical tests are stable
pub fn seeded_noise(seed: u64) -> GaussianNoise<StdRng> {
    GaussianNoise::new(StdRng::seed_from_u64(seed))
}

/// Absolute-or-relative closeness check for floating point comparisons
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance * scale,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}
