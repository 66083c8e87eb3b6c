// Geometric Brownian Motion path generation
//
// Exact lognormal step for dS = mu*S*dt + sigma*S*dW:
//   S[i] = S[i-1] * exp((mu - sigma^2/2)*dt + sigma*sqrt(dt)*Z),  Z ~ N(0, 1)

use tracing::debug;

use crate::config::SimulationParameters;
use crate::error::SimulationResult;
use crate::noise::NoiseSource;
use crate::simulation::model::{checked_price, PathModel};
use crate::simulation::path::PricePath;

/// Generate one path from `params`, drawing from `noise`.
///
/// Consumes `step_count - 1` draws. A step longer than the horizon gives an
/// empty path without touching the noise source.
pub fn simulate_path<N: NoiseSource + ?Sized>(
    params: &SimulationParameters,
    noise: &mut N,
) -> SimulationResult<PricePath> {
    params.validate()?;
    gbm_path(params, noise)
}

fn gbm_path<N: NoiseSource + ?Sized>(params: &SimulationParameters, noise: &mut N) -> SimulationResult<PricePath> {
    let num_steps = params.step_count();
    let mut prices = Vec::with_capacity(num_steps);
    if num_steps == 0 {
        debug!(
            horizon = params.horizon,
            time_step = params.time_step,
            "time step exceeds horizon, returning empty path"
        );
        return Ok(PricePath::new(prices, params.time_step));
    }

    let dt = params.time_step;
    let sqrt_dt = dt.sqrt();
    let drift_term = (params.drift - 0.5 * params.volatility * params.volatility) * dt;

    prices.push(params.initial_price);
    let mut current = params.initial_price;

    for step in 1..num_steps {
        let dw = noise.next_standard_normal() * sqrt_dt; // Brownian increment
        current = checked_price(step, current * (drift_term + params.volatility * dw).exp())?;
        prices.push(current);
    }

    Ok(PricePath::new(prices, dt))
}

impl PathModel for SimulationParameters {
    fn validate(&self) -> SimulationResult<()> {
        SimulationParameters::validate(self)
    }

    fn sample_path<N: NoiseSource + ?Sized>(&self, noise: &mut N) -> SimulationResult<PricePath> {
        gbm_path(self, noise)
    }

    fn step_count(&self) -> usize {
        SimulationParameters::step_count(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;
    use crate::noise::FixedNoise;

    fn params(s0: f64, mu: f64, sigma: f64, t: f64, dt: f64) -> SimulationParameters {
        SimulationParameters::new(s0, mu, sigma, t, dt)
    }

    #[test]
    fn test_flat_path_without_drift_or_volatility() {
        let mut noise = FixedNoise::new(vec![1.3, -2.0]);
        let path = simulate_path(&params(100.0, 0.0, 0.0, 0.02, 0.01), &mut noise).unwrap();
        assert_eq!(path.prices(), &[100.0, 100.0]);
    }

    #[test]
    fn test_step_longer_than_horizon_is_empty() {
        let mut noise = FixedNoise::new(vec![0.5]);
        let path = simulate_path(&params(100.0, 0.05, 0.2, 1.0, 2.0), &mut noise).unwrap();
        assert!(path.is_empty());
        assert_eq!(noise.consumed(), 0);
    }

    #[test]
    fn test_draw_count_matches_steps() {
        let mut noise = FixedNoise::new(vec![0.1, 0.2, 0.3]);
        let path = simulate_path(&params(100.0, 0.05, 0.2, 1.0, 0.1), &mut noise).unwrap();
        assert_eq!(path.len(), 10);
        assert_eq!(noise.consumed(), 9);
    }

    #[test]
    fn test_matches_hand_computed_recurrence() {
        let (s0, mu, sigma, dt) = (50.0, 0.1, 0.3, 0.25);
        let draws = [0.5, -1.0, 2.0];
        let mut noise = FixedNoise::new(draws.to_vec());
        let path = simulate_path(&params(s0, mu, sigma, 1.0, dt), &mut noise).unwrap();

        let mut expected = vec![s0];
        for z in draws {
            let prev = *expected.last().unwrap();
            expected.push(prev * ((mu - 0.5 * sigma * sigma) * dt + sigma * (z * dt.sqrt())).exp());
        }
        assert_eq!(path.prices(), expected.as_slice());
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut noise = FixedNoise::new(vec![1.0e6]);
        let result = simulate_path(&params(100.0, 0.0, 1.0e3, 1.0, 0.5), &mut noise);
        assert!(matches!(result, Err(SimulationError::NumericOverflow { step: 1, .. })));
    }

    #[test]
    fn test_underflow_to_zero_is_reported() {
        // exp(-0.25 - 707) times 1e-300 rounds to 0.0
        let mut noise = FixedNoise::new(vec![-1.0e3]);
        let result = simulate_path(&params(1.0e-300, 0.0, 1.0, 1.0, 0.5), &mut noise);
        match result {
            Err(SimulationError::NumericOverflow { step, value }) => {
                assert_eq!(step, 1);
                assert_eq!(value, 0.0);
            }
            other => panic!("expected NumericOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut noise = FixedNoise::default();
        let result = simulate_path(&params(-1.0, 0.05, 0.2, 1.0, 0.01), &mut noise);
        assert!(matches!(result, Err(SimulationError::InvalidParameter { .. })));
    }

    #[test]
    fn test_oversized_grid_rejected_before_allocation() {
        let mut noise = FixedNoise::default();
        let result = simulate_path(&params(100.0, 0.05, 0.2, 1e19, 1.0), &mut noise);
        assert!(matches!(result, Err(SimulationError::InvalidParameter { ref name, .. }) if name == "time_step"));
    }
}
