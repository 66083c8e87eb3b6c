// SABR stochastic-volatility paths
//
// Brownian increments dW1 = sqrt(dt)*z1 and dW2 = rho*dW1 + sqrt(1 - rho^2)*sqrt(dt)*z2;
//   v[i] = max(v[i-1] + nu * v[i-1]^beta * dW2, 0),  v[0] = alpha
//   S[i] = S[i-1] * exp(alpha * sqrt(dt) * (v[i] + dW1))

use crate::config::{SabrParameters, SimulationParameters};
use crate::error::SimulationResult;
use crate::noise::NoiseSource;
use crate::simulation::model::{checked_price, PathModel};
use crate::simulation::path::{PricePath, StochasticVolPath};

/// SABR process: price settings from the GBM block plus volatility dynamics.
/// The GBM drift and volatility are not used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SabrModel {
    pub base: SimulationParameters,
    pub sabr: SabrParameters,
}

impl SabrModel {
    pub fn new(base: SimulationParameters, sabr: SabrParameters) -> Self {
        Self { base, sabr }
    }
}

/// Generate one SABR path with its volatility path.
///
/// Draws two normals per step, price shock first.
pub fn simulate_sabr_path<N: NoiseSource + ?Sized>(
    model: &SabrModel,
    noise: &mut N,
) -> SimulationResult<StochasticVolPath> {
    model.validate()?;
    sabr_path(model, noise)
}

fn sabr_path<N: NoiseSource + ?Sized>(model: &SabrModel, noise: &mut N) -> SimulationResult<StochasticVolPath> {
    let base = &model.base;
    let p = &model.sabr;
    let num_steps = base.step_count();
    let sqrt_dt = base.time_step.sqrt();

    let mut prices = Vec::with_capacity(num_steps);
    let mut volatility = Vec::with_capacity(num_steps);
    if num_steps > 0 {
        prices.push(base.initial_price);
        volatility.push(p.alpha);
    }

    let rho_complement = (1.0 - p.correlation * p.correlation).sqrt();
    for step in 1..num_steps {
        let dw1 = sqrt_dt * noise.next_standard_normal();
        let dw2 = p.correlation * dw1 + rho_complement * sqrt_dt * noise.next_standard_normal();

        let v_prev = volatility[step - 1];
        let v_next = (v_prev + p.vol_of_vol * v_prev.powf(p.beta) * dw2).max(0.0);
        let s_next = prices[step - 1] * (p.alpha * sqrt_dt * (v_next + dw1)).exp();

        prices.push(checked_price(step, s_next)?);
        volatility.push(v_next);
    }

    Ok(StochasticVolPath {
        prices: PricePath::new(prices, base.time_step),
        factor: volatility,
    })
}

impl PathModel for SabrModel {
    fn validate(&self) -> SimulationResult<()> {
        self.base.validate()?;
        self.sabr.validate()
    }

    fn sample_path<N: NoiseSource + ?Sized>(&self, noise: &mut N) -> SimulationResult<PricePath> {
        Ok(sabr_path(self, noise)?.prices)
    }

    fn step_count(&self) -> usize {
        self.base.step_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FixedNoise;

    fn model() -> SabrModel {
        SabrModel::new(
            SimulationParameters::new(100.0, 0.0, 0.0, 0.03, 0.01),
            SabrParameters::default(),
        )
    }

    #[test]
    fn test_hand_computed_steps() {
        let m = model();
        let mut noise = FixedNoise::new(vec![0.5, 1.0, -1.0, 0.25]);
        let path = simulate_sabr_path(&m, &mut noise).unwrap();
        assert_eq!(noise.consumed(), 4);

        let sqrt_dt = 0.01_f64.sqrt();
        let (alpha, beta, nu) = (0.04_f64, 0.5_f64, 0.2_f64);
        let (mut s, mut v) = (100.0_f64, alpha);
        let mut expected_prices = vec![s];
        let mut expected_vol = vec![v];
        for (z1, z2) in [(0.5, 1.0), (-1.0, 0.25)] {
            let dw1 = sqrt_dt * z1;
            let dw2 = 0.0 * dw1 + 1.0 * sqrt_dt * z2;
            v = (v + nu * v.powf(beta) * dw2).max(0.0);
            s *= (alpha * sqrt_dt * (v + dw1)).exp();
            expected_prices.push(s);
            expected_vol.push(v);
        }

        assert_eq!(path.prices.prices(), expected_prices.as_slice());
        assert_eq!(path.factor, expected_vol);
    }

    #[test]
    fn test_step_longer_than_horizon_is_empty() {
        let mut m = model();
        m.base.time_step = 1.0;
        let path = simulate_sabr_path(&m, &mut FixedNoise::new(vec![1.0])).unwrap();
        assert!(path.prices.is_empty());
        assert!(path.factor.is_empty());
    }

    #[test]
    fn test_beta_out_of_range_rejected() {
        let mut m = model();
        m.sabr.beta = -0.1;
        assert!(simulate_sabr_path(&m, &mut FixedNoise::default()).is_err());
    }
}
