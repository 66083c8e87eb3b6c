// Heston stochastic-variance paths
//
// Per step, with correlated shocks z1 and w = rho*z1 + sqrt(1 - rho^2)*z2:
//   v[i] = max(v[i-1] + kappa*(theta - v[i-1])*dt + xi*sqrt(v[i-1]*dt)*w, 0)
//   S[i] = S[i-1] * exp((mu - v[i-1]/2)*dt + sqrt(v[i-1]*dt)*z1)

use crate::config::{HestonParameters, SimulationParameters};
use crate::error::SimulationResult;
use crate::noise::NoiseSource;
use crate::simulation::model::{checked_price, PathModel};
use crate::simulation::path::{PricePath, StochasticVolPath};

/// Heston process: price settings from the GBM block plus variance dynamics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HestonModel {
    pub base: SimulationParameters,
    pub heston: HestonParameters,
}

impl HestonModel {
    pub fn new(base: SimulationParameters, heston: HestonParameters) -> Self {
        Self { base, heston }
    }
}

/// Generate one Heston path with its variance path.
///
/// Draws two normals per step, price shock first.
pub fn simulate_heston_path<N: NoiseSource + ?Sized>(
    model: &HestonModel,
    noise: &mut N,
) -> SimulationResult<StochasticVolPath> {
    model.validate()?;
    heston_path(model, noise)
}

fn heston_path<N: NoiseSource + ?Sized>(model: &HestonModel, noise: &mut N) -> SimulationResult<StochasticVolPath> {
    let base = &model.base;
    let h = &model.heston;
    let num_steps = base.step_count();
    let dt = base.time_step;

    let mut prices = Vec::with_capacity(num_steps);
    let mut variance = Vec::with_capacity(num_steps);
    if num_steps > 0 {
        prices.push(base.initial_price);
        variance.push(h.initial_variance);
    }

    let rho_complement = (1.0 - h.correlation * h.correlation).sqrt();
    for step in 1..num_steps {
        let z1 = noise.next_standard_normal();
        let z2 = h.correlation * z1 + rho_complement * noise.next_standard_normal();

        let v_prev = variance[step - 1];
        let s_prev = prices[step - 1];
        let diffusion = (v_prev * dt).sqrt();

        let v_next = (v_prev
            + h.mean_reversion * (h.long_term_variance - v_prev) * dt
            + h.vol_of_variance * diffusion * z2)
            .max(0.0);
        let s_next = s_prev * ((base.drift - 0.5 * v_prev) * dt + diffusion * z1).exp();

        prices.push(checked_price(step, s_next)?);
        variance.push(v_next);
    }

    Ok(StochasticVolPath {
        prices: PricePath::new(prices, dt),
        factor: variance,
    })
}

impl PathModel for HestonModel {
    fn validate(&self) -> SimulationResult<()> {
        self.base.validate()?;
        self.heston.validate()
    }

    fn sample_path<N: NoiseSource + ?Sized>(&self, noise: &mut N) -> SimulationResult<PricePath> {
        Ok(heston_path(self, noise)?.prices)
    }

    fn step_count(&self) -> usize {
        self.base.step_count()
    }
}
