// Path generator that owns its noise source, plus batch generation

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::error::{SimulationError, SimulationResult};
use crate::noise::{GaussianNoise, NoiseSource};
use crate::progress::BatchProgress;
use crate::simulation::model::PathModel;
use crate::simulation::path::PricePath;

/// Path generator owning its noise source
pub struct PathSimulator<N: NoiseSource = GaussianNoise<StdRng>> {
    noise: N,
}

impl PathSimulator<GaussianNoise<StdRng>> {
    /// Simulator seeded once from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(GaussianNoise::from_entropy())
    }
}

impl Default for PathSimulator<GaussianNoise<StdRng>> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<N: NoiseSource> PathSimulator<N> {
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    pub fn simulate<M: PathModel>(&mut self, model: &M) -> SimulationResult<PricePath> {
        model.validate()?;
        self.sample(model)
    }

    fn sample<M: PathModel>(&mut self, model: &M) -> SimulationResult<PricePath> {
        let path = model.sample_path(&mut self.noise)?;
        debug!(
            points = path.len(),
            last_price = path.last().unwrap_or(f64::NAN),
            "simulated path"
        );
        Ok(path)
    }

    pub fn into_noise(self) -> N {
        self.noise
    }
}

/// Generate `count` independent paths, each from its own entropy-seeded generator
pub fn simulate_batch<M: PathModel>(model: &M, count: usize) -> SimulationResult<Vec<PricePath>> {
    simulate_batch_with(model, count, GaussianNoise::from_entropy, None)
}

/// Batch generation with a caller-supplied factory for per-path noise sources
pub fn simulate_batch_with<M, N, F>(
    model: &M,
    count: usize,
    mut make_noise: F,
    progress: Option<&BatchProgress>,
) -> SimulationResult<Vec<PricePath>>
where
    M: PathModel,
    N: NoiseSource,
    F: FnMut() -> N,
{
    if count == 0 {
        return Err(SimulationError::invalid_parameter("paths", "must be greater than 0"));
    }
    model.validate()?;

    info!(
        paths = count,
        steps = model.step_count(),
        "🎲 Simulating paths"
    );

    let mut paths = Vec::new();
    for _ in 0..count {
        let mut simulator = PathSimulator::new(make_noise());
        paths.push(simulator.sample(model)?);
        if let Some(progress) = progress {
            progress.inc();
        }
    }

    if let Some(progress) = progress {
        progress.finish(count);
    }
    Ok(paths)
}
