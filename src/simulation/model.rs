// Common interface for the price processes

use crate::error::{SimulationError, SimulationResult};
use crate::noise::NoiseSource;
use crate::simulation::path::PricePath;

/// A price process that can generate paths from a noise source
pub trait PathModel {
    /// Check every parameter the process uses
    fn validate(&self) -> SimulationResult<()>;

    /// Generate one path. Parameters must already have passed `validate`.
    fn sample_path<N: NoiseSource + ?Sized>(&self, noise: &mut N) -> SimulationResult<PricePath>;

    /// Number of points a path will hold
    fn step_count(&self) -> usize;
}

/// A price must stay finite and strictly positive
pub(crate) fn checked_price(step: usize, value: f64) -> SimulationResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SimulationError::NumericOverflow { step, value });
    }
    Ok(value)
}
