// Configuration management for the GBM path simulator

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{SimulationError, SimulationResult};

/// Upper bound on points per path (80 MB of prices)
pub const MAX_STEP_COUNT: usize = 10_000_000;

/// Model parameters for one GBM path
///
/// Heston and SABR runs reuse `initial_price`, `horizon` and `time_step`
/// from this block; Heston also takes `drift`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub initial_price: f64,  // S0
    pub drift: f64,          // mu, per unit time
    pub volatility: f64,     // sigma, per unit time
    pub horizon: f64,        // T
    pub time_step: f64,      // dt
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            drift: 0.05,
            volatility: 0.2,
            horizon: 1.0,    // 1 year
            time_step: 0.01,
        }
    }
}

impl SimulationParameters {
    pub fn new(initial_price: f64, drift: f64, volatility: f64, horizon: f64, time_step: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            horizon,
            time_step,
        }
    }

    /// Number of points in the path: floor(horizon / time_step)
    ///
    /// A time step longer than the horizon gives zero points. Only meaningful
    /// after `validate` has bounded the ratio.
    pub fn step_count(&self) -> usize {
        let steps = (self.horizon / self.time_step).floor();
        if steps.is_finite() && steps > 0.0 {
            steps as usize
        } else {
            0
        }
    }

    /// Check the parameters are usable by the simulator.
    ///
    /// `time_step > horizon` is accepted and yields an empty path.
    pub fn validate(&self) -> SimulationResult<()> {
        ensure_finite(&[
            ("initial_price", self.initial_price),
            ("drift", self.drift),
            ("volatility", self.volatility),
            ("horizon", self.horizon),
            ("time_step", self.time_step),
        ])?;

        if self.initial_price <= 0.0 {
            return Err(SimulationError::invalid_parameter("initial_price", "must be positive"));
        }

        if self.volatility < 0.0 {
            return Err(SimulationError::invalid_parameter("volatility", "must be non-negative"));
        }

        validate_time_grid(self.horizon, self.time_step)
    }
}

/// Reject NaN and infinite values, naming the first offender
pub(crate) fn ensure_finite(fields: &[(&str, f64)]) -> SimulationResult<()> {
    for &(name, value) in fields {
        if !value.is_finite() {
            return Err(SimulationError::invalid_parameter(name, format!("must be finite, got {}", value)));
        }
    }
    Ok(())
}

/// Correlations live in [-1, 1]
pub(crate) fn ensure_correlation(name: &str, rho: f64) -> SimulationResult<()> {
    if !(-1.0..=1.0).contains(&rho) {
        return Err(SimulationError::invalid_parameter(name, "must be within [-1, 1]"));
    }
    Ok(())
}

fn validate_time_grid(horizon: f64, time_step: f64) -> SimulationResult<()> {
    if horizon <= 0.0 {
        return Err(SimulationError::invalid_parameter("horizon", "must be positive"));
    }

    if time_step <= 0.0 {
        return Err(SimulationError::invalid_parameter("time_step", "must be positive"));
    }

    let steps = horizon / time_step;
    if !steps.is_finite() || steps.floor() > MAX_STEP_COUNT as f64 {
        return Err(SimulationError::invalid_parameter(
            "time_step",
            format!("horizon / time_step must not exceed {} steps", MAX_STEP_COUNT),
        ));
    }

    Ok(())
}

/// Heston stochastic-variance settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HestonParameters {
    pub initial_variance: f64,      // v0
    pub mean_reversion: f64,        // kappa
    pub long_term_variance: f64,    // theta
    pub vol_of_variance: f64,       // xi
    pub correlation: f64,           // rho between price and variance shocks
}

impl Default for HestonParameters {
    fn default() -> Self {
        Self {
            initial_variance: 0.04,
            mean_reversion: 2.0,
            long_term_variance: 0.04,
            vol_of_variance: 0.3,
            correlation: -0.7,
        }
    }
}

impl HestonParameters {
    pub fn validate(&self) -> SimulationResult<()> {
        ensure_finite(&[
            ("initial_variance", self.initial_variance),
            ("mean_reversion", self.mean_reversion),
            ("long_term_variance", self.long_term_variance),
            ("vol_of_variance", self.vol_of_variance),
            ("correlation", self.correlation),
        ])?;

        let non_negative = [
            ("initial_variance", self.initial_variance),
            ("mean_reversion", self.mean_reversion),
            ("long_term_variance", self.long_term_variance),
            ("vol_of_variance", self.vol_of_variance),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(SimulationError::invalid_parameter(name, "must be non-negative"));
            }
        }

        ensure_correlation("correlation", self.correlation)
    }
}

/// SABR stochastic-volatility settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SabrParameters {
    pub alpha: f64,        // initial volatility
    pub beta: f64,         // elasticity, in [0, 1]
    pub correlation: f64,  // rho
    pub vol_of_vol: f64,   // nu
}

impl Default for SabrParameters {
    fn default() -> Self {
        Self {
            alpha: 0.04,
            beta: 0.5,
            correlation: 0.0,
            vol_of_vol: 0.2,
        }
    }
}

impl SabrParameters {
    pub fn validate(&self) -> SimulationResult<()> {
        ensure_finite(&[
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("correlation", self.correlation),
            ("vol_of_vol", self.vol_of_vol),
        ])?;

        if self.alpha < 0.0 {
            return Err(SimulationError::invalid_parameter("alpha", "must be non-negative"));
        }

        if !(0.0..=1.0).contains(&self.beta) {
            return Err(SimulationError::invalid_parameter("beta", "must be within [0, 1]"));
        }

        if self.vol_of_vol < 0.0 {
            return Err(SimulationError::invalid_parameter("vol_of_vol", "must be non-negative"));
        }

        ensure_correlation("correlation", self.correlation)
    }
}

/// Which price process drives the simulated paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Geometric Brownian Motion
    #[default]
    Gbm,
    /// Heston stochastic variance
    Heston,
    /// SABR stochastic volatility
    Sabr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub model: ModelKind,
    #[serde(default = "default_paths")]
    pub paths: usize,
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            paths: default_paths(),
            show_progress: default_true(),
        }
    }
}

/// How a path is rendered on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Time <t> : <price>` lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Complete simulator configuration, matching the layout of a config TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub model: SimulationParameters,
    #[serde(default)]
    pub heston: HestonParameters,
    #[serde(default)]
    pub sabr: SabrParameters,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default value functions
fn default_paths() -> usize { 1 }
fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl SimulationConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileRead(format!("{}: {}", path.as_ref().display(), e)))?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration from a file when one is given, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate every value the selected model will use
    pub fn validate(&self) -> SimulationResult<()> {
        self.model.validate()?;

        match self.run.model {
            ModelKind::Gbm => {}
            ModelKind::Heston => self.heston.validate()?,
            ModelKind::Sabr => self.sabr.validate()?,
        }

        if self.run.paths == 0 {
            return Err(SimulationError::invalid_parameter("paths", "must be greater than 0"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(SimulationError::invalid_parameter(
                "logging.level",
                format!("unknown level '{}', expected one of {:?}", self.logging.level, LOG_LEVELS),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
