// GBM Path Simulator Library
//
// Simulates asset price paths under Geometric Brownian Motion (plus the
// Heston and SABR stochastic-volatility variants) with an injectable
// standard-normal noise source

pub mod config;
pub mod error;       // Unified error handling
pub mod estimate;
pub mod noise;
pub mod output;
pub mod pricing;
pub mod progress;
pub mod simulation;

// Re-export configuration
pub use config::{
    ConfigError, HestonParameters, LoggingConfig, ModelKind, OutputConfig, OutputFormat, RunConfig,
    SabrParameters, SimulationConfig, SimulationParameters, MAX_STEP_COUNT,
};

// Re-export error types
pub use error::{SimulationError, SimulationResult};

// Re-export noise sources
pub use noise::{FixedNoise, FnNoise, GaussianNoise, NoiseSource};

// Re-export simulation components
pub use simulation::{
    simulate_batch, simulate_batch_with, simulate_heston_path, simulate_path, simulate_sabr_path,
    HestonModel, PathModel, PathPoint, PathSimulator, PricePath, SabrModel, StochasticVolPath,
};

pub use estimate::{estimate_parameters, load_close_prices, read_close_prices, MarketEstimate, TRADING_DAYS_PER_YEAR};
pub use output::{format_general, write_path, write_paths};
pub use pricing::{black_scholes_price, EuropeanOption, OptionType};
pub use progress::BatchProgress;
