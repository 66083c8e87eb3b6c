//! Error handling for the GBM path simulator
//!
//! Every fallible operation in the library returns `SimulationResult<T>`,
//! so the binary can report failures with context instead of panicking.

use std::io;

use crate::config::ConfigError;

/// Main error type for the simulator
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    // Input errors
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    // Numeric errors
    #[error("Price left the representable range at step {step} (value: {value})")]
    NumericOverflow { step: usize, value: f64 },

    // Market data errors
    #[error("Historical data error: {0}")]
    HistoricalData(String),

    // Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    // IO errors
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl SimulationError {
    /// Shorthand for building an `InvalidParameter` error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Get a user-friendly error message with helpful context
    pub fn user_message(&self) -> String {
        match self {
            SimulationError::InvalidParameter { name, reason } => {
                format!(
                    "Invalid parameter '{}': {}\n\n\
                    💡 Valid ranges:\n\
                    - initial_price > 0\n\
                    - volatility >= 0\n\
                    - horizon > 0 and time_step > 0\n\
                    - every value finite",
                    name, reason
                )
            }
            SimulationError::NumericOverflow { step, value } => {
                format!(
                    "Simulation diverged at step {} (price: {})\n\n\
                    💡 Try a smaller volatility, drift or time step",
                    step, value
                )
            }
            SimulationError::HistoricalData(msg) => {
                format!(
                    "Could not use historical prices: {}\n\n\
                    💡 Expected a CSV file with a header row and a 'Close' column\n\
                    (or a single price column), holding at least 3 positive prices",
                    msg
                )
            }
            SimulationError::Config(e) => {
                format!(
                    "{}\n\n\
                    💡 Check the config file for:\n\
                    - Valid TOML syntax\n\
                    - Numeric values in the [model] section",
                    e
                )
            }
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::InvalidParameter { .. } => "validation",
            SimulationError::NumericOverflow { .. } => "numeric",
            SimulationError::HistoricalData(_) => "data",
            SimulationError::Config(_) => "config",
            SimulationError::Io(_) => "io",
        }
    }
}

/// Result type alias for simulator operations
pub type SimulationResult<T> = Result<T, SimulationError>;
