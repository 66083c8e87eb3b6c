//! Closed-form Black-Scholes prices for European options
//!
//! d1 = (ln(S/K) + (r + sigma^2/2) T) / (sigma sqrt(T)),  d2 = d1 - sigma sqrt(T)
//! call = S N(d1) - K e^(-rT) N(d2),  put = K e^(-rT) N(-d2) - S N(-d1)

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::ensure_finite;
use crate::error::{SimulationError, SimulationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    #[default]
    Call,
    Put,
}

/// European option priced under Black-Scholes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EuropeanOption {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,       // years
    pub rate: f64,           // continuously compounded risk-free rate
    pub volatility: f64,
    pub option_type: OptionType,
}

impl EuropeanOption {
    pub fn validate(&self) -> SimulationResult<()> {
        ensure_finite(&[
            ("spot", self.spot),
            ("strike", self.strike),
            ("maturity", self.maturity),
            ("rate", self.rate),
            ("volatility", self.volatility),
        ])?;

        let positive = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("maturity", self.maturity),
            ("volatility", self.volatility),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(SimulationError::invalid_parameter(name, "must be positive"));
            }
        }
        Ok(())
    }

    /// Black-Scholes price
    pub fn price(&self) -> SimulationResult<f64> {
        self.validate()?;

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| SimulationError::invalid_parameter("normal distribution", e.to_string()))?;

        let sqrt_t = self.maturity.sqrt();
        let d1 = ((self.spot / self.strike).ln()
            + (self.rate + 0.5 * self.volatility * self.volatility) * self.maturity)
            / (self.volatility * sqrt_t);
        let d2 = d1 - self.volatility * sqrt_t;
        let discounted_strike = self.strike * (-self.rate * self.maturity).exp();

        let price = match self.option_type {
            OptionType::Call => self.spot * normal.cdf(d1) - discounted_strike * normal.cdf(d2),
            OptionType::Put => discounted_strike * normal.cdf(-d2) - self.spot * normal.cdf(-d1),
        };
        Ok(price)
    }
}

/// Convenience wrapper around `EuropeanOption::price`
pub fn black_scholes_price(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    volatility: f64,
    option_type: OptionType,
) -> SimulationResult<f64> {
    EuropeanOption {
        spot,
        strike,
        maturity,
        rate,
        volatility,
        option_type,
    }
    .price()
}
