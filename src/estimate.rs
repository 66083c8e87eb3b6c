//! Drift and volatility estimation from historical closing prices
//!
//! Log returns `ln(P[i] / P[i-1])` are annualised with `periods_per_year`:
//! drift is the mean return times the period count, volatility the sample
//! standard deviation times its square root.

use std::io;
use std::path::Path;

use serde::Serialize;
use statrs::statistics::Statistics;
use tracing::{debug, info};

use crate::config::{ensure_finite, SimulationParameters};
use crate::error::{SimulationError, SimulationResult};

/// Trading days in a year, the usual period count for daily closes
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annualised drift and volatility fitted to a price history
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketEstimate {
    pub drift: f64,
    pub volatility: f64,
    /// Number of log returns the estimate is based on
    pub observations: usize,
}

impl MarketEstimate {
    /// Copy the fitted drift and volatility into `params`
    pub fn apply_to(&self, params: &mut SimulationParameters) {
        params.drift = self.drift;
        params.volatility = self.volatility;
    }
}

/// Fit drift and volatility to a series of closing prices.
///
/// Needs at least three prices (two returns) so the sample deviation exists.
pub fn estimate_parameters(prices: &[f64], periods_per_year: f64) -> SimulationResult<MarketEstimate> {
    ensure_finite(&[("periods_per_year", periods_per_year)])?;
    if periods_per_year <= 0.0 {
        return Err(SimulationError::invalid_parameter("periods_per_year", "must be positive"));
    }
    if prices.len() < 3 {
        return Err(SimulationError::HistoricalData(format!(
            "need at least 3 prices, got {}",
            prices.len()
        )));
    }
    if let Some((row, bad)) = prices.iter().enumerate().find(|(_, p)| !p.is_finite() || **p <= 0.0) {
        return Err(SimulationError::HistoricalData(format!(
            "price {} at row {} is not a positive number",
            bad,
            row + 1
        )));
    }

    let log_returns: Vec<f64> = prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    let mean = log_returns.iter().mean();
    let std_dev = log_returns.iter().std_dev();

    let estimate = MarketEstimate {
        drift: mean * periods_per_year,
        volatility: std_dev * periods_per_year.sqrt(),
        observations: log_returns.len(),
    };
    debug!(?estimate, "fitted market parameters");
    Ok(estimate)
}

/// Read closing prices from CSV data with a header row.
///
/// Uses the column named `close` (any case), or the only column when there is
/// just one. Blank cells are skipped.
pub fn read_close_prices<R: io::Read>(reader: R) -> SimulationResult<Vec<f64>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| SimulationError::HistoricalData(e.to_string()))?
        .clone();
    let column = match headers.iter().position(|h| h.eq_ignore_ascii_case("close")) {
        Some(index) => index,
        None if headers.len() == 1 => 0,
        None => {
            return Err(SimulationError::HistoricalData(format!(
                "no 'Close' column among headers: {}",
                headers.iter().collect::<Vec<_>>().join(", ")
            )))
        }
    };

    let mut prices = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| SimulationError::HistoricalData(e.to_string()))?;
        let field = match record.get(column) {
            Some(field) if !field.is_empty() => field,
            _ => continue,
        };
        let price = field.parse::<f64>().map_err(|_| {
            SimulationError::HistoricalData(format!("row {}: '{}' is not a number", index + 2, field))
        })?;
        prices.push(price);
    }

    Ok(prices)
}

/// Load closing prices from a CSV file
pub fn load_close_prices<P: AsRef<Path>>(path: P) -> SimulationResult<Vec<f64>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| SimulationError::HistoricalData(format!("{}: {}", path.display(), e)))?;
    let prices = read_close_prices(file)?;
    info!("📈 Loaded {} closing prices from {}", prices.len(), path.display());
    Ok(prices)
}
