// Simulated price path and its time grid

use serde::Serialize;

/// One (time, price) point on a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathPoint {
    pub time: f64,
    pub price: f64,
}

/// Ordered prices at `0, dt, 2*dt, ...`; index 0 holds the initial price
#[derive(Debug, Clone, PartialEq)]
pub struct PricePath {
    prices: Vec<f64>,
    time_step: f64,
}

impl PricePath {
    pub(crate) fn new(prices: Vec<f64>, time_step: f64) -> Self {
        Self { prices, time_step }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.prices.get(index).copied()
    }

    pub fn initial(&self) -> Option<f64> {
        self.prices.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Time of the point at `index`, i.e. `index * dt`
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.time_step
    }

    pub fn points(&self) -> impl Iterator<Item = PathPoint> + '_ {
        self.prices.iter().enumerate().map(move |(i, &price)| PathPoint {
            time: self.time_at(i),
            price,
        })
    }

    pub fn into_prices(self) -> Vec<f64> {
        self.prices
    }
}

/// Price path plus the second factor of a stochastic-volatility model
/// (variance for Heston, volatility for SABR), aligned index by index
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticVolPath {
    pub prices: PricePath,
    pub factor: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_follow_time_grid() {
        let path = PricePath::new(vec![100.0, 101.0, 99.5], 0.5);
        let points: Vec<PathPoint> = path.points().collect();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], PathPoint { time: 0.0, price: 100.0 });
        assert_eq!(points[1], PathPoint { time: 0.5, price: 101.0 });
        assert_eq!(points[2], PathPoint { time: 1.0, price: 99.5 });
    }

    #[test]
    fn test_empty_path_accessors() {
        let path = PricePath::new(Vec::new(), 0.01);
        assert!(path.is_empty());
        assert_eq!(path.initial(), None);
        assert_eq!(path.last(), None);
        assert_eq!(path.points().count(), 0);
    }
}
