//! Scenario runner for batch quoting
//!
//! Loads the product catalog once, then prices many borrower requests or
//! market-spread scenarios without re-reading the catalog file.

use crate::error::Result;
use crate::product::{LoanRequest, ProductCatalog};
use crate::quote::{Comparison, QuoteEngine};
use serde::{Deserialize, Serialize};

/// One point of a market-spread sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadPoint {
    pub market_spread: f64,
    /// Cheapest qualified product at this spread
    pub best_product_id: Option<String>,
    pub best_effective_rate: Option<f64>,
    pub best_monthly_payment: Option<f64>,
    pub best_total_cost: Option<f64>,
}

/// Pre-loaded scenario runner for batch quoting
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv_path(Path::new("data/loan_products.csv"))?;
///
/// for spread in [0.1, 0.25, 0.5, 1.0] {
///     let request = LoanRequest::new(350_000.0, 12_250.0, 720).with_spread(spread);
///     let comparison = runner.run(&request)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: QuoteEngine,
}

impl ScenarioRunner {
    /// Create runner over the built-in catalog
    pub fn new() -> Self {
        Self {
            engine: QuoteEngine::default(),
        }
    }

    /// Create runner by loading the catalog from a CSV file
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self> {
        Ok(Self::with_catalog(ProductCatalog::from_csv_path(path)?))
    }

    /// Create runner with a pre-built catalog
    pub fn with_catalog(catalog: ProductCatalog) -> Self {
        Self {
            engine: QuoteEngine::new(catalog),
        }
    }

    /// Compare all products for one request
    pub fn run(&self, request: &LoanRequest) -> Result<Comparison> {
        self.engine.compare(request)
    }

    /// Compare all products for each request
    pub fn run_batch(&self, requests: &[LoanRequest]) -> Result<Vec<Comparison>> {
        requests.iter().map(|r| self.engine.compare(r)).collect()
    }

    /// Re-run one request across a range of market spreads
    pub fn spread_sweep(&self, request: &LoanRequest, spreads: &[f64]) -> Result<Vec<SpreadPoint>> {
        spreads
            .iter()
            .map(|&spread| {
                let comparison = self.engine.compare(&request.clone().with_spread(spread))?;
                let best = comparison.best_quote();
                Ok(SpreadPoint {
                    market_spread: spread,
                    best_product_id: best.map(|q| q.product_id.clone()),
                    best_effective_rate: best.map(|q| q.result.effective_rate),
                    best_monthly_payment: best.map(|q| q.result.monthly_payment),
                    best_total_cost: best.map(|q| q.result.total_cost),
                })
            })
            .collect()
    }

    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Evenly spaced spreads from `min` to `max` inclusive
pub fn spread_grid(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (steps - 1) as f64;
            (0..steps).map(|i| min + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spread_sweep_monotone() {
        let runner = ScenarioRunner::new();
        let request = LoanRequest::new(350_000.0, 12_250.0, 720).with_guarantee(30.0, 85.0);

        let points = runner.spread_sweep(&request, &spread_grid(0.1, 1.0, 10)).unwrap();
        assert_eq!(points.len(), 10);

        // Wider spread never lowers the best total cost
        for pair in points.windows(2) {
            assert!(pair[1].best_total_cost.unwrap() > pair[0].best_total_cost.unwrap());
        }
    }

    #[test]
    fn test_run_batch() {
        let runner = ScenarioRunner::new();
        let requests: Vec<_> = [640u16, 720, 810]
            .iter()
            .map(|&score| LoanRequest::new(300_000.0, 60_000.0, score))
            .collect();

        let results = runner.run_batch(&requests).unwrap();
        assert_eq!(results.len(), 3);

        // Better credit gives a cheaper best quote
        let cost = |c: &Comparison| c.best_quote().unwrap().result.total_cost;
        assert!(cost(&results[2]) < cost(&results[1]));
        assert!(cost(&results[1]) < cost(&results[0]));
    }

    #[test]
    fn test_spread_grid() {
        let grid = spread_grid(0.1, 1.0, 10);
        assert_eq!(grid.len(), 10);
        assert_relative_eq!(grid[0], 0.1);
        assert_relative_eq!(grid[9], 1.0, epsilon = 1e-12);
        assert!(spread_grid(0.1, 1.0, 0).is_empty());
        assert_eq!(spread_grid(0.3, 1.0, 1), vec![0.3]);
    }
}
