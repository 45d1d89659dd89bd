//! Quote defaults and environment overrides
//!
//! Recognized variables:
//!   MARKET_SPREAD, TERM_YEARS, GUARANTEE_TERM_YEARS,
//!   GUARANTEE_COVERAGE_PERCENT, PRODUCTS_CSV

use std::env;
use std::path::PathBuf;

use crate::error::Result;
use crate::product::{LoanRequest, ProductCatalog, DEFAULT_MARKET_SPREAD, DEFAULT_TERM_YEARS};

/// Tunable inputs that a borrower request does not have to carry
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSettings {
    /// Market spread (percent)
    pub market_spread: f64,
    pub term_years: f64,
    pub guarantee_term_years: f64,
    pub guarantee_coverage_percent: f64,
    /// Catalog CSV; the built-in catalog is used when unset
    pub products_csv: Option<PathBuf>,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            market_spread: DEFAULT_MARKET_SPREAD,
            term_years: DEFAULT_TERM_YEARS,
            guarantee_term_years: 0.0,
            guarantee_coverage_percent: 0.0,
            products_csv: None,
        }
    }
}

/// Numeric environment variable; unset gives `None`, unparsable logs a warning and gives `None`
pub fn env_f64(key: &str) -> Option<f64> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a number", key, raw);
            None
        }
    }
}

impl QuoteSettings {
    /// Defaults overridden by any recognized environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            market_spread: env_f64("MARKET_SPREAD").unwrap_or(defaults.market_spread),
            term_years: env_f64("TERM_YEARS").unwrap_or(defaults.term_years),
            guarantee_term_years: env_f64("GUARANTEE_TERM_YEARS")
                .unwrap_or(defaults.guarantee_term_years),
            guarantee_coverage_percent: env_f64("GUARANTEE_COVERAGE_PERCENT")
                .unwrap_or(defaults.guarantee_coverage_percent),
            products_csv: env::var_os("PRODUCTS_CSV").map(PathBuf::from),
        }
    }

    /// Borrower request carrying these settings
    pub fn request(&self, loan_amount: f64, down_payment: f64, credit_score: u16) -> LoanRequest {
        LoanRequest::new(loan_amount, down_payment, credit_score)
            .with_spread(self.market_spread)
            .with_term(self.term_years)
            .with_guarantee(self.guarantee_term_years, self.guarantee_coverage_percent)
    }

    /// Catalog from `products_csv`, or the built-in catalog
    pub fn catalog(&self) -> Result<ProductCatalog> {
        match &self.products_csv {
            Some(path) => {
                log::info!("Loading loan products from {}", path.display());
                ProductCatalog::from_csv_path(path)
            }
            None => Ok(ProductCatalog::default_catalog()),
        }
    }
}
