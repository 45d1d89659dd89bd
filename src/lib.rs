//! Loan Quote - rate composition and product comparison for fixed-rate loans
//!
//! This library provides:
//! - Effective rate composition (base rate, market spread, risk, credit tier, guarantee discount)
//! - Fixed-payment amortization, payment schedules, and affordability sizing
//! - Loan product catalogs with qualification checks
//! - Best-of-N product comparison and batch scenario runs

pub mod error;
pub mod config;
pub mod pricing;
pub mod product;
pub mod quote;
pub mod scenario;

// Re-export commonly used types
pub use error::{QuoteError, Result};
pub use config::QuoteSettings;
pub use pricing::{RateQuoteInput, RateQuoteResult, quote_rate, CreditTier, Guarantee};
pub use product::{LoanProduct, LoanRequest, ProductCatalog};
pub use quote::{QuoteEngine, Comparison, ProductQuote};
pub use scenario::ScenarioRunner;
