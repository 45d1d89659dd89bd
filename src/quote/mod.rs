//! Quote engine for pricing requests across a product catalog

mod engine;
mod comparison;

pub use engine::QuoteEngine;
pub use comparison::{Comparison, ProductQuote, best_qualified};
