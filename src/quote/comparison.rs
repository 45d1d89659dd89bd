//! Per-product quotes and best-of-N selection

use serde::{Deserialize, Serialize};

use crate::pricing::RateQuoteResult;
use crate::product::LoanRequest;

/// One product priced for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductQuote {
    pub product_id: String,
    pub product_name: String,

    /// Whether the request passes the product's max loan and min down checks
    pub qualified: bool,

    /// Down payment the product requires for this loan amount
    pub min_down_payment: f64,

    pub upfront_fees: f64,
    pub insurance_over_term: f64,

    pub result: RateQuoteResult,
}

/// All products priced for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub request: LoanRequest,

    /// Quotes in catalog order, qualified or not
    pub quotes: Vec<ProductQuote>,

    /// Index into `quotes` of the cheapest qualified product
    pub best: Option<usize>,
}

impl Comparison {
    pub fn new(request: LoanRequest, quotes: Vec<ProductQuote>) -> Self {
        let best = best_qualified(&quotes);
        Self {
            request,
            quotes,
            best,
        }
    }

    pub fn best_quote(&self) -> Option<&ProductQuote> {
        self.best.map(|i| &self.quotes[i])
    }

    pub fn qualified(&self) -> impl Iterator<Item = &ProductQuote> {
        self.quotes.iter().filter(|q| q.qualified)
    }

    /// Extra total cost of a product over the best qualified one
    pub fn cost_over_best(&self, product_id: &str) -> Option<f64> {
        let best = self.best_quote()?;
        let quote = self.quotes.iter().find(|q| q.product_id == product_id)?;
        Some(quote.result.total_cost - best.result.total_cost)
    }
}

/// Index of the qualified quote with the lowest total cost
///
/// Ties keep the earlier quote: a later quote only replaces the current best
/// when its total cost is strictly lower.
pub fn best_qualified(quotes: &[ProductQuote]) -> Option<usize> {
    quotes
        .iter()
        .enumerate()
        .filter(|(_, q)| q.qualified)
        .reduce(|best, candidate| {
            if candidate.1.result.total_cost < best.1.result.total_cost {
                candidate
            } else {
                best
            }
        })
        .map(|(i, _)| i)
}
