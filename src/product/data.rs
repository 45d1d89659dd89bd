//! Loan product and borrower request structures

use serde::{Deserialize, Serialize};

use crate::pricing::RateQuoteInput;

/// Default loan term when none is given (years)
pub const DEFAULT_TERM_YEARS: f64 = 30.0;

/// Default market spread (percent)
pub const DEFAULT_MARKET_SPREAD: f64 = 0.25;

fn default_term_years() -> f64 {
    DEFAULT_TERM_YEARS
}

fn default_market_spread() -> f64 {
    DEFAULT_MARKET_SPREAD
}

/// A loan product on offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProduct {
    /// Unique product identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Base annual rate (percent)
    pub base_rate: f64,

    /// Fixed risk adjustment for this product (percent)
    pub risk_adjustment: f64,

    /// Largest principal the product will finance
    pub max_loan: f64,

    /// Minimum down payment as a percent of the loan amount
    pub min_down_percent: f64,

    /// Origination fees as a percent of principal
    #[serde(default)]
    pub upfront_fee_percent: f64,

    /// Mortgage insurance per year as a percent of principal
    #[serde(default)]
    pub annual_insurance_percent: f64,
}

impl LoanProduct {
    /// Origination fees in dollars
    pub fn upfront_fees(&self, principal: f64) -> f64 {
        principal * self.upfront_fee_percent / 100.0
    }

    /// Insurance premiums over the whole term in dollars
    pub fn insurance_over_term(&self, principal: f64, term_years: f64) -> f64 {
        principal * self.annual_insurance_percent / 100.0 * term_years
    }

    /// Minimum down payment required for a loan amount
    pub fn min_down_payment(&self, loan_amount: f64) -> f64 {
        loan_amount * self.min_down_percent / 100.0
    }

    /// Whether the request is eligible for this product
    ///
    /// Principal must not exceed the product's maximum and the down payment
    /// must meet the product's minimum share of the loan amount.
    pub fn is_qualified(&self, request: &LoanRequest) -> bool {
        request.principal() <= self.max_loan
            && request.down_payment >= self.min_down_payment(request.loan_amount)
    }

    /// Assemble the pricing input for a borrower request against this product
    pub fn rate_input(&self, request: &LoanRequest) -> RateQuoteInput {
        let principal = request.principal();
        RateQuoteInput {
            principal,
            base_rate: self.base_rate,
            market_spread: request.market_spread,
            risk_adjustment: self.risk_adjustment,
            credit_score: request.credit_score,
            guarantee_term_years: request.guarantee_term_years,
            guarantee_coverage_percent: request.guarantee_coverage_percent,
            term_years: request.term_years,
            upfront_fees: self.upfront_fees(principal),
            insurance_over_term: self.insurance_over_term(principal, request.term_years),
        }
    }
}

/// A borrower's loan scenario, independent of product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Purchase price / amount before down payment
    pub loan_amount: f64,

    pub down_payment: f64,

    pub credit_score: u16,

    /// Market spread (percent)
    #[serde(default = "default_market_spread")]
    pub market_spread: f64,

    #[serde(default)]
    pub guarantee_term_years: f64,

    #[serde(default)]
    pub guarantee_coverage_percent: f64,

    #[serde(default = "default_term_years")]
    pub term_years: f64,
}

impl LoanRequest {
    /// Create a request with default spread, term, and no guarantee
    pub fn new(loan_amount: f64, down_payment: f64, credit_score: u16) -> Self {
        Self {
            loan_amount,
            down_payment,
            credit_score,
            market_spread: DEFAULT_MARKET_SPREAD,
            guarantee_term_years: 0.0,
            guarantee_coverage_percent: 0.0,
            term_years: DEFAULT_TERM_YEARS,
        }
    }

    pub fn with_guarantee(mut self, term_years: f64, coverage_percent: f64) -> Self {
        self.guarantee_term_years = term_years;
        self.guarantee_coverage_percent = coverage_percent;
        self
    }

    pub fn with_term(mut self, term_years: f64) -> Self {
        self.term_years = term_years;
        self
    }

    pub fn with_spread(mut self, market_spread: f64) -> Self {
        self.market_spread = market_spread;
        self
    }

    /// Amount financed
    pub fn principal(&self) -> f64 {
        self.loan_amount - self.down_payment
    }

    /// Down payment as a percent of the loan amount
    pub fn down_percent(&self) -> f64 {
        if self.loan_amount > 0.0 {
            self.down_payment / self.loan_amount * 100.0
        } else {
            0.0
        }
    }
}
