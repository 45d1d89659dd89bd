//! Rate composition and the payment/cost figures derived from it

use serde::{Deserialize, Serialize};

use super::amortization::{level_payment, monthly_rate};
use super::credit::credit_adjustment;
use super::guarantee::Guarantee;
use crate::error::{QuoteError, Result};

/// Everything needed to price one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuoteInput {
    /// Amount financed (loan amount less down payment)
    pub principal: f64,

    /// Product base rate (percent)
    pub base_rate: f64,

    /// Market spread over the base rate (percent)
    pub market_spread: f64,

    /// Product risk adjustment (percent)
    pub risk_adjustment: f64,

    /// Borrower credit score
    pub credit_score: u16,

    /// Years of the term covered by a guarantee
    pub guarantee_term_years: f64,

    /// Share of the balance covered by the guarantee (0-100)
    pub guarantee_coverage_percent: f64,

    /// Loan term in years
    pub term_years: f64,

    /// Fees paid at origination (dollars)
    #[serde(default)]
    pub upfront_fees: f64,

    /// Insurance premiums over the full term (dollars)
    #[serde(default)]
    pub insurance_over_term: f64,
}

impl RateQuoteInput {
    pub fn guarantee(&self) -> Guarantee {
        Guarantee::new(self.guarantee_term_years, self.guarantee_coverage_percent)
    }

    fn validate(&self) -> Result<()> {
        if self.principal.is_nan() || self.principal < 0.0 {
            return Err(QuoteError::invalid(
                "principal",
                format!("must be >= 0, got {}", self.principal),
            ));
        }
        if self.term_years.is_nan() || self.term_years <= 0.0 {
            return Err(QuoteError::invalid(
                "term_years",
                format!("must be > 0, got {}", self.term_years),
            ));
        }
        Ok(())
    }
}

/// Rate components and cost figures for one quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuoteResult {
    /// Credit tier adjustment (percentage points)
    pub credit_adjustment: f64,

    /// Guarantee discount (percentage points)
    pub guarantee_discount: f64,

    /// Blended annual rate (percent); not floored, may be negative
    pub effective_rate: f64,

    /// Monthly decimal rate used for amortization
    pub monthly_rate: f64,

    /// Number of monthly payments
    pub payments: f64,

    pub monthly_payment: f64,
    pub total_interest: f64,

    /// Principal + interest + upfront fees + insurance over term
    pub total_cost: f64,
}

/// Blend the rate components into an effective annual rate (percent)
pub fn effective_rate(
    base_rate: f64,
    market_spread: f64,
    risk_adjustment: f64,
    credit_adjustment: f64,
    guarantee_discount: f64,
) -> f64 {
    base_rate + market_spread + risk_adjustment + credit_adjustment - guarantee_discount
}

/// Price a loan: compose the effective rate, then amortize the principal over the term
pub fn quote_rate(input: &RateQuoteInput) -> Result<RateQuoteResult> {
    input.validate()?;

    let credit_adjustment = credit_adjustment(input.credit_score);
    let guarantee_discount = input.guarantee().discount();
    let effective_rate = effective_rate(
        input.base_rate,
        input.market_spread,
        input.risk_adjustment,
        credit_adjustment,
        guarantee_discount,
    );

    if effective_rate < 0.0 {
        log::warn!(
            "Effective rate is negative ({:.4}%): base={} spread={} risk={} credit={} guarantee_discount={}",
            effective_rate,
            input.base_rate,
            input.market_spread,
            input.risk_adjustment,
            credit_adjustment,
            guarantee_discount,
        );
    }

    let r = monthly_rate(effective_rate);
    let n = input.term_years * 12.0;
    let monthly_payment = level_payment(input.principal, r, n);
    let total_interest = monthly_payment * n - input.principal;
    let total_cost =
        input.principal + total_interest + input.upfront_fees + input.insurance_over_term;

    Ok(RateQuoteResult {
        credit_adjustment,
        guarantee_discount,
        effective_rate,
        monthly_rate: r,
        payments: n,
        monthly_payment,
        total_interest,
        total_cost,
    })
}
