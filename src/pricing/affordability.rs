//! Borrower affordability: how large a loan a monthly budget can carry

use serde::{Deserialize, Serialize};

use super::amortization::{max_principal_for_payment, monthly_rate};
use crate::error::{QuoteError, Result};

/// Default back-end debt-to-income cap (percent)
pub const DEFAULT_MAX_DTI_PERCENT: f64 = 43.0;

/// Borrower income and obligations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerProfile {
    pub gross_monthly_income: f64,

    /// Existing monthly debt payments (car, cards, student loans)
    #[serde(default)]
    pub monthly_debts: f64,

    /// Cash available for a down payment
    #[serde(default)]
    pub down_payment_available: f64,

    /// Maximum share of income that may go to debt service (percent)
    #[serde(default = "default_max_dti")]
    pub max_dti_percent: f64,
}

fn default_max_dti() -> f64 {
    DEFAULT_MAX_DTI_PERCENT
}

impl BorrowerProfile {
    /// Monthly amount left for the new loan payment, never negative
    pub fn payment_budget(&self) -> f64 {
        (self.gross_monthly_income * self.max_dti_percent / 100.0 - self.monthly_debts).max(0.0)
    }
}

/// Maximum loan a borrower can carry at a given rate and term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affordability {
    pub payment_budget: f64,
    pub max_principal: f64,
    /// Max principal plus the available down payment
    pub max_loan_amount: f64,
}

/// Size the largest loan the profile can afford at `effective_rate` (percent) over `term_years`
pub fn affordability(
    profile: &BorrowerProfile,
    effective_rate: f64,
    term_years: f64,
) -> Result<Affordability> {
    if term_years.is_nan() || term_years <= 0.0 {
        return Err(QuoteError::invalid(
            "term_years",
            format!("must be > 0, got {}", term_years),
        ));
    }

    let payment_budget = profile.payment_budget();
    let max_principal =
        max_principal_for_payment(payment_budget, monthly_rate(effective_rate), term_years * 12.0);

    Ok(Affordability {
        payment_budget,
        max_principal,
        max_loan_amount: max_principal + profile.down_payment_available,
    })
}
