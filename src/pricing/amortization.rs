//! Fixed-payment amortization
//!
//! Supports:
//! - Level monthly payment for an ordinary annuity (payments at period end)
//! - Month-by-month schedules with optional calendar dates
//! - The inverse problem: principal supported by a given payment

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};

/// Monthly rates smaller than this are treated as zero-interest
const ZERO_RATE_TOLERANCE: f64 = 1e-12;

/// Longest schedule that will be built (100 years of monthly payments)
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

/// Whole number of monthly payments for a term, bounded to [1, MAX_SCHEDULE_MONTHS]
///
/// Terms that round to zero months, or to more than the maximum, are rejected.
pub fn schedule_months(term_years: f64) -> Result<u32> {
    let months = (term_years * 12.0).round();
    if months.is_nan() || months < 1.0 || months > MAX_SCHEDULE_MONTHS as f64 {
        return Err(QuoteError::invalid(
            "term_years",
            format!(
                "schedule needs 1 to {} whole months, got {} years",
                MAX_SCHEDULE_MONTHS, term_years
            ),
        ));
    }
    Ok(months as u32)
}

/// Convert an annual percentage rate (e.g. 3.444) to a monthly decimal rate
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 100.0 / 12.0
}

/// Level payment that amortizes `principal` over `n_payments` periods
///
/// M = P * r * (1+r)^n / ((1+r)^n - 1), falling back to P / n when r is zero.
/// Rates within 1e-12 of zero also take the P / n branch; an exact zero is unaffected.
pub fn level_payment(principal: f64, periodic_rate: f64, n_payments: f64) -> f64 {
    if periodic_rate.abs() < ZERO_RATE_TOLERANCE {
        return principal / n_payments;
    }

    let growth = (1.0 + periodic_rate).powf(n_payments);
    principal * periodic_rate * growth / (growth - 1.0)
}

/// Largest principal that a level payment can amortize over `n_payments` periods
pub fn max_principal_for_payment(payment: f64, periodic_rate: f64, n_payments: f64) -> f64 {
    if periodic_rate.abs() < ZERO_RATE_TOLERANCE {
        return payment * n_payments;
    }

    let v = 1.0 / (1.0 + periodic_rate);
    payment * (1.0 - v.powf(n_payments)) / periodic_rate
}

/// Round a dollar amount to whole cents
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A single month of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based payment number
    pub period: u32,
    /// Calendar date of the payment, when a first payment date was given
    pub payment_date: Option<NaiveDate>,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Balance remaining after this payment
    pub balance: f64,
}

/// Full payment schedule for a loan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    /// Build the schedule for `principal` at an annual percentage rate over `n_months`
    ///
    /// The last row absorbs floating-point drift so the closing balance is exactly zero.
    /// Callers sizing `n_months` from user input should go through [`schedule_months`].
    pub fn build(
        principal: f64,
        annual_rate_pct: f64,
        n_months: u32,
        first_payment: Option<NaiveDate>,
    ) -> Self {
        let r = monthly_rate(annual_rate_pct);
        let payment = level_payment(principal, r, n_months as f64);
        let mut balance = principal;
        let mut rows = Vec::with_capacity(n_months.min(MAX_SCHEDULE_MONTHS) as usize);

        for period in 1..=n_months {
            let interest = balance * r;
            let (principal_part, payment_amount) = if period == n_months {
                (balance, balance + interest)
            } else {
                (payment - interest, payment)
            };
            balance -= principal_part;
            if period == n_months {
                balance = 0.0;
            }

            let payment_date = first_payment
                .and_then(|d| d.checked_add_months(Months::new(period - 1)));

            rows.push(AmortizationRow {
                period,
                payment_date,
                payment: payment_amount,
                interest,
                principal: principal_part,
                balance,
            });
        }

        Self { rows }
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|r| r.payment).sum()
    }

    /// Interest and principal paid per calendar year of the loan (12-payment blocks)
    pub fn yearly_totals(&self) -> Vec<(u32, f64, f64)> {
        self.rows
            .chunks(12)
            .enumerate()
            .map(|(i, year)| {
                let interest: f64 = year.iter().map(|r| r.interest).sum();
                let principal: f64 = year.iter().map(|r| r.principal).sum();
                (i as u32 + 1, interest, principal)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_level_payment_known_value() {
        // $100,000 at 6% over 30 years
        let m = level_payment(100_000.0, monthly_rate(6.0), 360.0);
        assert_relative_eq!(round_currency(m), 599.55);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let m = level_payment(120_000.0, 0.0, 360.0);
        assert_eq!(m, 120_000.0 / 360.0);
    }

    #[test]
    fn test_rate_noise_below_tolerance_is_straight_line() {
        assert_eq!(level_payment(120_000.0, 1e-13, 360.0), 120_000.0 / 360.0);
        assert_eq!(level_payment(120_000.0, -1e-13, 360.0), 120_000.0 / 360.0);
        assert_eq!(max_principal_for_payment(500.0, 1e-13, 360.0), 180_000.0);
        // Just above the tolerance the annuity formula applies
        assert!(level_payment(120_000.0, 1e-6, 360.0) > 120_000.0 / 360.0);
    }

    #[test]
    fn test_inverse_annuity_round_trips_payment() {
        let r = monthly_rate(5.25);
        let m = level_payment(250_000.0, r, 360.0);
        let p = max_principal_for_payment(m, r, 360.0);
        assert_relative_eq!(p, 250_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_schedule_pays_off_loan() {
        let schedule = AmortizationSchedule::build(200_000.0, 4.5, 360, None);
        assert_eq!(schedule.rows.len(), 360);
        assert_eq!(schedule.rows.last().unwrap().balance, 0.0);

        let principal_paid: f64 = schedule.rows.iter().map(|r| r.principal).sum();
        assert_relative_eq!(principal_paid, 200_000.0, epsilon = 1e-6);

        let m = level_payment(200_000.0, monthly_rate(4.5), 360.0);
        assert_relative_eq!(schedule.total_interest(), m * 360.0 - 200_000.0, epsilon = 1e-4);
    }

    #[test]
    fn test_schedule_interest_declines() {
        let schedule = AmortizationSchedule::build(150_000.0, 6.0, 180, None);
        let first = &schedule.rows[0];
        let last = &schedule.rows[179];
        assert_relative_eq!(first.interest, 750.0, epsilon = 1e-9);
        assert!(last.interest < first.interest);
        assert!(last.principal > first.principal);
    }

    #[test]
    fn test_schedule_dates_roll_by_month() {
        let first = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let schedule = AmortizationSchedule::build(10_000.0, 5.0, 13, Some(first));

        assert_eq!(schedule.rows[0].payment_date, Some(first));
        // Month-end clamps to the last day of February
        assert_eq!(schedule.rows[1].payment_date, NaiveDate::from_ymd_opt(2026, 2, 28));
        assert_eq!(schedule.rows[12].payment_date, NaiveDate::from_ymd_opt(2027, 1, 31));
    }

    #[test]
    fn test_yearly_totals() {
        let schedule = AmortizationSchedule::build(50_000.0, 3.0, 60, None);
        let years = schedule.yearly_totals();
        assert_eq!(years.len(), 5);
        let principal: f64 = years.iter().map(|(_, _, p)| p).sum();
        assert_relative_eq!(principal, 50_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_schedule_months_bounds() {
        assert_eq!(schedule_months(30.0).unwrap(), 360);
        assert_eq!(schedule_months(100.0).unwrap(), MAX_SCHEDULE_MONTHS);
        // 0.05 years is 0.6 months, which rounds up to one payment
        assert_eq!(schedule_months(0.05).unwrap(), 1);

        for term in [0.04, 100.1, 1.0e9, f64::NAN, f64::INFINITY] {
            let err = schedule_months(term).unwrap_err();
            assert!(matches!(err, QuoteError::InvalidInput { field: "term_years", .. }));
        }
    }

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(1234.5678), 1234.57);
        assert_eq!(round_currency(0.004), 0.0);
    }
}
