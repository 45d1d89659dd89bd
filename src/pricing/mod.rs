//! Rate composition, amortization, and affordability math

mod credit;
mod guarantee;
mod rate;
pub mod amortization;
pub mod affordability;

pub use credit::{CreditTier, credit_adjustment};
pub use guarantee::{Guarantee, FULL_GUARANTEE_TERM_YEARS, MAX_GUARANTEE_DISCOUNT};
pub use rate::{RateQuoteInput, RateQuoteResult, effective_rate, quote_rate};
pub use amortization::{AmortizationRow, AmortizationSchedule, round_currency};
pub use affordability::{Affordability, BorrowerProfile, affordability};
