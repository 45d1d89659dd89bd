//! Quote engine: prices borrower requests against a product catalog

use super::comparison::{Comparison, ProductQuote};
use crate::error::Result;
use crate::pricing::amortization::schedule_months;
use crate::pricing::{quote_rate, AmortizationSchedule};
use crate::product::{LoanProduct, LoanRequest, ProductCatalog};
use chrono::NaiveDate;

/// Main quote engine
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    catalog: ProductCatalog,
}

impl QuoteEngine {
    /// Create an engine over the given catalog
    pub fn new(catalog: ProductCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Price a single product for a request
    pub fn quote_product(&self, product: &LoanProduct, request: &LoanRequest) -> Result<ProductQuote> {
        let input = product.rate_input(request);
        let result = quote_rate(&input)?;
        let qualified = product.is_qualified(request);

        log::debug!(
            "{}: rate={:.4}% payment={:.2} total_cost={:.2} qualified={}",
            product.id,
            result.effective_rate,
            result.monthly_payment,
            result.total_cost,
            qualified,
        );

        Ok(ProductQuote {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            qualified,
            min_down_payment: product.min_down_payment(request.loan_amount),
            upfront_fees: input.upfront_fees,
            insurance_over_term: input.insurance_over_term,
            result,
        })
    }

    /// Price a catalog product by id
    pub fn quote_by_id(&self, product_id: &str, request: &LoanRequest) -> Result<ProductQuote> {
        let product = self.catalog.get(product_id)?;
        self.quote_product(product, request)
    }

    /// Price every catalog product and pick the cheapest qualified one
    pub fn compare(&self, request: &LoanRequest) -> Result<Comparison> {
        let quotes = self
            .catalog
            .iter()
            .map(|product| self.quote_product(product, request))
            .collect::<Result<Vec<_>>>()?;

        let comparison = Comparison::new(request.clone(), quotes);
        match comparison.best_quote() {
            Some(best) => log::info!(
                "Best of {} products: {} at {:.4}% (total cost {:.2})",
                comparison.quotes.len(),
                best.product_id,
                best.result.effective_rate,
                best.result.total_cost,
            ),
            None => log::info!(
                "No qualified product among {} for principal {:.2}",
                comparison.quotes.len(),
                request.principal(),
            ),
        }

        Ok(comparison)
    }

    /// Payment schedule for a product at the request's term
    ///
    /// The term must round to between one and `MAX_SCHEDULE_MONTHS` whole months.
    pub fn schedule(
        &self,
        product_id: &str,
        request: &LoanRequest,
        first_payment: Option<NaiveDate>,
    ) -> Result<AmortizationSchedule> {
        let n_months = schedule_months(request.term_years)?;
        let quote = self.quote_by_id(product_id, request)?;
        Ok(AmortizationSchedule::build(
            request.principal(),
            quote.result.effective_rate,
            n_months,
            first_payment,
        ))
    }
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::new(ProductCatalog::default_catalog())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;
    use approx::assert_relative_eq;

    fn example_request() -> LoanRequest {
        LoanRequest::new(350_000.0, 12_250.0, 720)
            .with_guarantee(30.0, 85.0)
            .with_term(50.0)
    }

    #[test]
    fn test_fha_example_rate() {
        let engine = QuoteEngine::default();
        let quote = engine.quote_by_id("fha-30", &example_request()).unwrap();

        assert!(quote.qualified);
        assert_relative_eq!(quote.result.effective_rate, 3.444, epsilon = 1e-12);
        assert_relative_eq!(quote.min_down_payment, 12_250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_compare_respects_qualification() {
        let engine = QuoteEngine::default();
        let comparison = engine.compare(&example_request()).unwrap();

        assert_eq!(comparison.quotes.len(), engine.catalog().len());

        // 3.5% down fails conventional (5%) and jumbo (20%)
        let conv = comparison.quotes.iter().find(|q| q.product_id == "conv-30").unwrap();
        let jumbo = comparison.quotes.iter().find(|q| q.product_id == "jumbo-30").unwrap();
        assert!(!conv.qualified);
        assert!(!jumbo.qualified);

        let best = comparison.best_quote().unwrap();
        assert!(best.qualified);
        for q in comparison.qualified() {
            assert!(best.result.total_cost <= q.result.total_cost);
        }
    }

    #[test]
    fn test_no_qualified_product() {
        let engine = QuoteEngine::default();
        // Principal above every product's cap
        let request = LoanRequest::new(5_000_000.0, 100_000.0, 780);
        let comparison = engine.compare(&request).unwrap();
        assert!(comparison.best.is_none());
        assert_eq!(comparison.quotes.len(), 5);
    }

    #[test]
    fn test_invalid_term_propagates() {
        let engine = QuoteEngine::default();
        let request = LoanRequest::new(300_000.0, 30_000.0, 700).with_term(0.0);
        assert!(matches!(
            engine.compare(&request),
            Err(QuoteError::InvalidInput { field: "term_years", .. })
        ));
    }

    #[test]
    fn test_down_payment_over_amount_is_invalid() {
        let engine = QuoteEngine::default();
        let request = LoanRequest::new(100_000.0, 120_000.0, 700);
        assert!(matches!(
            engine.quote_by_id("va-30", &request),
            Err(QuoteError::InvalidInput { field: "principal", .. })
        ));
    }

    #[test]
    fn test_schedule_matches_quote() {
        let engine = QuoteEngine::default();
        let request = example_request();
        let quote = engine.quote_by_id("usda-50", &request).unwrap();
        let schedule = engine.schedule("usda-50", &request, None).unwrap();

        assert_eq!(schedule.rows.len(), 600);
        assert_relative_eq!(schedule.rows[0].payment, quote.result.monthly_payment, epsilon = 1e-9);
        assert_relative_eq!(
            schedule.total_interest(),
            quote.result.total_interest,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_schedule_rejects_oversized_term() {
        let engine = QuoteEngine::default();
        let request = LoanRequest::new(300_000.0, 30_000.0, 700).with_term(1.0e9);
        assert!(matches!(
            engine.schedule("va-30", &request, None),
            Err(QuoteError::InvalidInput { field: "term_years", .. })
        ));
    }

    #[test]
    fn test_schedule_fractional_term_boundary() {
        let engine = QuoteEngine::default();

        // 0.04 years is 0.48 months: quotable, but no whole payment to schedule
        let short = LoanRequest::new(300_000.0, 30_000.0, 700).with_term(0.04);
        assert!(engine.quote_by_id("va-30", &short).is_ok());
        assert!(matches!(
            engine.schedule("va-30", &short, None),
            Err(QuoteError::InvalidInput { field: "term_years", .. })
        ));

        // One whole month schedules a single payment that matches the quote
        let one_month = short.with_term(1.0 / 12.0);
        let quote = engine.quote_by_id("va-30", &one_month).unwrap();
        let schedule = engine.schedule("va-30", &one_month, None).unwrap();
        assert_eq!(schedule.rows.len(), 1);
        assert_eq!(schedule.rows[0].balance, 0.0);
        assert_relative_eq!(
            schedule.total_interest(),
            quote.result.total_interest,
            epsilon = 1e-6
        );
    }
}
