//! AWS Lambda handler for loan quotes
//!
//! Accepts a borrower request via JSON and returns every product's quote, the
//! best qualified product, and optionally its payment schedule and the
//! borrower's affordability at that product's rate.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::{DateTime, NaiveDate, Utc};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use loan_quote::pricing::{affordability, Affordability, AmortizationSchedule, BorrowerProfile};
use loan_quote::{Comparison, QuoteEngine, QuoteError, QuoteSettings};
use serde::{Deserialize, Serialize};

/// Input for a quote request; unset rate inputs fall back to QuoteSettings
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub loan_amount: f64,
    pub down_payment: f64,
    pub credit_score: u16,

    #[serde(default)]
    pub market_spread: Option<f64>,

    #[serde(default)]
    pub term_years: Option<f64>,

    #[serde(default)]
    pub guarantee_term_years: Option<f64>,

    #[serde(default)]
    pub guarantee_coverage_percent: Option<f64>,

    /// Restrict the comparison to these products
    #[serde(default)]
    pub product_ids: Option<Vec<String>>,

    /// Include the best product's amortization schedule
    #[serde(default)]
    pub include_schedule: bool,

    #[serde(default)]
    pub first_payment_date: Option<NaiveDate>,

    /// Size the borrower's maximum loan at the best product's rate
    #[serde(default)]
    pub borrower: Option<BorrowerProfile>,
}

/// Output from a quote request
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quoted_at: DateTime<Utc>,
    pub product_count: usize,
    pub comparison: Comparison,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<AmortizationSchedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordability: Option<Affordability>,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(&ErrorBody { error: message })?;
    Ok(cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))?)
}

fn json_response(body: &QuoteResponse) -> Result<Response<Body>, Error> {
    Ok(cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

fn status_for(err: &QuoteError) -> u16 {
    match err {
        QuoteError::InvalidInput { .. } => 422,
        QuoteError::UnknownProduct(_) => 404,
        _ => 500,
    }
}

fn quote(request: &QuoteRequest) -> Result<QuoteResponse, QuoteError> {
    let start = std::time::Instant::now();

    let mut settings = QuoteSettings::from_env();
    if let Some(v) = request.market_spread {
        settings.market_spread = v;
    }
    if let Some(v) = request.term_years {
        settings.term_years = v;
    }
    if let Some(v) = request.guarantee_term_years {
        settings.guarantee_term_years = v;
    }
    if let Some(v) = request.guarantee_coverage_percent {
        settings.guarantee_coverage_percent = v;
    }

    let mut catalog = settings.catalog()?;
    if let Some(ref ids) = request.product_ids {
        catalog = catalog.subset(ids)?;
    }
    let engine = QuoteEngine::new(catalog);

    let loan = settings.request(request.loan_amount, request.down_payment, request.credit_score);
    let comparison = engine.compare(&loan)?;

    let (schedule, afford) = match comparison.best_quote() {
        Some(best) => {
            let schedule = if request.include_schedule {
                Some(engine.schedule(&best.product_id, &loan, request.first_payment_date)?)
            } else {
                None
            };
            let afford = match request.borrower {
                Some(ref profile) => Some(affordability(
                    profile,
                    best.result.effective_rate,
                    loan.term_years,
                )?),
                None => None,
            };
            (schedule, afford)
        }
        None => (None, None),
    };

    Ok(QuoteResponse {
        quoted_at: Utc::now(),
        product_count: engine.catalog().len(),
        comparison,
        schedule,
        affordability: afford,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: QuoteRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    match quote(&request) {
        Ok(response) => json_response(&response),
        Err(e) => {
            log::warn!("Quote failed: {}", e);
            error_response(status_for(&e), &e.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
