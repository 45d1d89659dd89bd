//! Compare every catalog product across a credit score x market spread grid
//!
//! Outputs one row per (score, spread, product) to product_comparison.csv.
//! Accepts config via environment variables:
//!   LOAN_AMOUNT, DOWN_PAYMENT, OUTPUT_CSV
//!   plus the quote settings (MARKET_SPREAD is ignored; the grid sets the spread)

use anyhow::{Context, Result};
use loan_quote::config::env_f64;
use loan_quote::scenario::spread_grid;
use loan_quote::{QuoteEngine, QuoteSettings};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::time::Instant;

const CREDIT_SCORES: [u16; 6] = [620, 679, 680, 740, 799, 800];

#[derive(Debug, Serialize)]
struct GridRow {
    credit_score: u16,
    market_spread: f64,
    product_id: String,
    qualified: bool,
    best: bool,
    effective_rate: f64,
    monthly_payment: f64,
    total_interest: f64,
    total_cost: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    let settings = QuoteSettings::from_env();
    let engine = QuoteEngine::new(settings.catalog().context("Failed to load product catalog")?);

    let loan_amount = env_f64("LOAN_AMOUNT").unwrap_or(350_000.0);
    let down_payment = env_f64("DOWN_PAYMENT").unwrap_or(12_250.0);
    let output_path = env::var("OUTPUT_CSV").unwrap_or_else(|_| "product_comparison.csv".to_string());

    let spreads = spread_grid(0.1, 1.0, 10);
    let cells: Vec<(u16, f64)> = CREDIT_SCORES
        .iter()
        .flat_map(|&score| spreads.iter().map(move |&spread| (score, spread)))
        .collect();

    println!(
        "Comparing {} products over {} grid cells...",
        engine.catalog().len(),
        cells.len()
    );

    // Each cell is independent; run them in parallel
    let results: Vec<Vec<GridRow>> = cells
        .par_iter()
        .map(|&(score, spread)| -> loan_quote::Result<Vec<GridRow>> {
            let request = settings
                .request(loan_amount, down_payment, score)
                .with_spread(spread);
            let comparison = engine.compare(&request)?;
            Ok(comparison
                .quotes
                .iter()
                .enumerate()
                .map(|(i, q)| GridRow {
                    credit_score: score,
                    market_spread: spread,
                    product_id: q.product_id.clone(),
                    qualified: q.qualified,
                    best: comparison.best == Some(i),
                    effective_rate: q.result.effective_rate,
                    monthly_payment: q.result.monthly_payment,
                    total_interest: q.result.total_interest,
                    total_cost: q.result.total_cost,
                })
                .collect())
        })
        .collect::<loan_quote::Result<_>>()?;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("Failed to create {}", output_path))?;
    let mut rows = 0;
    for row in results.iter().flatten() {
        writer.serialize(row)?;
        rows += 1;
    }
    writer.flush()?;

    println!("Wrote {} rows to {} in {:?}", rows, output_path, start.elapsed());
    Ok(())
}
