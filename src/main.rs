//! Loan Quote CLI
//!
//! Command-line interface for quoting, comparing, and scheduling loans

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use loan_quote::pricing::{
    affordability, credit_adjustment, effective_rate, round_currency, BorrowerProfile, CreditTier,
    Guarantee,
};
use loan_quote::{Comparison, LoanRequest, ProductQuote, QuoteEngine, QuoteSettings};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "loan_quote", version, about = "Quote and compare fixed-rate loans")]
struct Cli {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quote a single product
    Quote {
        #[arg(long)]
        product: String,
        #[command(flatten)]
        loan: LoanArgs,
    },
    /// Compare every catalog product and pick the cheapest qualified one
    Compare {
        #[command(flatten)]
        loan: LoanArgs,
    },
    /// Print the amortization schedule for a product
    Schedule {
        #[arg(long)]
        product: String,
        /// First payment date (YYYY-MM-DD)
        #[arg(long)]
        first_payment: Option<NaiveDate>,
        /// Summarize by loan year instead of by month
        #[arg(long)]
        yearly: bool,
        #[command(flatten)]
        loan: LoanArgs,
    },
    /// Size the largest loan a borrower can afford on a product
    Afford {
        #[arg(long)]
        product: String,
        /// Gross monthly income
        #[arg(long)]
        income: f64,
        /// Existing monthly debt payments
        #[arg(long, default_value_t = 0.0)]
        debts: f64,
        /// Cash available for the down payment
        #[arg(long, default_value_t = 0.0)]
        down: f64,
        /// Debt-to-income cap (percent)
        #[arg(long, default_value_t = loan_quote::pricing::affordability::DEFAULT_MAX_DTI_PERCENT)]
        max_dti: f64,
        #[arg(long)]
        credit_score: u16,
        #[command(flatten)]
        terms: TermArgs,
    },
}

/// Rate-shaping inputs; unset values fall back to the environment, then defaults
#[derive(Args, Debug)]
struct TermArgs {
    /// Market spread (percent)
    #[arg(long)]
    spread: Option<f64>,
    /// Loan term in years
    #[arg(long)]
    term: Option<f64>,
    /// Guarantee term in years
    #[arg(long)]
    guarantee_years: Option<f64>,
    /// Guarantee coverage (percent of balance)
    #[arg(long)]
    guarantee_coverage: Option<f64>,
    /// Product catalog CSV
    #[arg(long)]
    products: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LoanArgs {
    /// Loan amount before down payment
    #[arg(long)]
    amount: f64,
    #[arg(long)]
    down: f64,
    #[arg(long)]
    credit_score: u16,
    #[command(flatten)]
    terms: TermArgs,
}

impl TermArgs {
    fn settings(&self) -> QuoteSettings {
        let mut settings = QuoteSettings::from_env();
        if let Some(v) = self.spread {
            settings.market_spread = v;
        }
        if let Some(v) = self.term {
            settings.term_years = v;
        }
        if let Some(v) = self.guarantee_years {
            settings.guarantee_term_years = v;
        }
        if let Some(v) = self.guarantee_coverage {
            settings.guarantee_coverage_percent = v;
        }
        if let Some(ref p) = self.products {
            settings.products_csv = Some(p.clone());
        }
        settings
    }
}

impl LoanArgs {
    fn resolve(&self) -> Result<(QuoteEngine, LoanRequest)> {
        let settings = self.terms.settings();
        let catalog = settings.catalog().context("Failed to load product catalog")?;
        let request = settings.request(self.amount, self.down, self.credit_score);
        Ok((QuoteEngine::new(catalog), request))
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_request(request: &LoanRequest) {
    println!("Loan amount:   ${:.2}", request.loan_amount);
    println!("Down payment:  ${:.2} ({:.2}%)", request.down_payment, request.down_percent());
    println!("Principal:     ${:.2}", request.principal());
    println!(
        "Credit score:  {} {}",
        request.credit_score,
        CreditTier::from_score(request.credit_score).as_str()
    );
    println!("Term:          {} years", request.term_years);
    println!("Market spread: {:.2}%", request.market_spread);
    println!(
        "Guarantee:     {} years at {}%",
        request.guarantee_term_years, request.guarantee_coverage_percent
    );
    println!();
}

fn print_quote(quote: &ProductQuote) {
    let r = &quote.result;
    println!("{} ({})", quote.product_name, quote.product_id);
    println!("  Qualified:          {}", if quote.qualified { "yes" } else { "no" });
    println!("  Min down payment:   ${:.2}", round_currency(quote.min_down_payment));
    println!("  Credit adjustment:  {:+.2}%", r.credit_adjustment);
    println!("  Guarantee discount: {:.3}%", r.guarantee_discount);
    println!("  Effective rate:     {:.3}%", r.effective_rate);
    println!("  Monthly payment:    ${:.2}", round_currency(r.monthly_payment));
    println!("  Total interest:     ${:.2}", round_currency(r.total_interest));
    println!("  Upfront fees:       ${:.2}", round_currency(quote.upfront_fees));
    println!("  Insurance (term):   ${:.2}", round_currency(quote.insurance_over_term));
    println!("  Total cost:         ${:.2}", round_currency(r.total_cost));
}

fn print_comparison(comparison: &Comparison) {
    println!(
        "{:<10} {:<28} {:>4} {:>8} {:>12} {:>16} {:>14}",
        "Product", "Name", "Qual", "Rate", "Payment", "TotalCost", "OverBest"
    );
    println!("{}", "-".repeat(98));

    for quote in &comparison.quotes {
        let over_best = comparison
            .cost_over_best(&quote.product_id)
            .filter(|_| quote.qualified)
            .map(|d| format!("{:.2}", round_currency(d)))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:<28} {:>4} {:>7.3}% {:>12.2} {:>16.2} {:>14}",
            quote.product_id,
            quote.product_name,
            if quote.qualified { "yes" } else { "no" },
            quote.result.effective_rate,
            round_currency(quote.result.monthly_payment),
            round_currency(quote.result.total_cost),
            over_best,
        );
    }

    println!();
    match comparison.best_quote() {
        Some(best) => println!("Best qualified product: {} ({})", best.product_name, best.product_id),
        None => println!("No product qualifies for this request"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Quote { product, loan } => {
            let (engine, request) = loan.resolve()?;
            let quote = engine.quote_by_id(&product, &request)?;
            if cli.json {
                return print_json(&quote);
            }
            print_request(&request);
            print_quote(&quote);
        }
        Command::Compare { loan } => {
            let (engine, request) = loan.resolve()?;
            let comparison = engine.compare(&request)?;
            if cli.json {
                return print_json(&comparison);
            }
            print_request(&request);
            print_comparison(&comparison);
        }
        Command::Schedule {
            product,
            first_payment,
            yearly,
            loan,
        } => {
            let (engine, request) = loan.resolve()?;
            let schedule = engine.schedule(&product, &request, first_payment)?;
            if cli.json {
                return print_json(&schedule);
            }

            if yearly {
                println!("{:>4} {:>14} {:>14}", "Year", "Interest", "Principal");
                for (year, interest, principal) in schedule.yearly_totals() {
                    println!("{:>4} {:>14.2} {:>14.2}", year, interest, principal);
                }
            } else {
                println!(
                    "{:>6} {:>10} {:>12} {:>12} {:>12} {:>14}",
                    "Period", "Date", "Payment", "Interest", "Principal", "Balance"
                );
                for row in &schedule.rows {
                    let date = row
                        .payment_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:>6} {:>10} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                        row.period, date, row.payment, row.interest, row.principal, row.balance
                    );
                }
            }
            println!("\nTotal interest: ${:.2}", round_currency(schedule.total_interest()));
        }
        Command::Afford {
            product,
            income,
            debts,
            down,
            max_dti,
            credit_score,
            terms,
        } => {
            let settings = terms.settings();
            let catalog = settings.catalog().context("Failed to load product catalog")?;
            let product = catalog.get(&product)?;

            let guarantee =
                Guarantee::new(settings.guarantee_term_years, settings.guarantee_coverage_percent);
            let rate = effective_rate(
                product.base_rate,
                settings.market_spread,
                product.risk_adjustment,
                credit_adjustment(credit_score),
                guarantee.discount(),
            );

            let profile = BorrowerProfile {
                gross_monthly_income: income,
                monthly_debts: debts,
                down_payment_available: down,
                max_dti_percent: max_dti,
            };
            let result = affordability(&profile, rate, settings.term_years)?;
            if cli.json {
                return print_json(&result);
            }

            println!("{} at {:.3}% over {} years", product.name, rate, settings.term_years);
            println!("  Payment budget:  ${:.2}", round_currency(result.payment_budget));
            println!("  Max principal:   ${:.2}", round_currency(result.max_principal));
            println!("  Max loan amount: ${:.2}", round_currency(result.max_loan_amount));
            if result.max_principal > product.max_loan {
                println!("  Note: capped by product maximum of ${:.2}", product.max_loan);
            }
        }
    }

    Ok(())
}
