//! Loan products, borrower requests, and catalog loading

mod data;
mod catalog;
pub mod loader;

pub use data::{LoanProduct, LoanRequest, DEFAULT_MARKET_SPREAD, DEFAULT_TERM_YEARS};
pub use catalog::ProductCatalog;
pub use loader::{load_products, load_products_from_reader, DEFAULT_PRODUCTS_PATH};
