//! Error types for quoting and catalog loading

use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Errors raised while quoting loans or loading product catalogs
#[derive(Error, Debug)]
pub enum QuoteError {
    /// A numeric input the formula cannot work with
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// Product id not present in the catalog
    #[error("Unknown loan product: {0}")]
    UnknownProduct(String),

    /// Two catalog rows share the same product id
    #[error("Duplicate loan product id: {0}")]
    DuplicateProduct(String),

    /// Catalog file missing or malformed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl QuoteError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        QuoteError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
