//! Product catalog: the set of loan products a quote is compared across

use std::collections::HashSet;
use std::path::Path;

use super::loader::{load_products, load_products_from_reader};
use super::LoanProduct;
use crate::error::{QuoteError, Result};

/// Ordered collection of loan products with unique ids
///
/// Order matters: best-of-N selection breaks ties in favor of the earlier product.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Vec<LoanProduct>,
}

impl ProductCatalog {
    /// Build a catalog, rejecting duplicate product ids
    pub fn new(products: Vec<LoanProduct>) -> Result<Self> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(QuoteError::DuplicateProduct(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Built-in products used when no catalog file is supplied
    pub fn default_catalog() -> Self {
        Self {
            products: vec![
                LoanProduct {
                    id: "fha-30".to_string(),
                    name: "FHA 30-Year Fixed".to_string(),
                    base_rate: 3.1,
                    risk_adjustment: 0.15,
                    max_loan: 472_030.0,
                    min_down_percent: 3.5,
                    upfront_fee_percent: 1.75,
                    annual_insurance_percent: 0.55,
                },
                LoanProduct {
                    id: "conv-30".to_string(),
                    name: "Conventional 30-Year Fixed".to_string(),
                    base_rate: 3.4,
                    risk_adjustment: 0.05,
                    max_loan: 766_550.0,
                    min_down_percent: 5.0,
                    upfront_fee_percent: 0.5,
                    annual_insurance_percent: 0.3,
                },
                LoanProduct {
                    id: "va-30".to_string(),
                    name: "VA 30-Year Fixed".to_string(),
                    base_rate: 2.9,
                    risk_adjustment: 0.1,
                    max_loan: 1_000_000.0,
                    min_down_percent: 0.0,
                    upfront_fee_percent: 2.15,
                    annual_insurance_percent: 0.0,
                },
                LoanProduct {
                    id: "usda-50".to_string(),
                    name: "USDA Guaranteed 50-Year".to_string(),
                    base_rate: 3.0,
                    risk_adjustment: 0.2,
                    max_loan: 400_000.0,
                    min_down_percent: 0.0,
                    upfront_fee_percent: 1.0,
                    annual_insurance_percent: 0.35,
                },
                LoanProduct {
                    id: "jumbo-30".to_string(),
                    name: "Jumbo 30-Year Fixed".to_string(),
                    base_rate: 3.6,
                    risk_adjustment: 0.25,
                    max_loan: 2_500_000.0,
                    min_down_percent: 20.0,
                    upfront_fee_percent: 0.25,
                    annual_insurance_percent: 0.0,
                },
            ],
        }
    }

    /// Load the catalog from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(load_products(path)?)
    }

    /// Load the catalog from CSV text in any reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Self::new(load_products_from_reader(reader)?)
    }

    pub fn get(&self, id: &str) -> Result<&LoanProduct> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| QuoteError::UnknownProduct(id.to_string()))
    }

    /// Sub-catalog holding only the listed ids, in catalog order
    pub fn subset(&self, ids: &[String]) -> Result<Self> {
        for id in ids {
            self.get(id)?;
        }
        Ok(Self {
            products: self
                .products
                .iter()
                .filter(|p| ids.contains(&p.id))
                .cloned()
                .collect(),
        })
    }

    pub fn products(&self) -> &[LoanProduct] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoanProduct> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_ids_unique() {
        let catalog = ProductCatalog::default_catalog();
        assert_eq!(catalog.len(), 5);
        assert!(ProductCatalog::new(catalog.products().to_vec()).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut products = ProductCatalog::default_catalog().products().to_vec();
        let first = products[0].clone();
        products.push(first);
        let err = ProductCatalog::new(products).unwrap_err();
        assert!(matches!(err, QuoteError::DuplicateProduct(ref id) if id == "fha-30"));
    }

    #[test]
    fn test_get_unknown_product() {
        let catalog = ProductCatalog::default_catalog();
        assert_eq!(catalog.get("va-30").unwrap().min_down_percent, 0.0);
        assert!(matches!(catalog.get("arm-5-1"), Err(QuoteError::UnknownProduct(_))));
    }

    #[test]
    fn test_subset_keeps_catalog_order() {
        let catalog = ProductCatalog::default_catalog();
        let ids = vec!["usda-50".to_string(), "fha-30".to_string()];
        let subset = catalog.subset(&ids).unwrap();
        let order: Vec<_> = subset.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["fha-30", "usda-50"]);

        assert!(catalog.subset(&["nope".to_string()]).is_err());
    }

    #[test]
    fn test_csv_file_matches_builtin_catalog() {
        let from_file = ProductCatalog::from_csv_path(crate::product::DEFAULT_PRODUCTS_PATH).unwrap();
        assert_eq!(from_file.products(), ProductCatalog::default_catalog().products());
    }
}
