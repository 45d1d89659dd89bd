//! Load loan products from a catalog CSV

use super::LoanProduct;
use crate::error::Result;
use csv::Reader;
use std::path::Path;

/// Default catalog location, relative to the working directory
pub const DEFAULT_PRODUCTS_PATH: &str = "data/loan_products.csv";

/// Raw CSV row matching loan_products.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ProductID")]
    product_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "BaseRate")]
    base_rate: f64,
    #[serde(rename = "RiskAdjustment")]
    risk_adjustment: f64,
    #[serde(rename = "MaxLoan")]
    max_loan: f64,
    #[serde(rename = "MinDownPercent")]
    min_down_percent: f64,
    #[serde(rename = "UpfrontFeePercent", default)]
    upfront_fee_percent: f64,
    #[serde(rename = "AnnualInsurancePercent", default)]
    annual_insurance_percent: f64,
}

impl CsvRow {
    fn into_product(self) -> LoanProduct {
        LoanProduct {
            id: self.product_id.trim().to_string(),
            name: self.name.trim().to_string(),
            base_rate: self.base_rate,
            risk_adjustment: self.risk_adjustment,
            max_loan: self.max_loan,
            min_down_percent: self.min_down_percent,
            upfront_fee_percent: self.upfront_fee_percent,
            annual_insurance_percent: self.annual_insurance_percent,
        }
    }
}

fn read_products<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LoanProduct>> {
    let mut products = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        products.push(row.into_product());
    }

    log::debug!("Loaded {} loan products", products.len());
    Ok(products)
}

/// Load all products from a CSV file
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<LoanProduct>> {
    read_products(Reader::from_path(path)?)
}

/// Load products from any reader (e.g., string buffer, request body)
pub fn load_products_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoanProduct>> {
    read_products(Reader::from_reader(reader))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ProductID,Name,BaseRate,RiskAdjustment,MaxLoan,MinDownPercent,UpfrontFeePercent,AnnualInsurancePercent
fha-30, FHA 30-Year ,3.1,0.15,472030,3.5,1.75,0.55
conv-30,Conventional 30-Year,3.4,0.05,766550,5,0.5,0
";

    #[test]
    fn test_load_from_reader() {
        let products = load_products_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);

        let fha = &products[0];
        assert_eq!(fha.id, "fha-30");
        assert_eq!(fha.name, "FHA 30-Year");
        assert_eq!(fha.min_down_percent, 3.5);
        assert_eq!(fha.annual_insurance_percent, 0.55);

        assert_eq!(products[1].upfront_fee_percent, 0.5);
    }

    #[test]
    fn test_bad_number_is_csv_error() {
        let bad = "\
ProductID,Name,BaseRate,RiskAdjustment,MaxLoan,MinDownPercent,UpfrontFeePercent,AnnualInsurancePercent
x,X,abc,0,1,1,0,0
";
        let err = load_products_from_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, crate::error::QuoteError::Csv(_)));
    }

    #[test]
    fn test_load_default_catalog_file() {
        let products = load_products(DEFAULT_PRODUCTS_PATH).expect("Failed to load products");
        assert!(!products.is_empty());
        assert!(products.iter().any(|p| p.id == "usda-50"));
    }
}
