//! Lender offers read from a CSV market file.
//!
//! The file carries a header row naming the `Lender`, `Rate` and `Available`
//! columns in any order. Fields may be quoted to hold commas.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::decimal::Rate;
use crate::errors::{QuoteError, Result};
use crate::types::LenderOffer;

const COLUMNS: [&str; 3] = ["Lender", "Rate", "Available"];

#[derive(Debug, Deserialize)]
struct MarketRecord {
    #[serde(rename = "Lender")]
    lender: String,
    // parsed exactly rather than through f64
    #[serde(rename = "Rate")]
    rate: String,
    #[serde(rename = "Available")]
    available: u64,
}

/// parse lender offers from CSV
pub fn read_market<R: Read>(reader: R) -> Result<Vec<LenderOffer>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(unparsable)?.clone();
    for column in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(unparsable(format!("missing column {}", column)));
        }
    }

    let mut lenders = Vec::new();
    for result in reader.deserialize() {
        let record: MarketRecord = result.map_err(unparsable)?;
        lenders.push(record.into_offer()?);
    }

    debug!(lenders = lenders.len(), "market read");
    Ok(lenders)
}

/// read the market file at `path`
pub fn load_market(path: impl AsRef<Path>) -> Result<Vec<LenderOffer>> {
    let path = path.as_ref();
    let invalid = || QuoteError::invalid_parameter(format!("Invalid market file: {}", path.display()));

    if !path.is_file() {
        return Err(invalid());
    }

    let file = File::open(path).map_err(|_| invalid())?;
    read_market(file)
}

impl MarketRecord {
    fn into_offer(self) -> Result<LenderOffer> {
        if self.lender.is_empty() {
            return Err(unparsable("lender name is empty"));
        }

        let rate: Rate = self
            .rate
            .parse()
            .map_err(|e| unparsable(format!("rate {:?} for {}: {}", self.rate, self.lender, e)))?;

        if rate.is_negative() {
            return Err(unparsable(format!("negative rate {} for {}", self.rate, self.lender)));
        }

        Ok(LenderOffer::new(self.lender, rate, self.available))
    }
}

fn unparsable(detail: impl ToString) -> QuoteError {
    QuoteError::invalid_parameter(format!("Unable to parse invalid market file: {}", detail.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(content: &str) -> Result<Vec<LenderOffer>> {
        read_market(content.as_bytes())
    }

    fn assert_unparsable(content: &str) {
        match read(content) {
            Err(QuoteError::InvalidParameter { message }) => {
                assert!(message.starts_with("Unable to parse invalid market file"), "{}", message)
            }
            other => panic!("expected parse failure, got {:?}", other),
        }
    }

    #[test]
    fn test_read_market() {
        let lenders = read("Lender,Rate,Available\nBob,0.075,640\nJane,0.069,480\n").unwrap();
        assert_eq!(lenders.len(), 2);
        assert_eq!(lenders[0], LenderOffer::new("Bob", Rate::from_str_exact("0.075").unwrap(), 640));
        assert_eq!(lenders[1].name, "Jane");
    }

    #[test]
    fn test_columns_in_any_order() {
        let lenders = read("Available,Lender,Rate\n640,Bob,0.075\n").unwrap();
        assert_eq!(lenders[0], LenderOffer::new("Bob", Rate::from_str_exact("0.075").unwrap(), 640));
    }

    #[test]
    fn test_quoted_comma_in_name() {
        let lenders = read("Lender,Rate,Available\n\"Smith, Bob\",0.075,640\n").unwrap();
        assert_eq!(lenders[0].name, "Smith, Bob");
    }

    #[test]
    fn test_rate_kept_exact() {
        let lenders = read("Lender,Rate,Available\nJane,0.069,480\n").unwrap();
        assert_eq!(lenders[0].rate.as_decimal().to_string(), "0.069");
    }

    #[test]
    fn test_header_only_market_is_empty() {
        assert!(read("Lender,Rate,Available\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_column() {
        assert_unparsable("Lender,Rate\nBob,0.075\n");
    }

    #[test]
    fn test_empty_file() {
        assert_unparsable("");
    }

    #[test]
    fn test_incomplete_row() {
        assert_unparsable("Lender,Rate,Available\nBob,0.075\n");
    }

    #[test]
    fn test_missing_name() {
        assert_unparsable("Lender,Rate,Available\n,0.075,640\n");
    }

    #[test]
    fn test_colon_separated() {
        assert_unparsable("Lender:Rate:Available\nBob:0.075:640\n");
    }

    #[test]
    fn test_non_numeric_values() {
        assert_unparsable("Lender,Rate,Available\nBob,high,640\n");
        assert_unparsable("Lender,Rate,Available\nBob,0.075,lots\n");
        assert_unparsable("Lender,Rate,Available\nBob,0.075,-640\n");
    }

    #[test]
    fn test_negative_rate() {
        assert_unparsable("Lender,Rate,Available\nBob,-0.075,640\n");
    }

    #[test]
    fn test_load_missing_file() {
        match load_market("no/such/market.csv") {
            Err(QuoteError::InvalidParameter { message }) => {
                assert_eq!(message, "Invalid market file: no/such/market.csv")
            }
            other => panic!("expected invalid market file, got {:?}", other),
        }
    }

    #[test]
    fn test_load_directory() {
        let dir = std::env::temp_dir();
        assert!(matches!(load_market(&dir), Err(QuoteError::InvalidParameter { .. })));
    }

    #[test]
    fn test_load_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/market.csv");
        let lenders = load_market(path).unwrap();
        assert_eq!(lenders.len(), 7);
    }
}
