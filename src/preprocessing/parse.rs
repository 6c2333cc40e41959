//! Raw field parsers
//!
//! Training-time parsers are strict: malformed mileage or price text aborts the
//! run, and unrecognized accident text marks the row for removal. The
//! inference-time flag parser never fails.

use crate::error::{CarPriceError, Result};
use super::schema::{MILEAGE_SOURCE, MODEL_YEAR, PRICE};

const NO_ACCIDENT: &str = "No accident";
const ACCIDENT_REPORTED: &str = "At least 1 accident or damage reported";

/// Parse a mileage string such as `"51,000 mi."`.
///
/// Every non-digit character is stripped before parsing, so an input without
/// any digit is an error. So is a digit string beyond `u64::MAX`.
pub fn parse_mileage(raw: &str) -> Result<u64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<u64>()
        .map_err(|_| CarPriceError::parse(MILEAGE_SOURCE, raw))
}

/// Parse a currency string such as `"$12,345"`.
pub fn parse_price(raw: &str) -> Result<f64> {
    let cleaned: String = raw.chars().filter(|&c| c != '$' && c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| CarPriceError::parse(PRICE, raw))
}

/// Parse the model year column of the training dataset.
pub fn parse_model_year(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<i64>()
        .map(|year| year as f64)
        .map_err(|_| CarPriceError::parse(MODEL_YEAR, raw))
}

/// Map the dataset's accident history text to 0/1.
///
/// Returns `None` for anything but the two known phrases; callers drop such rows.
pub fn normalize_accident(raw: &str) -> Option<u8> {
    match raw {
        NO_ACCIDENT => Some(0),
        ACCIDENT_REPORTED => Some(1),
        _ => None,
    }
}

/// Request-side yes/no flag: exactly `"Yes"` is 1, everything else is 0.
pub fn yes_flag(raw: &str) -> f64 {
    if raw == "Yes" {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mileage() {
        assert_eq!(parse_mileage("51,000 mi.").unwrap(), 51000);
        assert_eq!(parse_mileage("0 mi.").unwrap(), 0);
        assert_eq!(parse_mileage("1,234,567 mi.").unwrap(), 1_234_567);
    }

    #[test]
    fn test_parse_mileage_u64_boundary() {
        assert_eq!(parse_mileage("18,446,744,073,709,551,615 mi.").unwrap(), u64::MAX);
        let err = parse_mileage("18,446,744,073,709,551,616 mi.").unwrap_err();
        assert!(matches!(err, CarPriceError::ParseError { ref field, .. } if field == MILEAGE_SOURCE));
    }

    #[test]
    fn test_parse_mileage_without_digits() {
        let err = parse_mileage("unknown").unwrap_err();
        assert!(matches!(err, CarPriceError::ParseError { ref field, .. } if field == "milage"));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("$12,345").unwrap(), 12345.0);
        assert_eq!(parse_price("$1,000,000").unwrap(), 1_000_000.0);
        assert!(parse_price("call for price").is_err());
    }

    #[test]
    fn test_parse_model_year() {
        assert_eq!(parse_model_year("2019").unwrap(), 2019.0);
        assert!(parse_model_year("new").is_err());
    }

    #[test]
    fn test_normalize_accident() {
        assert_eq!(normalize_accident("No accident"), Some(0));
        assert_eq!(normalize_accident("At least 1 accident or damage reported"), Some(1));
        assert_eq!(normalize_accident("Maybe"), None);
        // already-numeric text is not accepted either
        assert_eq!(normalize_accident("1"), None);
    }

    #[test]
    fn test_yes_flag() {
        assert_eq!(yes_flag("Yes"), 1.0);
        assert_eq!(yes_flag("No"), 0.0);
        assert_eq!(yes_flag("yes"), 0.0);
        assert_eq!(yes_flag("Maybe"), 0.0);
    }
}
