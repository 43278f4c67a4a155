//! Raw-input validation for measurement fields.
//!
//! Each parser validates one line of solicited text against a fixed
//! pattern and converts it to the stored unit. A mismatch yields
//! [`Error::Validation`] carrying the offending text and the name of the
//! expected pattern; nothing is cached on failure.

use crate::{units, Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Height matching pattern: feet'inches" with inches in [0,11]
static HEIGHT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^([0-9]+)'([0-9]|1[01])"$"#).expect("height pattern compiles"));

/// Non-negative integer pattern
static INTEGER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("integer pattern compiles"));

/// Non-negative decimal pattern
static FLOAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\.[0-9]+|[0-9]+\.?[0-9]*)$").expect("float pattern compiles"));

/// Activity level pattern: a single digit in [0,4]
static ACTIVITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-4]$").expect("activity pattern compiles"));

/// Parse a height given as feet'inches" into centimeters
pub fn parse_height(raw: &str) -> Result<f64> {
    let caps = HEIGHT_PATTERN
        .captures(raw)
        .ok_or_else(|| Error::pattern(raw, "height"))?;
    let feet: u32 = caps[1].parse().map_err(|_| Error::pattern(raw, "height"))?;
    let inches: u32 = caps[2].parse().map_err(|_| Error::pattern(raw, "height"))?;
    Ok(units::feet_inches_to_cm(feet, inches))
}

/// Parse a weight given in non-negative decimal pounds into kilograms
pub fn parse_weight(raw: &str) -> Result<f64> {
    if !FLOAT_PATTERN.is_match(raw) {
        return Err(Error::pattern(raw, "weight"));
    }
    let pounds: f64 = raw.parse().map_err(|_| Error::pattern(raw, "weight"))?;
    Ok(units::pounds_to_kg(pounds))
}

/// Parse a gender token; `m` is stored as true, `f` as false
pub fn parse_gender(raw: &str) -> Result<bool> {
    match raw {
        "m" => Ok(true),
        "f" => Ok(false),
        _ => Err(Error::pattern(raw, "gender")),
    }
}

/// Parse an age in non-negative whole years
pub fn parse_age(raw: &str) -> Result<u32> {
    if !INTEGER_PATTERN.is_match(raw) {
        return Err(Error::pattern(raw, "age"));
    }
    raw.parse().map_err(|_| Error::pattern(raw, "age"))
}

/// Parse an activity level digit in [0,4]
pub fn parse_activity(raw: &str) -> Result<u8> {
    if !ACTIVITY_PATTERN.is_match(raw) {
        return Err(Error::pattern(raw, "activity"));
    }
    raw.parse().map_err(|_| Error::pattern(raw, "activity"))
}

/// Parse a non-negative whole measurement (circumference or skinfold)
pub fn parse_measurement(raw: &str, expected: &str) -> Result<u32> {
    if !INTEGER_PATTERN.is_match(raw) {
        return Err(Error::pattern(raw, expected));
    }
    raw.parse().map_err(|_| Error::pattern(raw, expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_height_valid() {
        assert!((parse_height("5'10\"").unwrap() - 177.8).abs() < 1e-9);
        assert!((parse_height("6'0\"").unwrap() - 182.88).abs() < 1e-9);
        assert!((parse_height("5'11\"").unwrap() - 180.34).abs() < 1e-9);
    }

    #[test]
    fn test_parse_height_rejects_bad_inches() {
        // Inches must be in [0,11]
        assert!(parse_height("5'12\"").is_err());
        assert!(parse_height("5'99\"").is_err());
    }

    #[test]
    fn test_parse_height_rejects_malformed() {
        for raw in ["510", "5'10", "5 10\"", "five'ten\"", "", "'10\""] {
            let err = parse_height(raw).unwrap_err();
            assert!(
                matches!(err, Error::Validation { .. }),
                "expected validation error for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_weight_valid() {
        assert!((parse_weight("154.0").unwrap() - 69.853168).abs() < 1e-9);
        assert!((parse_weight("154").unwrap() - 69.853168).abs() < 1e-9);
        assert!((parse_weight(".5").unwrap() - 0.226796).abs() < 1e-9);
        assert!((parse_weight("200.").unwrap() - 90.7184).abs() < 1e-9);
    }

    #[test]
    fn test_parse_weight_rejects_malformed() {
        for raw in ["-154", "1a4", "154,0", "", "."] {
            assert!(parse_weight(raw).is_err(), "expected failure for {:?}", raw);
        }
    }

    #[test]
    fn test_parse_gender() {
        assert_eq!(parse_gender("m").unwrap(), true);
        assert_eq!(parse_gender("f").unwrap(), false);
        assert!(parse_gender("M").is_err());
        assert!(parse_gender("male").is_err());
        assert!(parse_gender("").is_err());
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("25").unwrap(), 25);
        assert_eq!(parse_age("0").unwrap(), 0);
        assert!(parse_age("-1").is_err());
        assert!(parse_age("25.5").is_err());
        assert!(parse_age("abc").is_err());
    }

    #[test]
    fn test_parse_activity() {
        for raw in ["0", "1", "2", "3", "4"] {
            assert!(parse_activity(raw).is_ok());
        }
        assert!(parse_activity("5").is_err());
        assert!(parse_activity("-1").is_err());
        assert!(parse_activity("22").is_err());
    }

    #[test]
    fn test_parse_measurement_names_its_field() {
        assert_eq!(parse_measurement("85", "circumference").unwrap(), 85);
        let err = parse_measurement("85.5", "skinfold").unwrap_err();
        assert_eq!(err.to_string(), "85.5 does not match skinfold pattern");
    }
}
