//! Unit conversion for raw measurement input.
//!
//! Measurements are solicited in imperial units and stored in metric.

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Inches per foot
pub const INCHES_PER_FOOT: u32 = 12;

/// Kilograms per pound
pub const KG_PER_POUND: f64 = 0.453592;

/// Convert a feet-and-inches height to centimeters
pub fn feet_inches_to_cm(feet: u32, inches: u32) -> f64 {
    CM_PER_INCH * f64::from(INCHES_PER_FOOT * feet + inches)
}

/// Convert a weight in pounds to kilograms
pub fn pounds_to_kg(pounds: f64) -> f64 {
    KG_PER_POUND * pounds
}
