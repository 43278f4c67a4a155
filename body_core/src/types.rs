//! Measurement record types.
//!
//! The record is the single current snapshot of a user's measurements.
//! Every top-level field is optional on its own; sub-records are
//! all-or-nothing. A field, once present, is treated as ground truth for
//! the session and is never overwritten until the record is explicitly
//! cleared.

use serde::{Deserialize, Serialize};

/// Ordinal activity level labels, indexed by the stored `activity` value
pub const ACTIVITY_LEVELS: [&str; 5] = ["Sedentary", "Light", "Moderate", "Very", "Extra"];

/// Neck, waist, and hip circumferences in whole centimeters
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Circumference {
    pub neck: u32,
    pub waist: u32,
    pub hip: u32,
}

/// Four-site skinfold measurements in whole millimeters
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Skinfold {
    pub abdominal: u32,
    pub suprailiac: u32,
    pub tricep: u32,
    pub thigh: u32,
}

impl Skinfold {
    /// Sum of all four sites, as used by the caliper estimator
    pub fn total(&self) -> u32 {
        self.abdominal + self.suprailiac + self.tricep + self.thigh
    }
}

/// A user's persisted measurement fields.
///
/// Absent fields are omitted from the serialized form, so a fresh record
/// persists as an empty object.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Record {
    /// Height in centimeters, > 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Weight in kilograms, > 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// true = male; selects the male coefficient branch of every formula
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<bool>,

    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    /// Ordinal activity level in [0,4], see [`ACTIVITY_LEVELS`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub circumference: Option<Circumference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skinfold: Option<Skinfold>,
}

impl Record {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        *self == Record::default()
    }
}
