//! Structural schema for the measurement record.
//!
//! The schema is an externally supplied JSON document describing the
//! allowed field names, types, nesting, required members, and numeric
//! bounds of the record. Both load and persist fail closed when the
//! record does not conform.

use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Value types the schema vocabulary distinguishes
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Number,
    Integer,
    Boolean,
    String,
}

/// One node of the structural schema document
#[derive(Clone, Debug, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: SchemaType,

    #[serde(default)]
    pub properties: HashMap<String, Schema>,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default = "default_additional", rename = "additionalProperties")]
    pub additional_properties: bool,

    #[serde(default)]
    pub minimum: Option<f64>,

    #[serde(default)]
    pub maximum: Option<f64>,

    #[serde(default, rename = "exclusiveMinimum")]
    pub exclusive_minimum: Option<f64>,
}

fn default_additional() -> bool {
    true
}

impl Schema {
    /// Load the schema document from its external location.
    ///
    /// An absent or malformed document is a fatal startup condition.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::SchemaLoad(format!(
                "schema file {} not found",
                path.display()
            )));
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::SchemaLoad(format!("unable to read {}: {}", path.display(), e)))?;
        let schema = serde_json::from_str(&contents)
            .map_err(|e| Error::SchemaLoad(format!("malformed schema {}: {}", path.display(), e)))?;
        tracing::debug!("Loaded schema from {:?}", path);
        Ok(schema)
    }

    /// Validate a JSON value against this schema.
    ///
    /// Every violation is collected before failing, so the diagnostic
    /// names all nonconforming fields at once.
    pub fn validate(&self, value: &Value) -> Result<()> {
        let mut errors = Vec::new();
        self.check("record", value, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::SchemaValidation(errors.join("; ")))
        }
    }

    fn check(&self, at: &str, value: &Value, errors: &mut Vec<String>) {
        match self.kind {
            SchemaType::Object => {
                let Some(map) = value.as_object() else {
                    errors.push(format!("{}: expected an object", at));
                    return;
                };
                for name in &self.required {
                    if !map.contains_key(name) {
                        errors.push(format!("{}: missing required member {}", at, name));
                    }
                }
                for (name, member) in map {
                    match self.properties.get(name) {
                        Some(prop) => prop.check(&format!("{}.{}", at, name), member, errors),
                        None if !self.additional_properties => {
                            errors.push(format!("{}.{}: unexpected field", at, name));
                        }
                        None => {}
                    }
                }
            }
            SchemaType::Number => match value.as_f64() {
                Some(n) => self.check_range(at, n, errors),
                None => errors.push(format!("{}: expected a number", at)),
            },
            SchemaType::Integer => {
                if value.is_i64() || value.is_u64() {
                    if let Some(n) = value.as_f64() {
                        self.check_range(at, n, errors);
                    }
                } else {
                    errors.push(format!("{}: expected an integer", at));
                }
            }
            SchemaType::Boolean => {
                if !value.is_boolean() {
                    errors.push(format!("{}: expected a boolean", at));
                }
            }
            SchemaType::String => {
                if !value.is_string() {
                    errors.push(format!("{}: expected a string", at));
                }
            }
        }
    }

    fn check_range(&self, at: &str, n: f64, errors: &mut Vec<String>) {
        if let Some(min) = self.exclusive_minimum {
            if n <= min {
                errors.push(format!("{}: {} must be greater than {}", at, n, min));
            }
        }
        if let Some(min) = self.minimum {
            if n < min {
                errors.push(format!("{}: {} is below minimum {}", at, n, min));
            }
        }
        if let Some(max) = self.maximum {
            if n > max {
                errors.push(format!("{}: {} is above maximum {}", at, n, max));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RECORD_SCHEMA: &str = include_str!("../../schema.json");

    fn record_schema() -> Schema {
        serde_json::from_str(RECORD_SCHEMA).unwrap()
    }

    #[test]
    fn test_load_missing_schema_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = Schema::load(&temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::SchemaLoad(_))));
    }

    #[test]
    fn test_load_malformed_schema_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schema.json");
        std::fs::write(&path, "{ not json }").unwrap();

        let result = Schema::load(&path);
        assert!(matches!(result, Err(Error::SchemaLoad(_))));
    }

    #[test]
    fn test_empty_record_is_valid() {
        assert!(record_schema().validate(&json!({})).is_ok());
    }

    #[test]
    fn test_full_record_is_valid() {
        let value = json!({
            "height": 177.8,
            "weight": 69.853168,
            "gender": true,
            "age": 25,
            "activity": 2,
            "circumference": {"neck": 37, "waist": 85, "hip": 95},
            "skinfold": {"abdominal": 20, "suprailiac": 15, "tricep": 12, "thigh": 18}
        });
        assert!(record_schema().validate(&value).is_ok());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let result = record_schema().validate(&json!({"height": "tall"}));
        assert!(matches!(result, Err(Error::SchemaValidation(_))));

        let result = record_schema().validate(&json!({"gender": "m"}));
        assert!(matches!(result, Err(Error::SchemaValidation(_))));

        // Integer fields reject fractional numbers
        let result = record_schema().validate(&json!({"age": 25.5}));
        assert!(matches!(result, Err(Error::SchemaValidation(_))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = record_schema().validate(&json!({"shoe_size": 44}));
        assert!(matches!(result, Err(Error::SchemaValidation(_))));
    }

    #[test]
    fn test_numeric_bounds_enforced() {
        // height is exclusiveMinimum 0
        assert!(record_schema().validate(&json!({"height": 0})).is_err());
        assert!(record_schema().validate(&json!({"height": 0.1})).is_ok());

        // activity is capped at 4
        assert!(record_schema().validate(&json!({"activity": 5})).is_err());
        assert!(record_schema().validate(&json!({"activity": 4})).is_ok());

        assert!(record_schema().validate(&json!({"age": -1})).is_err());
    }

    #[test]
    fn test_partial_sub_record_rejected() {
        let result = record_schema().validate(&json!({
            "circumference": {"neck": 37, "waist": 85}
        }));
        assert!(matches!(result, Err(Error::SchemaValidation(_))));
    }

    #[test]
    fn test_all_violations_collected() {
        let result = record_schema().validate(&json!({
            "height": "tall",
            "activity": 9
        }));
        let Err(Error::SchemaValidation(message)) = result else {
            panic!("expected schema validation failure");
        };
        assert!(message.contains("height"));
        assert!(message.contains("activity"));
    }
}
