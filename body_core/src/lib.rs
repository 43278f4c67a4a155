#![forbid(unsafe_code)]

//! Core domain model and business logic for the Bodycalc measurement system.
//!
//! This crate provides:
//! - The measurement record and its sub-record types
//! - Schema-checked record persistence
//! - Raw-input validation and unit conversion
//! - Derived health metrics (BMI, BAI, BMR, two body-fat estimators)

pub mod types;
pub mod error;
pub mod units;
pub mod fields;
pub mod category;
pub mod schema;
pub mod store;
pub mod config;
pub mod logging;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use schema::Schema;
pub use store::RecordStore;
pub use engine::{Engine, Prompt, ReportSink};
