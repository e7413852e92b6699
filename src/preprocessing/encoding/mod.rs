//! Categorical feature encoding.
//!
//! Survey answers are turned into numeric columns in two stages:
//!
//! ## CategoricalDomain
//! The closed set of canonical values per categorical field, fitted once from
//! training records and stored in the schema artifact.
//!
//! ## OneHotEncoder
//! Expands a record into named columns (`age`, `cgpa`, `gender_female`, ...)
//! using those domains.
//!
//! ```ignore
//! // gender "Female", course "Engineering"
//! // -> [("age", 21.0), ..., ("gender_female", 1.0), ("course_engineering", 1.0), ...]
//! ```
//!
//! # Unknown categories
//!
//! Course values outside the fitted top-N map to the `other` bucket, the same
//! rule the schema was fitted with. Gender and marital status have no bucket:
//! an unseen value produces a column the schema does not contain, so its
//! contribution after alignment is all zeros.

mod domain;
mod one_hot;

pub use domain::{CategoricalDomain, DEFAULT_TOP_COURSES, OVERFLOW_CATEGORY};
pub use one_hot::{EncodedRow, FittedOneHotEncoder, OneHotEncoder};

/// Numeric pass-through columns, in schema order.
pub const NUMERIC_COLUMNS: [&str; 3] = ["age", "year_of_study", "cgpa"];
