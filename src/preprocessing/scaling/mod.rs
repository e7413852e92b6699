//! Scaling transformers for feature normalization.
//!
//! Only z-score standardization is used by the screening models; the fitted
//! parameters travel as the scaler artifact.

pub mod standard;

pub use standard::{FittedStandardScaler, StandardScaler, StandardScalerParams};
