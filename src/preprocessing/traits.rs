//! Core traits for preprocessing transformers.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: Used while producing artifacts; has hyperparameters and learns from data.
//! - [`FittedTransformer`]: After fitting; ready for inference and serialization.

use crate::error::{Result, ScreeningError};
use crate::serialization::SerializableParams;

/// Trait for unfitted transformers with hyperparameters.
///
/// A transformer learns parameters from training data once, on the artifact
/// producer side. The fitted counterpart is what inference loads.
pub trait Transformer: Clone {
    /// Training data the transformer learns from.
    type Data: ?Sized;
    /// The fitted transformer type ready for inference.
    type Fitted;

    /// Fit the transformer to the training data.
    ///
    /// # Errors
    /// Returns [`ScreeningError::EmptyData`] if there is nothing to learn from.
    fn fit(&self, data: &Self::Data) -> Result<Self::Fitted>;
}

/// Trait for fitted transformers ready for inference.
///
/// # Guarantees
/// - `extract_params()` + `from_params()` is a round-trip.
/// - `save_to_file` / `load_from_file` are cross-platform compatible.
pub trait FittedTransformer: Clone {
    /// Input data type for transformation.
    type Input;
    /// Output data type after transformation.
    type Output;
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`ScreeningError::DimensionMismatch`] if the input length
    /// doesn't match the number of features seen during fit.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output>;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    ///
    /// Implementations reject parameters that are internally inconsistent.
    fn from_params(params: Self::Params) -> Result<Self>
    where
        Self: Sized;

    /// Save the fitted transformer to a file.
    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        self.extract_params().write_to(path)
    }

    /// Load a fitted transformer from a file.
    fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params = Self::Params::from_bytes(&bytes)
            .map_err(|e| ScreeningError::SerializationError(e.to_string()))?;
        Self::from_params(params)
    }

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize;
}
