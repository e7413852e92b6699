//! Standard Scaler (Z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance.
//!
//! The standard score of a sample `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training samples, and `s` is the population
//! standard deviation. A column with `s == 0` carries no information and is
//! emitted as `0.0` rather than divided.
//!
//! # Example
//! ```ignore
//! use mindscreen::preprocessing::{FittedTransformer, StandardScaler, Transformer};
//!
//! let fitted = StandardScaler::new().fit(&aligned_training_rows)?;
//! fitted.save_to_file("scaler.bin")?;
//!
//! // Later, for inference:
//! let loaded = FittedStandardScaler::load_from_file("scaler.bin")?;
//! let scaled = loaded.transform(&aligned_row)?;
//! ```

use crate::error::{Result, ScreeningError};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array1, Array2, Axis, Zip};
use serde::{Deserialize, Serialize};

/// Serializable parameters for a fitted StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerParams {
    /// Mean of each feature.
    pub mean: Vec<f64>,
    /// Population standard deviation of each feature.
    pub std: Vec<f64>,
}

/// StandardScaler transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct StandardScaler;

impl StandardScaler {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for StandardScaler {
    type Data = Array2<f64>;
    type Fitted = FittedStandardScaler;

    /// Learn per-column mean and population std (ddof = 0) from aligned rows.
    fn fit(&self, data: &Self::Data) -> Result<Self::Fitted> {
        if data.nrows() == 0 {
            return Err(ScreeningError::EmptyData(
                "Cannot fit StandardScaler on empty data".to_string(),
            ));
        }

        let mean = data
            .mean_axis(Axis(0))
            .ok_or_else(|| ScreeningError::EmptyData("no rows to average".to_string()))?;
        let std = data.std_axis(Axis(0), 0.0);

        Ok(FittedStandardScaler { mean, std })
    }
}

/// Fitted StandardScaler ready for inference.
#[derive(Clone, Debug)]
pub struct FittedStandardScaler {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl FittedStandardScaler {
    /// Get the mean values for each feature.
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Get the standard deviation values for each feature.
    pub fn std(&self) -> &Array1<f64> {
        &self.std
    }

    /// Indices of columns with zero variance.
    pub fn constant_columns(&self) -> Vec<usize> {
        self.std
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Reverse the transformation; constant columns come back as their mean.
    pub fn inverse_transform(&self, data: &Array1<f64>) -> Result<Array1<f64>> {
        self.check_len(data.len())?;
        Ok(Zip::from(data)
            .and(&self.mean)
            .and(&self.std)
            .map_collect(|&z, &m, &s| z * s + m))
    }

    fn check_len(&self, got: usize) -> Result<()> {
        if got != self.mean.len() {
            return Err(ScreeningError::DimensionMismatch {
                expected: self.mean.len(),
                got,
            });
        }
        Ok(())
    }
}

impl FittedTransformer for FittedStandardScaler {
    type Input = Array1<f64>;
    type Output = Array1<f64>;
    type Params = StandardScalerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output> {
        self.check_len(data.len())?;
        Ok(Zip::from(data)
            .and(&self.mean)
            .and(&self.std)
            .map_collect(|&x, &m, &s| if s == 0.0 { 0.0 } else { (x - m) / s }))
    }

    fn extract_params(&self) -> Self::Params {
        StandardScalerParams {
            mean: self.mean.to_vec(),
            std: self.std.to_vec(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self> {
        if params.mean.len() != params.std.len() {
            return Err(ScreeningError::DimensionMismatch {
                expected: params.mean.len(),
                got: params.std.len(),
            });
        }
        if let Some(bad) = params
            .mean
            .iter()
            .chain(params.std.iter())
            .find(|v| !v.is_finite())
        {
            return Err(ScreeningError::SerializationError(format!(
                "non-finite scaler parameter {}",
                bad
            )));
        }
        if let Some(neg) = params.std.iter().find(|&&s| s < 0.0) {
            return Err(ScreeningError::SerializationError(format!(
                "negative standard deviation {}",
                neg
            )));
        }

        Ok(Self {
            mean: Array1::from(params.mean),
            std: Array1::from(params.std),
        })
    }

    fn n_features_in(&self) -> usize {
        self.mean.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn create_test_data() -> Array2<f64> {
        // [[0, 1], [0, 1], [1, 3]]
        array![[0.0, 1.0], [0.0, 1.0], [1.0, 3.0]]
    }

    #[test]
    fn test_standard_scaler_fit() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();

        // Mean: [1/3, 5/3]
        let mean = fitted.mean();
        assert!((mean[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((mean[1] - 5.0 / 3.0).abs() < 1e-12);
        // Population std of [0, 0, 1]
        assert!((fitted.std()[0] - (2.0f64 / 9.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_standard_scaler_transform_mean_row_is_zero() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();
        let scaled = fitted.transform(&fitted.mean().clone()).unwrap();
        assert!(scaled.iter().all(|v| v.abs() < 1e-12), "scaled = {}", scaled);
    }

    #[test]
    fn test_standard_scaler_transform_values() {
        let params = StandardScalerParams {
            mean: vec![20.0, 3.0],
            std: vec![2.0, 0.5],
        };
        let fitted = FittedStandardScaler::from_params(params).unwrap();
        let scaled = fitted.transform(&array![24.0, 2.5]).unwrap();
        assert!((scaled[0] - 2.0).abs() < 1e-12);
        assert!((scaled[1] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_standard_scaler_constant_feature() {
        // All values in column 0 are the same (constant feature)
        let data = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let fitted = StandardScaler::new().fit(&data).unwrap();

        assert_eq!(fitted.std()[0], 0.0);
        assert_eq!(fitted.constant_columns(), vec![0]);

        let scaled = fitted.transform(&array![9.0, 2.0]).unwrap();
        assert_eq!(scaled[0], 0.0);
        assert!(scaled.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_standard_scaler_inverse_transform() {
        let data = create_test_data();
        let fitted = StandardScaler::new().fit(&data).unwrap();

        let row = data.row(2).to_owned();
        let recovered = fitted
            .inverse_transform(&fitted.transform(&row).unwrap())
            .unwrap();
        for (o, r) in row.iter().zip(recovered.iter()) {
            assert!((o - r).abs() < 1e-10);
        }
    }

    #[test]
    fn test_standard_scaler_feature_mismatch() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();
        let result = fitted.transform(&array![1.0, 2.0, 3.0]);

        assert!(matches!(
            result,
            Err(ScreeningError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        ));
    }

    #[test]
    fn test_standard_scaler_empty_data() {
        let data = Array2::<f64>::zeros((0, 2));
        assert!(matches!(
            StandardScaler::new().fit(&data),
            Err(ScreeningError::EmptyData(_))
        ));
    }

    #[test]
    fn test_standard_scaler_from_params_rejects_malformed() {
        let uneven = StandardScalerParams {
            mean: vec![0.0, 1.0],
            std: vec![1.0],
        };
        assert!(FittedStandardScaler::from_params(uneven).is_err());

        let nan = StandardScalerParams {
            mean: vec![f64::NAN],
            std: vec![1.0],
        };
        assert!(FittedStandardScaler::from_params(nan).is_err());

        let negative = StandardScalerParams {
            mean: vec![0.0],
            std: vec![-1.0],
        };
        assert!(FittedStandardScaler::from_params(negative).is_err());
    }

    #[test]
    fn test_standard_scaler_save_load_file() {
        let data = create_test_data();
        let fitted = StandardScaler::new().fit(&data).unwrap();

        let temp_file = std::env::temp_dir().join("mindscreen_test_standard.bin");
        fitted.save_to_file(&temp_file).unwrap();

        let loaded = FittedStandardScaler::load_from_file(&temp_file).unwrap();
        assert_eq!(loaded.n_features_in(), 2);
        assert_eq!(loaded.extract_params(), fitted.extract_params());

        std::fs::remove_file(temp_file).ok();
    }
}
