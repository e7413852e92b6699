//! Runtime configuration.
//!
//! Everything has a default, so an empty JSON object is a valid config file.
//!
//! ```json
//! {
//!   "artifacts": { "dir": "artifacts", "scaler_file": "scaler.bin" },
//!   "recommendations": { "academic_cgpa_threshold": 3.0, "max_items": 5 }
//! }
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the three inference artifacts live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub dir: PathBuf,
    pub schema_file: String,
    pub scaler_file: String,
    pub ensemble_file: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("artifacts"),
            schema_file: "schema.json".to_string(),
            scaler_file: "scaler.bin".to_string(),
            ensemble_file: "ensemble.bin".to_string(),
        }
    }
}

impl ArtifactConfig {
    /// Default file names inside `dir`.
    pub fn with_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn schema_path(&self) -> PathBuf {
        self.dir.join(&self.schema_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(&self.scaler_file)
    }

    pub fn ensemble_path(&self) -> PathBuf {
        self.dir.join(&self.ensemble_file)
    }
}

/// Thresholds for the personalised recommendation list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationPolicy {
    /// CGPA strictly below this adds academic recommendations.
    pub academic_cgpa_threshold: f64,
    /// How many recommendations a caller should show.
    pub max_items: usize,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            academic_cgpa_threshold: 3.0,
            max_items: 5,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
    pub artifacts: ArtifactConfig,
    pub recommendations: RecommendationPolicy,
}

impl ScreeningConfig {
    /// Read a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScreeningConfig::default();
        assert_eq!(
            config.artifacts.schema_path(),
            PathBuf::from("artifacts").join("schema.json")
        );
        assert_eq!(config.recommendations.max_items, 5);
        assert_eq!(config.recommendations.academic_cgpa_threshold, 3.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ScreeningConfig = serde_json::from_str(
            r#"{ "artifacts": { "dir": "/srv/models", "ensemble_file": "forest.bin" } }"#,
        )
        .unwrap();
        assert_eq!(config.artifacts.dir, PathBuf::from("/srv/models"));
        assert_eq!(config.artifacts.scaler_file, "scaler.bin");
        assert_eq!(
            config.artifacts.ensemble_path(),
            PathBuf::from("/srv/models").join("forest.bin")
        );
        assert_eq!(config.recommendations, RecommendationPolicy::default());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join("mindscreen_test_config.json");
        std::fs::write(
            &path,
            r#"{ "recommendations": { "academic_cgpa_threshold": 7.0 } }"#,
        )
        .unwrap();

        let config = ScreeningConfig::from_file(&path).unwrap();
        assert_eq!(config.recommendations.academic_cgpa_threshold, 7.0);
        assert_eq!(config.recommendations.max_items, 5);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_from_missing_file_fails() {
        assert!(ScreeningConfig::from_file("/nonexistent/mindscreen.json").is_err());
    }
}
