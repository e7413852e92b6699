//! Loaded artifact set and the assessment pipeline.
//!
//! An [`InferenceContext`] is built once from the schema, scaler and ensemble
//! artifacts and is immutable afterwards. Any number of threads may call
//! [`InferenceContext::assess`] on a shared reference.
//!
//! For processes that want a single shared instance, [`init`] loads the
//! context into a process-wide cell and [`global`] hands it out.

use crate::assessment::{Assessment, ConditionResult};
use crate::config::ArtifactConfig;
use crate::error::{ArtifactKind, Result, ScreeningError};
use crate::model::{ClassifierEnsemble, ProbabilisticClassifier};
use crate::preprocessing::{FittedStandardScaler, FittedTransformer, TrainingColumnSchema};
use crate::record::RawRecord;
use ndarray::Array1;
use once_cell::sync::OnceCell;

#[derive(Clone, Debug)]
pub struct InferenceContext {
    schema: TrainingColumnSchema,
    scaler: FittedStandardScaler,
    ensemble: ClassifierEnsemble,
}

impl InferenceContext {
    /// Assemble a context from already loaded artifacts.
    ///
    /// # Errors
    /// - [`ScreeningError::ArtifactUnavailable`] if the ensemble is empty.
    /// - [`ScreeningError::DimensionMismatch`] if the scaler or any classifier
    ///   disagrees with the schema length.
    pub fn new(
        schema: TrainingColumnSchema,
        scaler: FittedStandardScaler,
        ensemble: ClassifierEnsemble,
    ) -> Result<Self> {
        if ensemble.is_empty() {
            return Err(ScreeningError::artifact(
                ArtifactKind::Ensemble,
                "ensemble has no classifiers",
            ));
        }
        if scaler.n_features_in() != schema.len() {
            return Err(ScreeningError::DimensionMismatch {
                expected: schema.len(),
                got: scaler.n_features_in(),
            });
        }
        for (condition, model) in ensemble.iter() {
            if model.n_features() != schema.len() {
                log::error!(
                    "classifier for '{}' expects {} features, schema has {}",
                    condition,
                    model.n_features(),
                    schema.len()
                );
                return Err(ScreeningError::DimensionMismatch {
                    expected: schema.len(),
                    got: model.n_features(),
                });
            }
        }

        for i in scaler.constant_columns() {
            log::warn!(
                "column '{}' has zero variance; it is scaled to 0",
                schema.columns()[i]
            );
        }

        Ok(Self {
            schema,
            scaler,
            ensemble,
        })
    }

    /// Load all three artifacts. Fails without a partial context if any of
    /// them is missing or malformed.
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        let schema_path = config.schema_path();
        let schema = TrainingColumnSchema::load_from_file(&schema_path).map_err(|e| {
            ScreeningError::artifact(
                ArtifactKind::Schema,
                format!("{}: {}", schema_path.display(), e),
            )
        })?;

        let scaler_path = config.scaler_path();
        let scaler = FittedStandardScaler::load_from_file(&scaler_path).map_err(|e| {
            ScreeningError::artifact(
                ArtifactKind::Scaler,
                format!("{}: {}", scaler_path.display(), e),
            )
        })?;

        let ensemble_path = config.ensemble_path();
        let ensemble = ClassifierEnsemble::load_from_file(&ensemble_path).map_err(|e| {
            ScreeningError::artifact(
                ArtifactKind::Ensemble,
                format!("{}: {}", ensemble_path.display(), e),
            )
        })?;

        let context = Self::new(schema, scaler, ensemble)?;
        log::info!(
            "loaded screening artifacts from {} ({} columns, {} conditions)",
            config.dir.display(),
            context.schema.len(),
            context.ensemble.len()
        );
        Ok(context)
    }

    /// Write all three artifacts to the locations named by `config`.
    pub fn save(&self, config: &ArtifactConfig) -> Result<()> {
        std::fs::create_dir_all(&config.dir)?;
        self.schema.save_to_file(config.schema_path())?;
        self.scaler.save_to_file(config.scaler_path())?;
        self.ensemble.save_to_file(config.ensemble_path())?;
        Ok(())
    }

    pub fn schema(&self) -> &TrainingColumnSchema {
        &self.schema
    }

    pub fn scaler(&self) -> &FittedStandardScaler {
        &self.scaler
    }

    pub fn ensemble(&self) -> &ClassifierEnsemble {
        &self.ensemble
    }

    /// Encode, align and scale a record into the row the classifiers consume.
    pub fn features(&self, record: &RawRecord) -> Result<Array1<f64>> {
        record.validate()?;
        let aligned = self.schema.encode(record);
        self.scaler.transform(&aligned)
    }

    /// Screen one record against every condition of the ensemble.
    pub fn assess(&self, record: &RawRecord) -> Result<Assessment> {
        let row = self.features(record)?;

        let mut assessment = Assessment::new();
        for condition in self.ensemble.conditions() {
            let [absent, present] = self.ensemble.predict_proba(condition, row.view())?;
            let result = ConditionResult::new(present, present > absent);
            log::debug!(
                "{}: p={:.4} tier={}",
                condition,
                result.probability,
                result.tier
            );
            assessment.insert(condition, result);
        }
        Ok(assessment)
    }
}

static CONTEXT: OnceCell<InferenceContext> = OnceCell::new();

/// Load the process-wide context once. Later calls return the instance
/// loaded first, whatever `config` they pass.
pub fn init(config: &ArtifactConfig) -> Result<&'static InferenceContext> {
    CONTEXT.get_or_try_init(|| InferenceContext::load(config))
}

/// The process-wide context.
///
/// # Errors
/// [`ScreeningError::ContextUninitialised`] if [`init`] has not succeeded.
pub fn global() -> Result<&'static InferenceContext> {
    CONTEXT.get().ok_or(ScreeningError::ContextUninitialised)
}
