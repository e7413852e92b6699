//! Condition → classifier mapping loaded as one artifact.

use crate::error::{ArtifactKind, Result, ScreeningError};
use crate::model::{Condition, LogisticModel, ProbabilisticClassifier, RandomForest};
use crate::serialization::SerializableParams;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Any classifier kind the ensemble can hold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConditionModel {
    Logistic(LogisticModel),
    Forest(RandomForest),
}

impl From<LogisticModel> for ConditionModel {
    fn from(model: LogisticModel) -> Self {
        ConditionModel::Logistic(model)
    }
}

impl From<RandomForest> for ConditionModel {
    fn from(model: RandomForest) -> Self {
        ConditionModel::Forest(model)
    }
}

impl ProbabilisticClassifier for ConditionModel {
    fn n_features(&self) -> usize {
        match self {
            ConditionModel::Logistic(m) => m.n_features(),
            ConditionModel::Forest(m) => m.n_features(),
        }
    }

    fn predict_proba(&self, row: ArrayView1<'_, f64>) -> [f64; 2] {
        match self {
            ConditionModel::Logistic(m) => m.predict_proba(row),
            ConditionModel::Forest(m) => m.predict_proba(row),
        }
    }
}

/// One independently trained classifier per screened condition.
///
/// Classifiers never share state; a prediction for one condition cannot
/// change the output for another.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassifierEnsemble {
    models: BTreeMap<Condition, ConditionModel>,
}

impl ClassifierEnsemble {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the classifier for `condition`.
    pub fn insert(&mut self, condition: Condition, model: impl Into<ConditionModel>) {
        self.models.insert(condition, model.into());
    }

    pub fn with_model(mut self, condition: Condition, model: impl Into<ConditionModel>) -> Self {
        self.insert(condition, model);
        self
    }

    pub fn get(&self, condition: Condition) -> Option<&ConditionModel> {
        self.models.get(&condition)
    }

    pub fn conditions(&self) -> impl Iterator<Item = Condition> + '_ {
        self.models.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Condition, &ConditionModel)> {
        self.models.iter().map(|(c, m)| (*c, m))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Feature count shared by every classifier.
    ///
    /// # Errors
    /// [`ScreeningError::DimensionMismatch`] if two classifiers disagree,
    /// [`ScreeningError::EmptyData`] if there are none.
    pub fn n_features(&self) -> Result<usize> {
        let mut iter = self.models.values().map(|m| m.n_features());
        let first = iter
            .next()
            .ok_or_else(|| ScreeningError::EmptyData("ensemble has no classifiers".into()))?;
        match iter.find(|n| *n != first) {
            Some(got) => Err(ScreeningError::DimensionMismatch {
                expected: first,
                got,
            }),
            None => Ok(first),
        }
    }

    /// `[P(absent), P(present)]` from the classifier for `condition` alone.
    ///
    /// # Errors
    /// [`ScreeningError::ArtifactUnavailable`] if the ensemble has no
    /// classifier for `condition`, [`ScreeningError::DimensionMismatch`] if
    /// `row` has the wrong length.
    pub fn predict_proba(
        &self,
        condition: Condition,
        row: ArrayView1<'_, f64>,
    ) -> Result<[f64; 2]> {
        let model = self.get(condition).ok_or_else(|| {
            ScreeningError::artifact(
                ArtifactKind::Ensemble,
                format!("no classifier for '{}'", condition),
            )
        })?;
        if row.len() != model.n_features() {
            return Err(ScreeningError::DimensionMismatch {
                expected: model.n_features(),
                got: row.len(),
            });
        }
        Ok(model.predict_proba(row))
    }

    /// Write the ensemble as bincode.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_to(path)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DecisionTree;
    use ndarray::array;

    fn ensemble() -> ClassifierEnsemble {
        ClassifierEnsemble::new()
            .with_model(
                Condition::Depression,
                LogisticModel::new(vec![2.0, 0.0], 0.0).unwrap(),
            )
            .with_model(
                Condition::Anxiety,
                LogisticModel::new(vec![-2.0, 0.0], 0.0).unwrap(),
            )
            .with_model(
                Condition::PanicAttack,
                RandomForest::new(2, vec![DecisionTree::leaf([3.0, 1.0]).unwrap()]).unwrap(),
            )
    }

    #[test]
    fn test_conditions_are_independent() {
        let ensemble = ensemble();
        let row = array![1.5, 0.0];
        let present = |c| ensemble.predict_proba(c, row.view()).unwrap()[1];
        let depression = present(Condition::Depression);
        let anxiety = present(Condition::Anxiety);
        let panic = present(Condition::PanicAttack);

        // anti-correlated classifiers give complementary answers
        assert!(depression > 0.9);
        assert!(anxiety < 0.1);
        assert!((depression + anxiety - 1.0).abs() < 1e-12);
        assert_eq!(panic, 0.25);
    }

    #[test]
    fn test_iteration_order_is_condition_order() {
        let order: Vec<_> = ensemble().conditions().collect();
        assert_eq!(order, Condition::ALL.to_vec());
    }

    #[test]
    fn test_predict_proba_rejects_wrong_length() {
        let result = ensemble().predict_proba(Condition::Depression, array![1.0].view());
        assert!(matches!(
            result,
            Err(ScreeningError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_missing_condition() {
        let ensemble = ClassifierEnsemble::new().with_model(
            Condition::Anxiety,
            LogisticModel::new(vec![1.0], 0.0).unwrap(),
        );
        assert!(matches!(
            ensemble.predict_proba(Condition::Depression, array![0.0].view()),
            Err(ScreeningError::ArtifactUnavailable {
                artifact: ArtifactKind::Ensemble,
                ..
            })
        ));
    }

    #[test]
    fn test_n_features() {
        assert_eq!(ensemble().n_features().unwrap(), 2);
        assert!(ClassifierEnsemble::new().n_features().is_err());

        let mixed = ensemble().with_model(
            Condition::Anxiety,
            LogisticModel::new(vec![1.0, 1.0, 1.0], 0.0).unwrap(),
        );
        assert!(matches!(
            mixed.n_features(),
            Err(ScreeningError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_save_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ensemble.bin");
        let original = ensemble();
        original.save_to_file(&path).unwrap();
        let loaded = ClassifierEnsemble::load_from_file(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ensemble.bin");
        std::fs::write(&path, b"not an ensemble").unwrap();
        assert!(ClassifierEnsemble::load_from_file(&path).is_err());
    }
}
