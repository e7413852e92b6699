//! Per-condition binary classifiers.
//!
//! Every screened condition has its own independently trained classifier.
//! A classifier only needs to answer one question for a scaled feature row:
//! the probability that the condition is present. Nothing here looks at more
//! than one condition at a time.

pub mod ensemble;
pub mod forest;
pub mod logistic;

pub use ensemble::{ClassifierEnsemble, ConditionModel};
pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use logistic::{LogisticModel, LogisticParams};

use crate::error::ScreeningError;
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Screened mental-health indicators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Condition {
    Depression,
    Anxiety,
    #[serde(rename = "Panic attack")]
    PanicAttack,
}

impl Condition {
    pub const ALL: [Condition; 3] = [
        Condition::Depression,
        Condition::Anxiety,
        Condition::PanicAttack,
    ];

    /// Display name, as used for survey target columns.
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Depression => "Depression",
            Condition::Anxiety => "Anxiety",
            Condition::PanicAttack => "Panic attack",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Condition {
    type Err = ScreeningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match key.as_str() {
            "depression" => Ok(Condition::Depression),
            "anxiety" => Ok(Condition::Anxiety),
            "panicattack" => Ok(Condition::PanicAttack),
            _ => Err(ScreeningError::InvalidRecord(format!(
                "unknown condition '{}'",
                s
            ))),
        }
    }
}

/// A trained binary classifier producing class probabilities.
///
/// Implementations are immutable after loading and safe to share across
/// threads.
pub trait ProbabilisticClassifier: Send + Sync {
    /// Number of features the classifier was trained on.
    fn n_features(&self) -> usize;

    /// `[P(absent), P(present)]` for a single scaled row.
    fn predict_proba(&self, row: ArrayView1<'_, f64>) -> [f64; 2];

    /// Predicted label: present when its probability beats absence.
    fn predict(&self, row: ArrayView1<'_, f64>) -> bool {
        let [absent, present] = self.predict_proba(row);
        present > absent
    }

    /// `P(present)` for each row of a batch.
    fn predict_proba_batch(&self, rows: ArrayView2<'_, f64>) -> Array1<f64> {
        rows.outer_iter().map(|r| self.predict_proba(r)[1]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_names() {
        assert_eq!(Condition::PanicAttack.to_string(), "Panic attack");
        assert_eq!("Panic attack".parse::<Condition>().unwrap(), Condition::PanicAttack);
        assert_eq!("panic_attack".parse::<Condition>().unwrap(), Condition::PanicAttack);
        assert_eq!(" DEPRESSION ".parse::<Condition>().unwrap(), Condition::Depression);
        assert!("insomnia".parse::<Condition>().is_err());
    }

    #[test]
    fn test_condition_serde_name() {
        let json = serde_json::to_string(&Condition::PanicAttack).unwrap();
        assert_eq!(json, "\"Panic attack\"");
    }
}
