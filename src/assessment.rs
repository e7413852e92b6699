//! Per-condition screening results for one record.

use crate::model::Condition;
use crate::risk::RiskTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome for a single condition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionResult {
    /// Probability the condition is present, in `[0, 1]`.
    pub probability: f64,
    pub tier: RiskTier,
    /// Classifier's hard label.
    pub predicted: bool,
}

impl ConditionResult {
    pub fn new(probability: f64, predicted: bool) -> Self {
        Self {
            probability,
            tier: RiskTier::from_probability(probability),
            predicted,
        }
    }
}

/// Results for every condition of the ensemble, in condition order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    results: BTreeMap<Condition, ConditionResult>,
}

impl Assessment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, condition: Condition, result: ConditionResult) {
        self.results.insert(condition, result);
    }

    pub fn get(&self, condition: Condition) -> Option<&ConditionResult> {
        self.results.get(&condition)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Condition, &ConditionResult)> {
        self.results.iter().map(|(c, r)| (*c, r))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Condition with the largest probability; ties go to the earlier condition.
    pub fn highest_risk(&self) -> Option<(Condition, &ConditionResult)> {
        self.iter().fold(None, |best, (c, r)| match best {
            Some((_, b)) if b.probability >= r.probability => best,
            _ => Some((c, r)),
        })
    }

    /// Tier of the highest probability, or `Minimal` for an empty assessment.
    pub fn max_tier(&self) -> RiskTier {
        self.highest_risk()
            .map(|(_, r)| r.tier)
            .unwrap_or(RiskTier::Minimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_derives_tier() {
        let r = ConditionResult::new(0.62, true);
        assert_eq!(r.tier, RiskTier::Moderate);
    }

    #[test]
    fn test_highest_risk() {
        let mut a = Assessment::new();
        assert_eq!(a.max_tier(), RiskTier::Minimal);
        assert!(a.highest_risk().is_none());

        a.insert(Condition::Depression, ConditionResult::new(0.4, false));
        a.insert(Condition::Anxiety, ConditionResult::new(0.8, true));
        a.insert(Condition::PanicAttack, ConditionResult::new(0.8, true));

        let (condition, result) = a.highest_risk().unwrap();
        assert_eq!(condition, Condition::Anxiety);
        assert_eq!(result.tier, RiskTier::High);
        assert_eq!(a.max_tier(), RiskTier::High);
    }

    #[test]
    fn test_iteration_order() {
        let mut a = Assessment::new();
        a.insert(Condition::PanicAttack, ConditionResult::new(0.1, false));
        a.insert(Condition::Depression, ConditionResult::new(0.2, false));
        let order: Vec<_> = a.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![Condition::Depression, Condition::PanicAttack]);
    }
}
