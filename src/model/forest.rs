//! Random forest of binary decision trees.
//!
//! Trees are stored as flat node arrays with the root at index 0 and children
//! after their parent, the layout tree learners export. A split sends a row
//! left when `row[feature] <= threshold`. The forest probability is the mean
//! over trees of the class fraction in the reached leaf.

use crate::error::ScreeningError;
use crate::model::ProbabilisticClassifier;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Weighted training samples per class `[absent, present]` in this leaf.
    Leaf { class_counts: [f64; 2] },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TreeNode>", into = "Vec<TreeNode>")]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Result<Self, ScreeningError> {
        Self::try_from(nodes)
    }

    /// A single-leaf tree.
    pub fn leaf(class_counts: [f64; 2]) -> Result<Self, ScreeningError> {
        Self::new(vec![TreeNode::Leaf { class_counts }])
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Highest feature index any split reads, if the tree splits at all.
    pub fn max_feature(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                TreeNode::Split { feature, .. } => Some(*feature),
                TreeNode::Leaf { .. } => None,
            })
            .max()
    }

    /// `[P(absent), P(present)]` of the leaf reached by `row`.
    pub fn predict_proba(&self, row: ArrayView1<'_, f64>) -> [f64; 2] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { class_counts } => {
                    let total = class_counts[0] + class_counts[1];
                    return [class_counts[0] / total, class_counts[1] / total];
                }
            }
        }
    }
}

impl TryFrom<Vec<TreeNode>> for DecisionTree {
    type Error = ScreeningError;

    /// Children must point forward inside the array, which rules out cycles.
    fn try_from(nodes: Vec<TreeNode>) -> Result<Self, Self::Error> {
        if nodes.is_empty() {
            return Err(ScreeningError::SerializationError(
                "decision tree has no nodes".to_string(),
            ));
        }

        for (i, node) in nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    let in_range = |c: usize| c > i && c < nodes.len();
                    if !in_range(*left) || !in_range(*right) {
                        return Err(ScreeningError::SerializationError(format!(
                            "node {} has invalid children ({}, {})",
                            i, left, right
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ScreeningError::SerializationError(format!(
                            "node {} has NaN threshold",
                            i
                        )));
                    }
                }
                TreeNode::Leaf { class_counts } => {
                    let valid = class_counts.iter().all(|c| c.is_finite() && *c >= 0.0);
                    if !valid || class_counts[0] + class_counts[1] <= 0.0 {
                        return Err(ScreeningError::SerializationError(format!(
                            "leaf {} has invalid class counts {:?}",
                            i, class_counts
                        )));
                    }
                }
            }
        }

        Ok(Self { nodes })
    }
}

impl From<DecisionTree> for Vec<TreeNode> {
    fn from(tree: DecisionTree) -> Self {
        tree.nodes
    }
}

/// Serializable representation of a forest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ForestParams", into = "ForestParams")]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Result<Self, ScreeningError> {
        Self::try_from(ForestParams { n_features, trees })
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

impl TryFrom<ForestParams> for RandomForest {
    type Error = ScreeningError;

    fn try_from(params: ForestParams) -> Result<Self, Self::Error> {
        if params.trees.is_empty() {
            return Err(ScreeningError::SerializationError(
                "random forest has no trees".to_string(),
            ));
        }
        for (i, tree) in params.trees.iter().enumerate() {
            if let Some(feature) = tree.max_feature() {
                if feature >= params.n_features {
                    return Err(ScreeningError::SerializationError(format!(
                        "tree {} reads feature {} of {}",
                        i, feature, params.n_features
                    )));
                }
            }
        }
        Ok(Self {
            n_features: params.n_features,
            trees: params.trees,
        })
    }
}

impl From<RandomForest> for ForestParams {
    fn from(forest: RandomForest) -> Self {
        Self {
            n_features: forest.n_features,
            trees: forest.trees,
        }
    }
}

impl ProbabilisticClassifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, row: ArrayView1<'_, f64>) -> [f64; 2] {
        let mut sum = [0.0, 0.0];
        for tree in &self.trees {
            let [absent, present] = tree.predict_proba(row);
            sum[0] += absent;
            sum[1] += present;
        }
        let n = self.trees.len() as f64;
        [sum[0] / n, sum[1] / n]
    }
}
