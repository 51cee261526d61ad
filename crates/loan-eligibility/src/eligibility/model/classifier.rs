use serde::{Deserialize, Serialize};

use super::artifacts::ArtifactError;
use super::{check_dimension, Classifier, ModelError};

const ARTIFACT: &str = "classifier";

/// Linear decision function: `classes[1]` when `w·x + b > 0`, else `classes[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearClassifier {
    coefficients: Vec<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl LinearClassifier {
    pub fn new(
        coefficients: Vec<f64>,
        intercept: f64,
        classes: [i64; 2],
    ) -> Result<Self, ArtifactError> {
        if let Some(index) = coefficients.iter().position(|value| !value.is_finite()) {
            return Err(ArtifactError::InvalidParameter {
                artifact: ARTIFACT,
                detail: format!("coefficients[{index}] is not finite"),
            });
        }
        if !intercept.is_finite() {
            return Err(ArtifactError::InvalidParameter {
                artifact: ARTIFACT,
                detail: "intercept is not finite".to_string(),
            });
        }
        Ok(Self {
            coefficients,
            intercept,
            classes,
        })
    }

    fn decision_function(&self, scaled: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(scaled.iter())
            .map(|(weight, value)| weight * value)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for LinearClassifier {
    fn dimension(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, scaled: &[f64]) -> Result<i64, ModelError> {
        check_dimension(ARTIFACT, self.dimension(), scaled.len())?;
        let index = usize::from(self.decision_function(scaled) > 0.0);
        Ok(self.classes[index])
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

/// One node of a fitted decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: i64,
    },
}

/// Binary decision tree; `x[feature] <= threshold` follows the left child.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTreeClassifier {
    nodes: Vec<TreeNode>,
    dimension: usize,
}

impl DecisionTreeClassifier {
    /// Children must sit after their parent, which rules out cycles.
    pub fn new(nodes: Vec<TreeNode>, dimension: usize) -> Result<Self, ArtifactError> {
        if nodes.is_empty() {
            return Err(ArtifactError::InvalidParameter {
                artifact: ARTIFACT,
                detail: "decision tree has no nodes".to_string(),
            });
        }

        for (index, node) in nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } = node
            {
                let invalid = |detail: String| ArtifactError::InvalidParameter {
                    artifact: ARTIFACT,
                    detail: format!("node {index}: {detail}"),
                };
                if *feature >= dimension {
                    return Err(invalid(format!(
                        "feature {feature} out of range for {dimension} features"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(invalid("threshold is not finite".to_string()));
                }
                for child in [*left, *right] {
                    if child <= index || child >= nodes.len() {
                        return Err(invalid(format!("child {child} is not a later node")));
                    }
                }
            }
        }

        Ok(Self { nodes, dimension })
    }
}

impl Classifier for DecisionTreeClassifier {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn predict(&self, scaled: &[f64]) -> Result<i64, ModelError> {
        check_dimension(ARTIFACT, self.dimension, scaled.len())?;
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { class } => return Ok(*class),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if scaled[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    fn kind(&self) -> &'static str {
        "decision_tree"
    }
}
