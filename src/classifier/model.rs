use serde::Deserialize;

use super::artifact::ArtifactError;
use super::{ClassLabel, Classifier};

/// Contents of `model.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelFile {
    pub classes: Vec<ClassLabel>,
    #[serde(default)]
    pub positive_class: ClassLabel,
    #[serde(flatten)]
    pub model: ModelSpec,
}

/// Model parameters, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    RandomForest { trees: Vec<TreeSpec> },
    LogisticRegression { coef: Vec<Vec<f64>>, intercept: Vec<f64> },
}

/// One fitted decision tree in array form.
///
/// Node `i` is a leaf when `children_left[i] == -1`; otherwise rows with
/// `x[feature[i]] <= threshold[i]` go to `children_left[i]`, the rest to
/// `children_right[i]`. `value[i]` holds per-class counts or fractions.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeSpec {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl ModelFile {
    /// Validate against the schema width and build the classifier.
    pub fn into_classifier(self, n_features: usize) -> Result<Box<dyn Classifier>, ArtifactError> {
        let n_classes = self.classes.len();
        if n_classes == 0 {
            return Err(ArtifactError::InvalidModel("model declares no classes".to_string()));
        }

        match self.model {
            ModelSpec::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ArtifactError::InvalidModel("random forest has no trees".to_string()));
                }
                let trees = trees
                    .into_iter()
                    .enumerate()
                    .map(|(i, spec)| DecisionTree::from_spec(spec, n_features, n_classes, i))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Box::new(RandomForest {
                    classes: self.classes,
                    trees,
                }))
            }
            ModelSpec::LogisticRegression { coef, intercept } => {
                let expected_rows = if n_classes == 2 { 1 } else { n_classes };
                if coef.len() != expected_rows || intercept.len() != expected_rows {
                    return Err(ArtifactError::InvalidModel(format!(
                        "logistic regression with {} classes needs {} coefficient rows and intercepts, found {} and {}",
                        n_classes,
                        expected_rows,
                        coef.len(),
                        intercept.len()
                    )));
                }
                if let Some(row) = coef.iter().find(|row| row.len() != n_features) {
                    return Err(ArtifactError::Dimension {
                        what: "logistic regression coefficients",
                        expected: n_features,
                        found: row.len(),
                    });
                }
                Ok(Box::new(LogisticRegression {
                    classes: self.classes,
                    coef,
                    intercept,
                }))
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    /// `None` for leaves.
    split: Option<Split>,
    /// Normalized class distribution at this node.
    proba: Vec<f64>,
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    left: usize,
    right: usize,
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn from_spec(
        spec: TreeSpec,
        n_features: usize,
        n_classes: usize,
        index: usize,
    ) -> Result<Self, ArtifactError> {
        let invalid = |reason: String| ArtifactError::InvalidModel(format!("tree {}: {}", index, reason));

        let n = spec.children_left.len();
        if n == 0 {
            return Err(invalid("no nodes".to_string()));
        }
        if spec.children_right.len() != n
            || spec.feature.len() != n
            || spec.threshold.len() != n
            || spec.value.len() != n
        {
            return Err(invalid("node arrays differ in length".to_string()));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let value = &spec.value[i];
            if value.len() != n_classes {
                return Err(invalid(format!(
                    "node {} has {} class values, expected {}",
                    i,
                    value.len(),
                    n_classes
                )));
            }

            let split = if spec.children_left[i] == -1 {
                None
            } else {
                let left = child_index(spec.children_left[i], i, n).ok_or_else(|| {
                    invalid(format!("node {} has an invalid left child", i))
                })?;
                let right = child_index(spec.children_right[i], i, n).ok_or_else(|| {
                    invalid(format!("node {} has an invalid right child", i))
                })?;
                let feature = usize::try_from(spec.feature[i])
                    .ok()
                    .filter(|&f| f < n_features)
                    .ok_or_else(|| {
                        invalid(format!(
                            "node {} splits on feature {} of {}",
                            i, spec.feature[i], n_features
                        ))
                    })?;
                Some(Split {
                    feature,
                    threshold: spec.threshold[i],
                    left,
                    right,
                })
            };

            nodes.push(Node {
                split,
                proba: normalized(value),
            });
        }

        Ok(Self { nodes })
    }

    /// Class distribution of the leaf `row` lands in.
    pub fn leaf_proba(&self, row: &[f64]) -> &[f64] {
        let mut i = 0;
        // Children always have a higher index than their parent, so this terminates.
        while let Some(split) = self.nodes[i].split {
            let x = row.get(split.feature).copied().unwrap_or(0.0);
            i = if x <= split.threshold { split.left } else { split.right };
        }
        &self.nodes[i].proba
    }
}

/// Child indices must point forward into the node array.
fn child_index(raw: i64, parent: usize, n: usize) -> Option<usize> {
    usize::try_from(raw).ok().filter(|&c| c > parent && c < n)
}

fn normalized(value: &[f64]) -> Vec<f64> {
    let total: f64 = value.iter().sum();
    if total > 0.0 {
        value.iter().map(|v| v / total).collect()
    } else {
        value.to_vec()
    }
}

/// Averaged class distributions of an ensemble of trees.
#[derive(Debug, Clone)]
pub struct RandomForest {
    classes: Vec<ClassLabel>,
    trees: Vec<DecisionTree>,
}

impl Classifier for RandomForest {
    fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let mut sum = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in sum.iter_mut().zip(tree.leaf_proba(row)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        sum.into_iter().map(|p| p / n).collect()
    }
}

/// Linear model with a sigmoid (binary) or softmax (multi-class) link.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    classes: Vec<ClassLabel>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl Classifier for LogisticRegression {
    fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let scores: Vec<f64> = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(w, b)| w.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();

        if scores.len() == 1 {
            let p = sigmoid(scores[0]);
            return vec![1.0 - p, p];
        }

        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        exps.into_iter().map(|e| e / total).collect()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
