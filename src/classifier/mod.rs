//! The trained classifier artifact and the traits it is used through.
//!
//! - [`scaler`] — feature scalers (`standard`, `min_max`, `identity`).
//! - [`model`] — probability models (`random_forest`, `logistic_regression`).
//! - [`artifact`] — loads and validates the on-disk artifact directory.
//!
//! The pipeline only sees [`ClassifierArtifact`], so tests and alternative
//! models plug in through [`Classifier`] and [`Scaler`].

pub mod artifact;
pub mod model;
pub mod scaler;

use serde::{Deserialize, Serialize};

pub use artifact::{load_artifact, ArtifactError, ArtifactPaths};

/// A class label as stored in the model file: `1`, `0`, `"phishing"`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Number(f64),
    Text(String),
}

impl Default for ClassLabel {
    /// The phishing class of a 0/1-labeled training set.
    fn default() -> Self {
        ClassLabel::Number(1.0)
    }
}

impl std::fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassLabel::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            ClassLabel::Number(n) => write!(f, "{}", n),
            ClassLabel::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A probabilistic classifier over fixed-width, already scaled rows.
pub trait Classifier: Send + Sync {
    /// Class labels, in the order of [`Classifier::predict_proba`]'s output.
    fn classes(&self) -> &[ClassLabel];

    /// Class probabilities for one row.
    fn predict_proba(&self, row: &[f64]) -> Vec<f64>;

    /// Most probable class for one row.
    fn predict(&self, row: &[f64]) -> Option<ClassLabel> {
        let proba = self.predict_proba(row);
        let (best, _) = proba
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((i, p)),
            })?;
        self.classes().get(best).cloned()
    }
}

/// Maps raw feature rows onto the numeric scale the model was trained on.
pub trait Scaler: Send + Sync {
    fn transform(&self, row: &[f64]) -> Vec<f64>;
}

/// Ordered feature names the model was trained against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema(Vec<String>);

impl FeatureSchema {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Model, scaler and schema, loaded once and shared read-only.
pub struct ClassifierArtifact {
    pub model: Box<dyn Classifier>,
    pub scaler: Box<dyn Scaler>,
    pub schema: FeatureSchema,
    /// Label whose probability is read as "phishing".
    pub positive_class: ClassLabel,
}

impl ClassifierArtifact {
    pub fn new(model: Box<dyn Classifier>, scaler: Box<dyn Scaler>, schema: FeatureSchema) -> Self {
        Self {
            model,
            scaler,
            schema,
            positive_class: ClassLabel::default(),
        }
    }

    pub fn with_positive_class(mut self, label: ClassLabel) -> Self {
        self.positive_class = label;
        self
    }
}

impl std::fmt::Debug for ClassifierArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierArtifact")
            .field("classes", &self.model.classes())
            .field("schema", &self.schema)
            .field("positive_class", &self.positive_class)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<ClassLabel>, Vec<f64>);

    impl Classifier for Fixed {
        fn classes(&self) -> &[ClassLabel] {
            &self.0
        }

        fn predict_proba(&self, _row: &[f64]) -> Vec<f64> {
            self.1.clone()
        }
    }

    #[test]
    fn test_predict_is_argmax() {
        let model = Fixed(
            vec![ClassLabel::Number(0.0), ClassLabel::Number(1.0)],
            vec![0.3, 0.7],
        );
        assert_eq!(model.predict(&[]), Some(ClassLabel::Number(1.0)));
    }

    #[test]
    fn test_predict_without_probabilities() {
        let model = Fixed(vec![], vec![]);
        assert_eq!(model.predict(&[]), None);
    }

    #[test]
    fn test_class_label_parsing() {
        let labels: Vec<ClassLabel> = serde_json::from_str(r#"[0, 1.0, "phishing"]"#).unwrap();
        assert_eq!(labels[0], ClassLabel::Number(0.0));
        assert_eq!(labels[1], ClassLabel::default());
        assert_eq!(labels[2], ClassLabel::Text("phishing".to_string()));
        assert_eq!(labels[1].to_string(), "1");
    }
}
