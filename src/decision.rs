use tracing::debug;

use crate::classifier::{ClassLabel, ClassifierArtifact, FeatureSchema};
use crate::features::FeatureVector;
use crate::models::{ClassificationResult, Label};

/// Probability at or above which a URL is labeled phishing.
///
/// Set above 0.5 on purpose: the trained model is slightly under-confident on
/// the phishing class, and this cut-off was tuned for recall.
pub const PHISHING_THRESHOLD: f64 = 0.53;

/// Confidence reported when no phishing probability can be determined.
pub const UNKNOWN_CONFIDENCE: f64 = 50.0;

/// Align `features` to the schema: one value per schema name, in schema
/// order, 0 for names the extractor did not produce. Extra features are dropped.
pub fn project(features: &FeatureVector, schema: &FeatureSchema) -> Vec<f64> {
    schema
        .names()
        .iter()
        .map(|name| features.get(name).unwrap_or(0.0))
        .collect()
}

/// Score a feature vector with the artifact and turn it into a label.
pub fn decide(features: &FeatureVector, artifact: &ClassifierArtifact) -> ClassificationResult {
    let row = project(features, &artifact.schema);
    let scaled = artifact.scaler.transform(&row);
    let proba = artifact.model.predict_proba(&scaled);
    let classes = artifact.model.classes();

    let phish = phish_probability(&proba, classes, &artifact.positive_class);

    debug!(
        classes = ?classes,
        probabilities = ?proba,
        predicted = ?artifact.model.predict(&scaled),
        phish_probability = ?phish,
        "model scored"
    );

    label_for(phish)
}

/// Probability of the positive class.
///
/// Looked up by label; when the label is missing the second column is used if
/// there is one, else the only column. `None` when nothing usable came back.
pub fn phish_probability(proba: &[f64], classes: &[ClassLabel], positive: &ClassLabel) -> Option<f64> {
    let by_label = classes
        .iter()
        .position(|c| c == positive)
        .and_then(|i| proba.get(i).copied());

    let p = by_label.or_else(|| match proba {
        [] => None,
        [only] => Some(*only),
        [_, second, ..] => Some(*second),
    })?;

    p.is_finite().then_some(p)
}

/// Apply [`PHISHING_THRESHOLD`] to a phishing probability.
pub fn label_for(phish_probability: Option<f64>) -> ClassificationResult {
    match phish_probability {
        Some(p) if p >= PHISHING_THRESHOLD => ClassificationResult {
            label: Label::Phishing,
            confidence: percent(p),
        },
        Some(p) => ClassificationResult {
            label: Label::Legitimate,
            confidence: percent(1.0 - p),
        },
        None => ClassificationResult {
            label: Label::Legitimate,
            confidence: UNKNOWN_CONFIDENCE,
        },
    }
}

/// Probability as a percentage rounded to two decimals, kept within [0, 100].
///
/// Rounds the exact decimal value of `p * 100` through the formatter; scaling
/// by another 100 first can land on a `.5` the true value never reaches.
fn percent(p: f64) -> f64 {
    let scaled = p * 100.0;
    format!("{scaled:.2}")
        .parse::<f64>()
        .unwrap_or(scaled)
        .clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::scaler::IdentityScaler;
    use crate::classifier::Classifier;

    struct Fixed {
        classes: Vec<ClassLabel>,
        proba: Vec<f64>,
    }

    impl Classifier for Fixed {
        fn classes(&self) -> &[ClassLabel] {
            &self.classes
        }

        fn predict_proba(&self, _row: &[f64]) -> Vec<f64> {
            self.proba.clone()
        }
    }

    /// Returns the first feature of the row as the phishing probability.
    struct Echo;

    impl Classifier for Echo {
        fn classes(&self) -> &[ClassLabel] {
            &[]
        }

        fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
            let p = row.first().copied().unwrap_or(0.0);
            vec![1.0 - p, p]
        }
    }

    fn artifact(classes: Vec<ClassLabel>, proba: Vec<f64>) -> ClassifierArtifact {
        ClassifierArtifact::new(
            Box::new(Fixed { classes, proba }),
            Box::new(IdentityScaler),
            FeatureSchema::new(["a"]),
        )
    }

    fn binary() -> Vec<ClassLabel> {
        vec![ClassLabel::Number(0.0), ClassLabel::Number(1.0)]
    }

    #[test]
    fn test_projection_follows_schema() {
        let features: FeatureVector = [("b", 2.0), ("extra", 9.0), ("a", 1.0)].into_iter().collect();
        let schema = FeatureSchema::new(["a", "missing", "b"]);
        assert_eq!(project(&features, &schema), vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_projection_of_empty_vector() {
        let schema = FeatureSchema::new(["x", "y", "z", "w"]);
        assert_eq!(project(&FeatureVector::new(), &schema), vec![0.0; 4]);
    }

    #[test]
    fn test_threshold() {
        assert_eq!(
            label_for(Some(0.53)),
            ClassificationResult { label: Label::Phishing, confidence: 53.0 }
        );
        assert_eq!(
            label_for(Some(0.52)),
            ClassificationResult { label: Label::Legitimate, confidence: 48.0 }
        );
        assert_eq!(
            label_for(Some(0.98761)),
            ClassificationResult { label: Label::Phishing, confidence: 98.76 }
        );
    }

    #[test]
    fn test_rounding_uses_exact_decimal_value() {
        // 0.99985 * 100 is stored just below 99.985
        assert_eq!(label_for(Some(0.99985)).confidence, 99.98);
        assert_eq!(label_for(Some(0.5)).confidence, 50.0);
        assert_eq!(label_for(Some(0.87654)).confidence, 87.65);
    }

    #[test]
    fn test_unknown_probability() {
        assert_eq!(
            label_for(None),
            ClassificationResult { label: Label::Legitimate, confidence: 50.0 }
        );
    }

    #[test]
    fn test_label_flips_once_and_confidence_grows_away_from_threshold() {
        let mut flips = 0;
        let mut previous = label_for(Some(0.0));
        for step in 1..=100 {
            let current = label_for(Some(step as f64 / 100.0));
            if current.label != previous.label {
                flips += 1;
                assert_eq!(current.label, Label::Phishing);
            } else if current.label == Label::Phishing {
                assert!(current.confidence > previous.confidence);
            } else {
                assert!(current.confidence < previous.confidence);
            }
            previous = current;
        }
        assert_eq!(flips, 1);
    }

    #[test]
    fn test_positive_class_located_by_label() {
        let classes = vec![ClassLabel::Number(1.0), ClassLabel::Number(0.0)];
        let result = decide(&FeatureVector::new(), &artifact(classes, vec![0.9, 0.1]));
        assert_eq!(result.label, Label::Phishing);
        assert_eq!(result.confidence, 90.0);
    }

    #[test]
    fn test_fallback_to_second_column() {
        let classes = vec![ClassLabel::Text("good".into()), ClassLabel::Text("bad".into())];
        let result = decide(&FeatureVector::new(), &artifact(classes, vec![0.2, 0.8]));
        assert_eq!(result.label, Label::Phishing);
        assert_eq!(result.confidence, 80.0);
    }

    #[test]
    fn test_fallback_to_only_column() {
        let result = decide(&FeatureVector::new(), &artifact(vec![], vec![0.25]));
        assert_eq!(result.label, Label::Legitimate);
        assert_eq!(result.confidence, 75.0);
    }

    #[test]
    fn test_degenerate_model() {
        let result = decide(&FeatureVector::new(), &artifact(binary(), vec![]));
        assert_eq!(result, ClassificationResult { label: Label::Legitimate, confidence: 50.0 });

        let result = decide(&FeatureVector::new(), &artifact(binary(), vec![f64::NAN, f64::NAN]));
        assert_eq!(result.confidence, 50.0);
    }

    #[test]
    fn test_decide_feeds_projected_row_to_model() {
        let artifact = ClassifierArtifact::new(
            Box::new(Echo),
            Box::new(IdentityScaler),
            FeatureSchema::new(["score"]),
        );
        let features: FeatureVector = [("score", 0.6), ("other", 0.0)].into_iter().collect();
        let result = decide(&features, &artifact);
        assert_eq!(result, ClassificationResult { label: Label::Phishing, confidence: 60.0 });

        let result = decide(&FeatureVector::new(), &artifact);
        assert_eq!(result, ClassificationResult { label: Label::Legitimate, confidence: 100.0 });
    }

    #[test]
    fn test_confidence_in_range() {
        for p in [0.0, 0.1, 0.5, 0.53, 0.999999, 1.0] {
            let c = label_for(Some(p)).confidence;
            assert!((0.0..=100.0).contains(&c));
        }
    }
}
