//! One URL in, one [`UrlReport`] out: normalize, screen, extract, decide.

use std::sync::Arc;

use tracing::debug;

use crate::classifier::ClassifierArtifact;
use crate::decision::decide;
use crate::features::extract;
use crate::heuristics::screen;
use crate::models::{ClassificationResult, HeuristicVerdict, Label, UrlReport};
use crate::url::normalize;

/// Confidence reported when a heuristic rule short-circuits the model.
pub const HEURISTIC_CONFIDENCE: f64 = 99.0;

/// Runs the pipeline against a shared, read-only classifier artifact.
#[derive(Debug, Clone)]
pub struct UrlAnalyzer {
    artifact: Arc<ClassifierArtifact>,
    screening: bool,
}

impl UrlAnalyzer {
    pub fn new(artifact: Arc<ClassifierArtifact>) -> Self {
        Self {
            artifact,
            screening: true,
        }
    }

    /// Enable or disable the heuristic pre-screen.
    pub fn with_screening(mut self, enabled: bool) -> Self {
        self.screening = enabled;
        self
    }

    pub fn analyze(&self, raw: &str) -> UrlReport {
        let normalized = normalize(raw);

        let verdict = if self.screening {
            screen(&normalized)
        } else {
            HeuristicVerdict::NotFlagged
        };

        let result = match verdict {
            HeuristicVerdict::Flagged(_) => ClassificationResult {
                label: Label::Phishing,
                confidence: HEURISTIC_CONFIDENCE,
            },
            HeuristicVerdict::NotFlagged => {
                let features = extract(&normalized);
                debug!(url = %normalized, features = ?features, "feature vector");
                decide(&features, &self.artifact)
            }
        };

        UrlReport {
            url: raw.to_string(),
            normalized: normalized.into_string(),
            label: result.label,
            confidence: result.confidence,
            reason: verdict.reason(),
            severity: result.label.severity(),
        }
    }
}

/// Analyze a single URL with the heuristic pre-screen enabled.
pub fn analyze(raw: &str, artifact: &Arc<ClassifierArtifact>) -> UrlReport {
    UrlAnalyzer::new(Arc::clone(artifact)).analyze(raw)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::classifier::{load_artifact, ArtifactPaths};
    use crate::models::{ReasonCode, Severity};

    pub(crate) fn demo_artifact() -> Arc<ClassifierArtifact> {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("artifacts/demo");
        Arc::new(load_artifact(&ArtifactPaths::in_dir(&dir)).unwrap())
    }

    #[test]
    fn test_ip_host_scenario() {
        let report = analyze("http://192.168.1.1/login", &demo_artifact());
        assert_eq!(report.reason, Some(ReasonCode::HostIsIp));
        assert_eq!(report.label, Label::Phishing);
        assert_eq!(report.confidence, 99.0);
        assert_eq!(report.severity, Severity::Danger);
    }

    #[test]
    fn test_at_symbol_scenario() {
        let report = analyze("example.com/a@b", &demo_artifact());
        assert_eq!(report.url, "example.com/a@b");
        assert_eq!(report.normalized, "http://example.com/a@b");
        assert_eq!(report.reason, Some(ReasonCode::ContainsAtSymbol));
        assert_eq!(report.label, Label::Phishing);
        assert_eq!(report.confidence, 99.0);
    }

    #[test]
    fn test_shortener_scenario() {
        let report = analyze("http://bit.ly/xyz", &demo_artifact());
        assert_eq!(report.reason, Some(ReasonCode::Shortener));
        assert_eq!(report.label, Label::Phishing);
        assert_eq!(report.confidence, 99.0);
    }

    #[test]
    fn test_clean_url_goes_through_model() {
        let report = analyze("https://www.wikipedia.org/wiki/Phishing", &demo_artifact());
        assert_eq!(report.reason, None);
        assert!((0.0..=100.0).contains(&report.confidence));
        assert_eq!(report.severity, report.label.severity());
    }

    #[test]
    fn test_screening_disabled() {
        let analyzer = UrlAnalyzer::new(demo_artifact()).with_screening(false);
        let report = analyzer.analyze("http://bit.ly/xyz");
        assert_eq!(report.reason, None);
        assert!((0.0..=100.0).contains(&report.confidence));
    }

    #[test]
    fn test_empty_input_is_scored() {
        let report = analyze("   ", &demo_artifact());
        assert_eq!(report.normalized, "http://");
        assert_eq!(report.reason, None);
    }
}
