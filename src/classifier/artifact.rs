use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

use super::model::ModelFile;
use super::scaler::ScalerSpec;
use super::{ClassifierArtifact, FeatureSchema};
use crate::features::FEATURE_NAMES;

/// Why an artifact could not be loaded. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature schema is empty")]
    EmptySchema,

    #[error("feature `{0}` appears more than once in the schema")]
    DuplicateFeature(String),

    #[error("scaler offset and scale vectors differ in length")]
    InconsistentScaler,

    #[error("{what} expect {found} features but the schema has {expected}")]
    Dimension {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid model: {0}")]
    InvalidModel(String),
}

/// Locations of the three artifact files.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub columns: PathBuf,
}

impl ArtifactPaths {
    /// Conventional file names inside one directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join("model.json"),
            scaler: dir.join("scaler.json"),
            columns: dir.join("feature_columns.json"),
        }
    }
}

/// Read, validate and assemble the classifier artifact.
pub fn load_artifact(paths: &ArtifactPaths) -> Result<ClassifierArtifact, ArtifactError> {
    let columns: Vec<String> = read_json(&paths.columns)?;
    let schema = validate_schema(columns)?;

    let unproduced: Vec<&str> = schema
        .names()
        .iter()
        .map(String::as_str)
        .filter(|name| !FEATURE_NAMES.contains(name))
        .collect();
    if !unproduced.is_empty() {
        warn!(features = ?unproduced, "schema features the extractor never produces will be scored as 0");
    }

    let scaler: ScalerSpec = read_json(&paths.scaler)?;
    if !scaler.is_consistent() {
        return Err(ArtifactError::InconsistentScaler);
    }
    if let Some(n) = scaler.n_features() {
        if n != schema.len() {
            return Err(ArtifactError::Dimension {
                what: "scaler parameters",
                expected: schema.len(),
                found: n,
            });
        }
    }

    let model_file: ModelFile = read_json(&paths.model)?;
    let positive_class = model_file.positive_class.clone();
    let model = model_file.into_classifier(schema.len())?;

    info!(
        features = schema.len(),
        classes = model.classes().len(),
        positive_class = %positive_class,
        model = %paths.model.display(),
        "classifier artifact loaded"
    );

    Ok(ClassifierArtifact::new(model, scaler.into_scaler(), schema).with_positive_class(positive_class))
}

fn validate_schema(columns: Vec<String>) -> Result<FeatureSchema, ArtifactError> {
    if columns.is_empty() {
        return Err(ArtifactError::EmptySchema);
    }
    let mut seen = HashSet::new();
    for name in &columns {
        if !seen.insert(name.as_str()) {
            return Err(ArtifactError::DuplicateFeature(name.clone()));
        }
    }
    Ok(FeatureSchema::new(columns))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassLabel;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn write_valid(dir: &Path) {
        write(dir, "feature_columns.json", r#"["nb_dots", "path_len"]"#);
        write(
            dir,
            "scaler.json",
            r#"{"kind": "standard", "mean": [1.0, 10.0], "scale": [1.0, 5.0]}"#,
        );
        write(
            dir,
            "model.json",
            r#"{"kind": "logistic_regression", "classes": [0, 1], "coef": [[1.0, 1.0]], "intercept": [0.0]}"#,
        );
    }

    #[test]
    fn test_load_valid_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_valid(dir.path());

        let artifact = load_artifact(&ArtifactPaths::in_dir(dir.path())).unwrap();
        assert_eq!(artifact.schema.names(), &["nb_dots", "path_len"]);
        assert_eq!(artifact.positive_class, ClassLabel::Number(1.0));
        assert_eq!(artifact.scaler.transform(&[2.0, 20.0]), vec![1.0, 2.0]);
        assert_eq!(artifact.model.classes().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        write_valid(dir.path());
        std::fs::remove_file(dir.path().join("scaler.json")).unwrap();

        let err = load_artifact(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ArtifactError::Read { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        write_valid(dir.path());
        write(dir.path(), "model.json", "{ not json");

        let err = load_artifact(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
    }

    #[test]
    fn test_scaler_width_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_valid(dir.path());
        write(dir.path(), "feature_columns.json", r#"["nb_dots"]"#);

        let err = load_artifact(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::Dimension { expected: 1, found: 2, .. }
        ));
    }

    #[test]
    fn test_schema_validation() {
        assert!(matches!(validate_schema(vec![]), Err(ArtifactError::EmptySchema)));
        assert!(matches!(
            validate_schema(vec!["a".into(), "b".into(), "a".into()]),
            Err(ArtifactError::DuplicateFeature(name)) if name == "a"
        ));
    }
}
