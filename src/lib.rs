//! URL phishing classification: heuristic pre-screen plus a trained model.
//!
//! [`pipeline::UrlAnalyzer`] is the entry point; it owns a shared, read-only
//! [`classifier::ClassifierArtifact`] loaded once with
//! [`classifier::load_artifact`].

pub mod batch;
pub mod classifier;
pub mod config;
pub mod decision;
pub mod features;
pub mod heuristics;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod url;

pub use models::{ClassificationResult, HeuristicVerdict, Label, ReasonCode, UrlReport};
pub use pipeline::{analyze, UrlAnalyzer};
