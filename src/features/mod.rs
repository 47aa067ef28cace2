//! Lexical and statistical URL features fed to the classifier.
//!
//! The names and definitions here must stay identical to the ones the model
//! was trained with; the decision engine aligns them to the artifact schema.

pub mod entropy;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::url::split::{raw_host, split, strip_unsafe};
use crate::url::{domain_parts, is_dotted_quad, NormalizedUrl};

pub use entropy::shannon_entropy;

/// Every feature [`extract`] produces, in a stable order.
pub const FEATURE_NAMES: &[&str] = &[
    "length_url",
    "length_hostname",
    "ip",
    "nb_dots",
    "nb_hyphens",
    "nb_at",
    "nb_qm",
    "nb_and",
    "nb_eq",
    "nb_slash",
    "https_token",
    "ratio_digits_url",
    "ratio_digits_host",
    "nb_subdomains",
    "prefix_suffix",
    "shortening_service",
    "suspecious_tld",
    "phish_hints",
    "path_len",
    "path_entropy",
    "last_token_len",
    "last_token_entropy",
    "last_token_is_hex16plus",
    "has_validation_keyword",
];

const SHORTENING_SERVICES: &[&str] = &["bit.ly", "tinyurl", "t.co", "goo.gl", "ow.ly"];
const SUSPICIOUS_TLDS: &[&str] = &["cf", "ga", "gq", "ml", "tk"];
const PHISH_HINTS: &[&str] = &[
    "secure", "account", "login", "verify", "update", "paypal", "bank",
];
const VALIDATION_KEYWORDS: &[&str] = &["validate", "validation", "secure", "login", "account", "verify"];

/// Named feature values. Order carries no meaning here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(BTreeMap<String, f64>);

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Derive the full feature set from a normalized URL.
///
/// Malformed URLs yield zero/empty-based values rather than an error.
pub fn extract(url: &NormalizedUrl) -> FeatureVector {
    let url = url.as_str();
    let unsafe_free = strip_unsafe(url);
    let parts = split(&unsafe_free);
    let host = parts.netloc;
    let path = parts.path;
    let domain = domain_parts(raw_host(host));

    let url_lower = url.to_lowercase();
    let path_lower = path.to_lowercase();

    let trimmed_path = path.trim_end_matches('/');
    let last_token = trimmed_path.rsplit('/').next().unwrap_or("");

    let mut f = FeatureVector::new();

    f.insert("length_url", char_len(url));
    f.insert("length_hostname", char_len(host));
    f.insert("ip", flag(is_dotted_quad(host)));
    f.insert("nb_dots", count(url, '.'));
    f.insert("nb_hyphens", count(url, '-'));
    f.insert("nb_at", count(url, '@'));
    f.insert("nb_qm", count(url, '?'));
    f.insert("nb_and", count(url, '&'));
    f.insert("nb_eq", count(url, '='));
    f.insert("nb_slash", count(url, '/'));
    // Lexical on purpose: targets hosts like paypal-https.example.net
    f.insert("https_token", flag(host.to_lowercase().contains("https")));
    f.insert("ratio_digits_url", digit_ratio(url));
    f.insert("ratio_digits_host", digit_ratio(host));
    f.insert(
        "nb_subdomains",
        if domain.subdomain.is_empty() {
            0.0
        } else {
            domain.subdomain.split('.').count() as f64
        },
    );
    f.insert("prefix_suffix", flag(domain.domain.contains('-')));
    f.insert(
        "shortening_service",
        flag(SHORTENING_SERVICES.iter().any(|s| host.contains(s))),
    );
    f.insert(
        "suspecious_tld",
        flag(SUSPICIOUS_TLDS.contains(&domain.suffix.as_str())),
    );
    f.insert(
        "phish_hints",
        flag(PHISH_HINTS.iter().any(|w| url_lower.contains(w))),
    );

    f.insert("path_len", char_len(path));
    f.insert("path_entropy", shannon_entropy(path));
    f.insert("last_token_len", char_len(last_token));
    f.insert("last_token_entropy", shannon_entropy(last_token));
    f.insert("last_token_is_hex16plus", flag(is_hex16plus(last_token)));
    f.insert(
        "has_validation_keyword",
        flag(VALIDATION_KEYWORDS.iter().any(|k| path_lower.contains(k))),
    );

    f
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn char_len(s: &str) -> f64 {
    s.chars().count() as f64
}

fn count(s: &str, c: char) -> f64 {
    s.matches(c).count() as f64
}

/// Share of ASCII digits, with the denominator floored at 1.
///
/// Narrower than the training-time count, which also took Unicode digits
/// such as `٣` or `²`; re-exported models see 0 for those characters.
fn digit_ratio(s: &str) -> f64 {
    let len = s.chars().count().max(1);
    let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
    digits as f64 / len as f64
}

fn is_hex16plus(token: &str) -> bool {
    token.len() >= 16 && token.chars().all(|c| c.is_ascii_hexdigit())
}
