use serde::{Deserialize, Serialize};

/// Outcome of analyzing one submitted URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlReport {
    /// The URL exactly as it was submitted.
    pub url: String,
    pub normalized: String,
    pub label: Label,
    pub confidence: f64,
    /// Heuristic rule that short-circuited the model, if any.
    pub reason: Option<ReasonCode>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Phishing,
    Legitimate,
}

impl Label {
    pub fn severity(self) -> Severity {
        match self {
            Label::Phishing => Severity::Danger,
            Label::Legitimate => Severity::Success,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Phishing => write!(f, "Phishing"),
            Label::Legitimate => write!(f, "Legitimate"),
        }
    }
}

/// Display color class handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Danger,
    Success,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Danger => write!(f, "danger"),
            Severity::Success => write!(f, "success"),
        }
    }
}

/// Name of the heuristic rule that flagged a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    ContainsAtSymbol,
    HostIsIp,
    LongRandomTokenInPath,
    SuspiciousPathKeyword,
    LongPathOrTooManySegments,
    Shortener,
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReasonCode::ContainsAtSymbol => write!(f, "contains_at_symbol"),
            ReasonCode::HostIsIp => write!(f, "host_is_ip"),
            ReasonCode::LongRandomTokenInPath => write!(f, "long_random_token_in_path"),
            ReasonCode::SuspiciousPathKeyword => write!(f, "suspicious_path_keyword"),
            ReasonCode::LongPathOrTooManySegments => write!(f, "long_path_or_too_many_segments"),
            ReasonCode::Shortener => write!(f, "shortener"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicVerdict {
    NotFlagged,
    Flagged(ReasonCode),
}

impl HeuristicVerdict {
    pub fn reason(self) -> Option<ReasonCode> {
        match self {
            HeuristicVerdict::NotFlagged => None,
            HeuristicVerdict::Flagged(reason) => Some(reason),
        }
    }
}

/// Final label and confidence (0–100) for one URL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: Label,
    pub confidence: f64,
}
