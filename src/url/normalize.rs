use serde::Serialize;

/// An absolute URL string that starts with `http://` or `https://`.
///
/// Nothing else is canonicalized: case, trailing slashes and percent-encoding
/// are kept as submitted, since the features are computed on the literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim whitespace and prepend `http://` when no web scheme is present.
///
/// Never fails. An empty string becomes `http://`; callers that want to
/// reject blank input check [`is_blank`] first.
pub fn normalize(raw: &str) -> NormalizedUrl {
    let trimmed = raw.trim();
    if has_web_scheme(trimmed) {
        NormalizedUrl(trimmed.to_string())
    } else {
        NormalizedUrl(format!("http://{}", trimmed))
    }
}

/// True when the input has nothing but whitespace.
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

pub(crate) fn has_web_scheme(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
