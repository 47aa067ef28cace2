//! Rule-based pre-screen for URL shapes that are essentially never legitimate.
//!
//! Rules are evaluated in table order and the first match wins, so a URL that
//! both contains `@` and points at a shortener is reported as
//! `contains_at_symbol`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::models::{HeuristicVerdict, ReasonCode};
use crate::url::split::{split, strip_unsafe};
use crate::url::{is_dotted_quad, normalize, NormalizedUrl};

const SUSPICIOUS_PATH_KEYWORDS: &[&str] = &[
    "/validate",
    "/validation",
    "/secure",
    "/account",
    "/login",
    "/verify",
];

const SHORTENER_HOSTS: &[&str] = &["bit.ly", "t.co", "tinyurl", "goo.gl", "ow.ly", "is.gd"];

const MAX_PATH_LEN: usize = 150;
const MAX_SLASHES: usize = 6;

static TRAILING_HEX_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[0-9a-f]{16,}/?$").expect("hex token regex is valid"));
static LONG_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[0-9a-z]{20,}").expect("alnum run regex is valid"));

/// The pieces of a URL every rule looks at.
struct Subject<'a> {
    url: &'a str,
    /// Lowercased netloc.
    host: String,
    /// Lowercased path.
    path: String,
}

type Rule = fn(&Subject<'_>) -> bool;

/// Ordered rule table. Earlier entries take precedence.
const RULES: &[(ReasonCode, Rule)] = &[
    (ReasonCode::ContainsAtSymbol, contains_at_symbol),
    (ReasonCode::HostIsIp, host_is_ip),
    (ReasonCode::LongRandomTokenInPath, long_random_token_in_path),
    (ReasonCode::SuspiciousPathKeyword, suspicious_path_keyword),
    (ReasonCode::LongPathOrTooManySegments, long_path_or_too_many_segments),
    (ReasonCode::Shortener, shortener),
];

fn contains_at_symbol(s: &Subject<'_>) -> bool {
    s.url.contains('@')
}

fn host_is_ip(s: &Subject<'_>) -> bool {
    is_dotted_quad(&s.host)
}

fn long_random_token_in_path(s: &Subject<'_>) -> bool {
    TRAILING_HEX_TOKEN.is_match(&s.path) || LONG_ALNUM_RUN.is_match(&s.path)
}

fn suspicious_path_keyword(s: &Subject<'_>) -> bool {
    SUSPICIOUS_PATH_KEYWORDS.iter().any(|k| s.path.contains(k))
}

fn long_path_or_too_many_segments(s: &Subject<'_>) -> bool {
    s.path.chars().count() > MAX_PATH_LEN || s.url.matches('/').count() > MAX_SLASHES
}

fn shortener(s: &Subject<'_>) -> bool {
    SHORTENER_HOSTS.iter().any(|h| s.host.contains(h))
}

/// Run the rule battery against a normalized URL.
///
/// Trailing ` `, `|`, `,` and `;` left over from copy-pasting are ignored.
/// Never fails: input that does not parse cleanly simply matches nothing.
pub fn screen(url: &NormalizedUrl) -> HeuristicVerdict {
    let cleaned = url.as_str().trim().trim_end_matches([' ', '|', ',', ';']);
    let cleaned = normalize(cleaned);
    let text = cleaned.as_str();
    let unsafe_free = strip_unsafe(text);
    let parts = split(&unsafe_free);

    let subject = Subject {
        url: text,
        host: parts.netloc.to_lowercase(),
        path: parts.path.to_lowercase(),
    };

    for (reason, rule) in RULES {
        if rule(&subject) {
            info!(url = %url, reason = %reason, "heuristic flagged");
            return HeuristicVerdict::Flagged(*reason);
        }
    }

    HeuristicVerdict::NotFlagged
}
