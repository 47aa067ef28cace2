/// Components of a URL as produced by Python's `urllib.parse.urlparse`.
///
/// The feature set was trained against that parser, so the split keeps its
/// quirks: no percent-decoding, no case folding beyond the scheme, and the
/// `;params` of the last path segment dropped from `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub scheme: String,
    pub netloc: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

/// Split `url` into its components. Never fails; missing parts are empty.
///
/// The input must already be free of tab/CR/LF (see [`strip_unsafe`]); the
/// borrowed parts point into it.
pub fn split(url: &str) -> UrlParts<'_> {
    let mut rest = url;
    let mut scheme = String::new();

    if let Some(i) = rest.find(':') {
        let candidate = &rest[..i];
        if i > 0 && is_scheme(candidate) {
            scheme = candidate.to_ascii_lowercase();
            rest = &rest[i + 1..];
        }
    }

    let mut netloc = "";
    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        netloc = &after[..end];
        rest = &after[end..];
    }

    let mut fragment = "";
    if let Some((before, frag)) = rest.split_once('#') {
        rest = before;
        fragment = frag;
    }

    let mut query = "";
    if let Some((before, q)) = rest.split_once('?') {
        rest = before;
        query = q;
    }

    UrlParts {
        scheme,
        netloc,
        path: strip_params(rest),
        query,
        fragment,
    }
}

/// Remove ASCII tab, CR and LF anywhere in the string, as urlparse does.
pub fn strip_unsafe(url: &str) -> std::borrow::Cow<'_, str> {
    if url.contains(['\t', '\r', '\n']) {
        std::borrow::Cow::Owned(url.chars().filter(|c| !matches!(c, '\t' | '\r' | '\n')).collect())
    } else {
        std::borrow::Cow::Borrowed(url)
    }
}

/// Host portion of a netloc: userinfo and port removed, lowercased, trailing dot dropped.
pub fn hostname(netloc: &str) -> String {
    raw_host(netloc).to_lowercase()
}

/// Like [`hostname`], but keeps the host's case as submitted.
pub fn raw_host(netloc: &str) -> &str {
    let host_port = match netloc.rfind('@') {
        Some(i) => &netloc[i + 1..],
        None => netloc,
    };

    let host = if let Some(bracketed) = host_port.strip_prefix('[') {
        bracketed.split(']').next().unwrap_or(bracketed)
    } else {
        host_port.split(':').next().unwrap_or(host_port)
    };

    host.trim_end_matches('.')
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Drop the `;params` suffix of the last path segment.
fn strip_params(path: &str) -> &str {
    let start = path.rfind('/').unwrap_or(0);
    match path[start..].find(';') {
        Some(i) => &path[..start + i],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_full_url() {
        let parts = split("HTTPS://user@Example.com:8080/a/b?x=1&y=2#top");
        assert_eq!(parts.scheme, "https");
        assert_eq!(parts.netloc, "user@Example.com:8080");
        assert_eq!(parts.path, "/a/b");
        assert_eq!(parts.query, "x=1&y=2");
        assert_eq!(parts.fragment, "top");
    }

    #[test]
    fn test_split_without_path() {
        let parts = split("http://example.com");
        assert_eq!(parts.netloc, "example.com");
        assert_eq!(parts.path, "");
    }

    #[test]
    fn test_fragment_before_query() {
        let parts = split("http://h/p#frag?not-query");
        assert_eq!(parts.path, "/p");
        assert_eq!(parts.query, "");
        assert_eq!(parts.fragment, "frag?not-query");
    }

    #[test]
    fn test_params_only_stripped_from_last_segment() {
        assert_eq!(split("http://h/a;x/b;y").path, "/a;x/b");
        assert_eq!(split("http://h/a;x/b").path, "/a;x/b");
    }

    #[test]
    fn test_empty_netloc() {
        let parts = split("http://");
        assert_eq!(parts.scheme, "http");
        assert_eq!(parts.netloc, "");
        assert_eq!(parts.path, "");
    }

    #[test]
    fn test_invalid_scheme_is_kept_in_path() {
        let parts = split("1http://x");
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.path, "1http://x");
    }

    #[test]
    fn test_hostname() {
        assert_eq!(hostname("user:pw@WWW.Example.COM.:443"), "www.example.com");
        assert_eq!(hostname("[::1]:8080"), "::1");
        assert_eq!(hostname(""), "");
        assert_eq!(raw_host("user@WWW.Example.COM.:443"), "WWW.Example.COM");
    }

    #[test]
    fn test_strip_unsafe() {
        assert_eq!(strip_unsafe("http://a\t.b/\nc"), "http://a.b/c");
        assert!(matches!(strip_unsafe("http://a.b"), std::borrow::Cow::Borrowed(_)));
    }
}
