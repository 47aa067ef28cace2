use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

static DOTTED_QUAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").expect("dotted-quad regex is valid"));

/// True when the whole host is four dot-separated groups of one to three digits.
///
/// Purely lexical: `999.1.1.1` matches, and so does nothing with a port attached.
pub fn is_dotted_quad(host: &str) -> bool {
    DOTTED_QUAD.is_match(host)
}

/// Registrable-domain split of a hostname.
///
/// `www.bbc.co.uk` → subdomain `www`, domain `bbc`, suffix `co.uk`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainParts {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

/// Split a hostname against the ICANN section of the Public Suffix List.
///
/// Private-section entries (`github.io`, `blogspot.com`, ...) are not treated as
/// suffixes. Hosts with an unlisted TLD get an empty suffix and their last label
/// as the domain; IPv4 literals are returned whole as the domain. The lookup is
/// case-insensitive but the parts keep the case of `host`.
pub fn domain_parts(host: &str) -> DomainParts {
    if host.is_empty() {
        return DomainParts::default();
    }

    if host.parse::<Ipv4Addr>().is_ok() {
        return DomainParts {
            domain: host.to_string(),
            ..DomainParts::default()
        };
    }

    // ASCII lowercasing keeps byte offsets valid for slicing `host`.
    let lookup = host.to_ascii_lowercase();
    let suffix_len = icann_suffix_len(&lookup).unwrap_or(0);
    let head = host[..host.len() - suffix_len].trim_end_matches('.');
    let suffix = &host[host.len() - suffix_len..];

    let (subdomain, domain) = match head.rsplit_once('.') {
        Some((sub, dom)) => (sub, dom),
        None => ("", head),
    };

    DomainParts {
        subdomain: subdomain.to_string(),
        domain: domain.to_string(),
        suffix: suffix.to_string(),
    }
}

/// Byte length of the longest ICANN suffix at the end of `host`, if any is listed.
fn icann_suffix_len(host: &str) -> Option<usize> {
    let mut name = host;
    loop {
        let suffix = psl::suffix(name.as_bytes())?;
        if !suffix.is_known() {
            return None;
        }
        let bytes = suffix.as_bytes();
        match suffix.typ() {
            Some(psl::Type::Private) => {
                // Retry on the private suffix minus its leftmost label.
                let text = std::str::from_utf8(bytes).ok()?;
                let (_, shorter) = text.split_once('.')?;
                name = &host[host.len() - shorter.len()..];
            }
            _ => return Some(bytes.len()),
        }
    }
}
