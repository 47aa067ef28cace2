//! URL canonicalization and parsing.
//!
//! - [`normalize`] — trims input and guarantees an `http://` / `https://` scheme.
//! - [`split`] — urlparse-compatible split into scheme, netloc, path, query, fragment.
//! - [`domain`] — public-suffix-aware split of a host into subdomain, domain and suffix.

pub mod domain;
pub mod normalize;
pub mod split;

pub use domain::{domain_parts, is_dotted_quad, DomainParts};
pub use normalize::{normalize, NormalizedUrl};
