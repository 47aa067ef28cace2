//! Report renderers for URL classification results.
//!
//! - [`terminal`] — colored summary box and result table; respects `--verbose` / `--quiet`.
//!
//! JSON output is the serialized [`UrlReport`](crate::models::UrlReport) list and
//! needs no renderer of its own.

pub mod terminal;
