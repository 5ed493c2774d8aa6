//! URL handling for AGS resources.
//!
//! - `extractor`: pulls the context and line item ids out of a REST path
//! - `builder`: derives sub-resource endpoints from a line item URL
//! - `link`: RFC 5988 `Link` header support for pagination

mod builder;
mod extractor;
mod link;

#[cfg(test)]
mod extractor_test;

pub use builder::build;
pub use extractor::{DEFAULT_SPLIT_TOKEN, ExtractedResource, extract, extract_from_url};
pub use link::{format_next_link, parse_next_link};
