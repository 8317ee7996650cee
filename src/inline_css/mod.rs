//! Resource inlining collaborators
//!
//! This module provides the pieces the embedding pipeline delegates to:
//! byte fetching, CSS `url(...)` resolution, MIME inference and data URLs.

// Sub-modules
pub mod downloaders;
pub mod processors;
pub mod types;
pub mod utils;

// Re-exports for public API
pub use downloaders::{HttpFetcher, ResourceFetcher};
pub use processors::{CssResolver, CssUrlResolver, extract_url_references};
pub use types::{EmbedError, EmbedResult, FetchedResource};
pub use utils::{is_data_url, make_data_url, mime_from_path, parse_data_url, resolve_url};
