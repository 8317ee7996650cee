//! Shared configuration constants for snapshot embedding
//!
//! This module contains default values used by the fetch and CSS resolution
//! collaborators so the defaults live in one place.

/// Default timeout for a single resource fetch: 30 seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Default maximum size of a fetched resource: 5MB
///
/// Anything larger should not be inlined as a data URL; the inflated
/// base64 text would dominate the serialized snapshot.
pub const DEFAULT_MAX_RESOURCE_SIZE: usize = 5 * 1024 * 1024;

/// Query parameter appended to fetched URLs when cache busting is enabled
pub const CACHE_BUST_PARAM: &str = "_cb";

/// Content type used when neither the path nor the response names one
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Chrome user agent string
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
