//! Core configuration types for snapshot embedding
//!
//! `EmbedOptions` is the opaque bag the embedding pipeline forwards to every
//! fetch and CSS resolution call. The pipeline itself never inspects it.

use serde::{Deserialize, Serialize};

/// Options forwarded unmodified to the fetch and CSS resolution collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedOptions {
    /// Base URL for resolving relative references.
    ///
    /// When absent, every reference must already be absolute.
    pub(crate) base_url: Option<String>,

    /// Append a cache-busting query parameter to every fetched URL
    pub(crate) cache_bust: bool,

    /// Data URL substituted for any resource that cannot be fetched.
    ///
    /// **INVARIANT:** Always a `data:` URL (validated in builder).
    pub(crate) image_placeholder: Option<String>,

    /// Timeout in seconds for a single resource fetch
    ///
    /// Default: 30 seconds
    pub(crate) fetch_timeout_secs: u64,

    /// Maximum size in bytes of a single fetched resource
    ///
    /// Default: 5MB
    pub(crate) max_resource_size: usize,

    pub(crate) user_agent: String,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            cache_bust: false,
            image_placeholder: None,
            fetch_timeout_secs: crate::utils::DEFAULT_FETCH_TIMEOUT_SECS,
            max_resource_size: crate::utils::DEFAULT_MAX_RESOURCE_SIZE,
            user_agent: crate::utils::CHROME_USER_AGENT.to_string(),
        }
    }
}
