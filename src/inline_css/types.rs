//! Type definitions shared by the fetch and CSS resolution collaborators

/// Result type alias for embedding operations
pub type EmbedResult<T> = Result<T, EmbedError>;

/// Error types for embedding operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmbedError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request failed for {url}: {reason}")]
    Request { url: String, reason: String },

    #[error("HTTP error {status}: {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Resource too large: {url} ({size} bytes, max {max})")]
    TooLarge { url: String, size: usize, max: usize },

    #[error("Malformed data URL: {0}")]
    InvalidDataUrl(String),

    #[error("CSS resolution failed: {0}")]
    Css(String),

    #[error("Failed to serialize document: {0}")]
    Serialize(String),
}

impl EmbedError {
    /// The URL this error is about, when one is known
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            EmbedError::InvalidUrl { url, .. }
            | EmbedError::Request { url, .. }
            | EmbedError::HttpStatus { url, .. }
            | EmbedError::TooLarge { url, .. } => Some(url),
            EmbedError::InvalidDataUrl(_) | EmbedError::Css(_) | EmbedError::Serialize(_) => None,
        }
    }
}

/// Raw bytes of a fetched resource plus the content type the source reported.
///
/// Consumed immediately to build one data URL; never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResource {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl FetchedResource {
    #[must_use]
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    /// Decode a data URL into a resource without any I/O
    pub fn from_data_url(data_url: &str) -> EmbedResult<Self> {
        let (content_type, bytes) = super::utils::parse_data_url(data_url)?;
        Ok(Self {
            bytes,
            content_type,
        })
    }
}
