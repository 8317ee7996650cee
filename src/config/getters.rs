//! Getter methods for `EmbedOptions`

use std::time::Duration;

use super::types::EmbedOptions;

impl EmbedOptions {
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    #[must_use]
    pub fn cache_bust(&self) -> bool {
        self.cache_bust
    }

    #[must_use]
    pub fn image_placeholder(&self) -> Option<&str> {
        self.image_placeholder.as_deref()
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    #[must_use]
    pub fn max_resource_size(&self) -> usize {
        self.max_resource_size
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
