//! Fluent builder for `EmbedOptions`
//!
//! Every field has a sensible default, so the builder only validates the
//! values that were explicitly set when `build()` is called.

use anyhow::{Context, Result, anyhow};
use std::path::Path;

use super::types::EmbedOptions;
use crate::inline_css::utils::is_data_url;

#[derive(Debug, Clone, Default)]
pub struct EmbedOptionsBuilder {
    pub(crate) options: EmbedOptions,
}

impl EmbedOptions {
    /// Create a builder for configuring `EmbedOptions` with a fluent interface
    #[must_use]
    pub fn builder() -> EmbedOptionsBuilder {
        EmbedOptionsBuilder::default()
    }

    /// Start a builder from these options, e.g. to override one field
    #[must_use]
    pub fn to_builder(&self) -> EmbedOptionsBuilder {
        EmbedOptionsBuilder {
            options: self.clone(),
        }
    }

    /// Parse options from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: EmbedOptions =
            serde_json::from_str(json).context("Invalid embed options JSON")?;
        validate(&options)?;
        Ok(options)
    }

    /// Read and parse options from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;
        Self::from_json_str(&json)
    }
}

impl EmbedOptionsBuilder {
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.options.base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn cache_bust(mut self, enabled: bool) -> Self {
        self.options.cache_bust = enabled;
        self
    }

    #[must_use]
    pub fn image_placeholder(mut self, data_url: impl Into<String>) -> Self {
        self.options.image_placeholder = Some(data_url.into());
        self
    }

    #[must_use]
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.options.fetch_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn max_resource_size(mut self, bytes: usize) -> Self {
        self.options.max_resource_size = bytes;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.options.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<EmbedOptions> {
        validate(&self.options)?;
        Ok(self.options)
    }
}

fn validate(options: &EmbedOptions) -> Result<()> {
    if let Some(ref base) = options.base_url {
        url::Url::parse(base).map_err(|e| anyhow!("Invalid base URL '{base}': {e}"))?;
    }

    if let Some(ref placeholder) = options.image_placeholder
        && !is_data_url(placeholder)
    {
        return Err(anyhow!("Image placeholder must be a data URL"));
    }

    if options.fetch_timeout_secs == 0 {
        return Err(anyhow!("Fetch timeout must be at least one second"));
    }

    if options.max_resource_size == 0 {
        return Err(anyhow!("Maximum resource size must be greater than zero"));
    }

    Ok(())
}
