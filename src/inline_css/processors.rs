//! CSS text resource resolution
//!
//! Rewrites every `url(...)` reference inside a CSS fragment into a data URL.

use futures::future::join_all;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};

use super::downloaders::ResourceFetcher;
use super::types::EmbedResult;
use super::utils::{is_data_url, make_data_url, mime_from_path, resolve_url};
use crate::config::EmbedOptions;

lazy_static! {
    // Double-quoted, single-quoted or bare reference inside url(...)
    static ref URL_REFERENCE: Regex =
        Regex::new(r#"(?i)url\(\s*(?:"([^"]*)"|'([^']*)'|([^)'"\s]+))\s*\)"#)
            .expect("BUG: hardcoded url() regex is invalid");
}

/// Rewrites embeddable `url(...)` references in CSS text to inline data URLs.
///
/// `base_url` overrides the base from the options when resolving relative
/// references.
#[allow(async_fn_in_trait)]
pub trait CssResolver {
    async fn resolve(
        &self,
        css_text: &str,
        base_url: Option<&str>,
        options: &EmbedOptions,
    ) -> EmbedResult<String>;
}

/// Every `url(...)` reference in `css_text`, in order of appearance, data URLs excluded
#[must_use]
pub fn extract_url_references(css_text: &str) -> Vec<String> {
    URL_REFERENCE
        .captures_iter(css_text)
        .filter_map(|caps| reference_of(&caps).map(str::to_string))
        .filter(|reference| !reference.is_empty() && !is_data_url(reference))
        .collect()
}

fn reference_of<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().trim())
}

/// `CssResolver` that fetches each reference through a `ResourceFetcher`.
///
/// References that cannot be resolved or fetched are left untouched.
#[derive(Debug, Clone)]
pub struct CssUrlResolver<F> {
    fetcher: F,
}

impl<F: ResourceFetcher> CssUrlResolver<F> {
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    async fn embed_reference(
        &self,
        reference: &str,
        base_url: Option<&str>,
        options: &EmbedOptions,
    ) -> EmbedResult<String> {
        let url = match base_url {
            Some(base) => resolve_url(Some(base), reference)?,
            None => reference.to_string(),
        };
        let resource = self.fetcher.fetch(&url, options).await?;
        let mime = mime_from_path(&url).unwrap_or(resource.content_type.as_str());
        Ok(make_data_url(&resource.bytes, mime))
    }
}

impl<F: ResourceFetcher> CssResolver for CssUrlResolver<F> {
    async fn resolve(
        &self,
        css_text: &str,
        base_url: Option<&str>,
        options: &EmbedOptions,
    ) -> EmbedResult<String> {
        let mut references = extract_url_references(css_text);
        if references.is_empty() {
            return Ok(css_text.to_string());
        }
        let mut seen = HashSet::new();
        references.retain(|reference| seen.insert(reference.clone()));

        let downloads = references.iter().map(|reference| async move {
            let outcome = self.embed_reference(reference, base_url, options).await;
            (reference.as_str(), outcome)
        });

        let mut replacements: HashMap<&str, String> = HashMap::new();
        for (reference, outcome) in join_all(downloads).await {
            match outcome {
                Ok(data_url) => {
                    replacements.insert(reference, data_url);
                }
                Err(e) => log::warn!("Leaving CSS reference {reference} unresolved: {e}"),
            }
        }

        let rewritten = URL_REFERENCE.replace_all(css_text, |caps: &Captures<'_>| {
            match reference_of(caps).and_then(|r| replacements.get(r)) {
                Some(data_url) => format!("url(\"{data_url}\")"),
                None => caps[0].to_string(),
            }
        });

        Ok(rewritten.into_owned())
    }
}
