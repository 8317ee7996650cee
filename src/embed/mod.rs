//! Embedding pipeline for cloned DOM subtrees
//!
//! Turns every external image a subtree references into a data URL, in
//! place, so the subtree can be serialized or rasterized without network
//! access. Per element the pipeline runs, strictly in order:
//!
//! 1. background embedding (`style` background declarations)
//! 2. resource-node embedding (`<img src>`, SVG `<image href>`)
//! 3. child fan-out, which runs the whole pipeline on every child concurrently
//!
//! The caller keeps ownership of the tree throughout: `NodeRef` handles are
//! shared, and each concurrent branch only ever touches its own child subtree.

// Sub-modules
pub mod background;
pub mod image_node;
pub mod load_signal;
pub mod node_kind;
pub mod style;

use futures::future::{FutureExt, LocalBoxFuture, try_join_all};
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

use crate::config::EmbedOptions;
use crate::inline_css::downloaders::{HttpFetcher, ResourceFetcher};
use crate::inline_css::processors::{CssResolver, CssUrlResolver};
use crate::inline_css::types::{EmbedError, EmbedResult};
use load_signal::{DecodeProbe, LoadEnvironment};
use node_kind::classify;

// Re-exports for public API
pub use background::BACKGROUND_PROPERTY;
pub use image_node::{PrimaryReference, ReferenceSlot};
pub use load_signal::{LoadCompletion, LoadListener, LoadOutcome, load_channel};
pub use node_kind::NodeKind;
pub use style::InlineStyle;

/// The embedding pipeline together with its collaborators
#[derive(Debug, Clone)]
pub struct ImageEmbedder<F, R, E> {
    fetcher: F,
    resolver: R,
    environment: E,
}

/// Pipeline wired to HTTP fetching and data URL validation
pub type HttpImageEmbedder = ImageEmbedder<HttpFetcher, CssUrlResolver<HttpFetcher>, DecodeProbe>;

impl Default for HttpImageEmbedder {
    fn default() -> Self {
        let fetcher = HttpFetcher::new();
        ImageEmbedder::new(fetcher.clone(), CssUrlResolver::new(fetcher), DecodeProbe)
    }
}

impl<F, R, E> ImageEmbedder<F, R, E>
where
    F: ResourceFetcher,
    R: CssResolver,
    E: LoadEnvironment,
{
    #[must_use]
    pub fn new(fetcher: F, resolver: R, environment: E) -> Self {
        Self {
            fetcher,
            resolver,
            environment,
        }
    }

    /// Embed every image reference of `node` and its descendants.
    ///
    /// Non-element nodes are returned as they are. The returned handle is the
    /// node that was passed in.
    pub fn embed_images<'a>(
        &'a self,
        node: NodeRef,
        options: &'a EmbedOptions,
    ) -> LocalBoxFuture<'a, EmbedResult<NodeRef>> {
        async move {
            if !classify(&node).is_element() {
                return Ok(node);
            }

            let node = self.embed_background(node, options).await?;
            let node = self.embed_image_node(node, options).await?;
            self.embed_children(node, options).await
        }
        .boxed_local()
    }

    pub async fn embed_background(
        &self,
        node: NodeRef,
        options: &EmbedOptions,
    ) -> EmbedResult<NodeRef> {
        background::embed_background(node, &self.resolver, options).await
    }

    pub async fn embed_image_node(
        &self,
        node: NodeRef,
        options: &EmbedOptions,
    ) -> EmbedResult<NodeRef> {
        image_node::embed_image_node(node, &self.fetcher, &self.environment, options).await
    }

    /// Run the pipeline on every direct child concurrently.
    ///
    /// Completes with `node` once all children have; the first child error
    /// is returned immediately and the remaining children are dropped.
    pub async fn embed_children(
        &self,
        node: NodeRef,
        options: &EmbedOptions,
    ) -> EmbedResult<NodeRef> {
        // Snapshot the live child list; each branch owns one child subtree
        let children: Vec<NodeRef> = node.children().collect();
        try_join_all(
            children
                .into_iter()
                .map(|child| self.embed_images(child, options)),
        )
        .await?;

        Ok(node)
    }

    /// Parse an HTML document, embed its images and serialize it again
    pub async fn embed_html_document(
        &self,
        html: &str,
        options: &EmbedOptions,
    ) -> EmbedResult<String> {
        let document = kuchiki::parse_html().one(html);
        let document = self.embed_children(document, options).await?;

        let mut output = Vec::new();
        document
            .serialize(&mut output)
            .map_err(|e| EmbedError::Serialize(e.to_string()))?;
        String::from_utf8(output).map_err(|e| EmbedError::Serialize(e.to_string()))
    }
}

/// Embed the images of `node` using HTTP fetching
pub async fn embed_images(node: NodeRef, options: &EmbedOptions) -> EmbedResult<NodeRef> {
    HttpImageEmbedder::default().embed_images(node, options).await
}
