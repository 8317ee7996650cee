//! Load completion for newly assigned resource references
//!
//! Assigning a data URL to an image node starts the environment's own load of
//! that reference. The outcome arrives through a one-shot listener with two
//! arms, success and failure, and the embedder awaits whichever fires first.
//!
//! ```ignore
//! let (listener, completion) = load_channel();
//! assign_reference(&node, &data_url);
//! environment.begin_load(&node, kind, listener);
//! let outcome = completion.await;
//! ```

use kuchiki::NodeRef;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

use super::image_node::current_reference;
use super::node_kind::NodeKind;
use crate::inline_css::utils::parse_data_url;

/// How the environment's load of an assigned reference ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
    /// The listener was dropped without firing either arm
    Abandoned,
}

/// Two-armed one-shot listener. Firing either arm consumes it.
#[derive(Debug)]
pub struct LoadListener {
    tx: oneshot::Sender<LoadOutcome>,
}

impl LoadListener {
    pub fn on_load(self) {
        // Receiver may already be gone; nothing is waiting then
        let _ = self.tx.send(LoadOutcome::Loaded);
    }

    pub fn on_error(self, reason: impl Into<String>) {
        let _ = self.tx.send(LoadOutcome::Failed(reason.into()));
    }
}

/// Awaitable side of a `LoadListener`
#[derive(Debug)]
pub struct LoadCompletion {
    receiver: oneshot::Receiver<LoadOutcome>,
}

impl Future for LoadCompletion {
    type Output = LoadOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(LoadOutcome::Abandoned),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Create a listener and its completion.
///
/// Create the pair before mutating the node so no signal can be missed.
#[must_use]
pub fn load_channel() -> (LoadListener, LoadCompletion) {
    let (tx, receiver) = oneshot::channel();
    (LoadListener { tx }, LoadCompletion { receiver })
}

/// The environment that loads a node's newly assigned reference.
///
/// Called right after the assignment; must eventually fire one arm of the
/// listener or drop it.
pub trait LoadEnvironment {
    fn begin_load(&self, node: &NodeRef, kind: NodeKind, listener: LoadListener);
}

/// Validates the assigned data URL the way a renderer would before painting:
/// the payload must decode and look like an image.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeProbe;

impl DecodeProbe {
    fn check(reference: &str) -> Result<(), String> {
        let (mime, bytes) = parse_data_url(reference).map_err(|e| e.to_string())?;
        if bytes.is_empty() {
            return Err("empty image payload".to_string());
        }

        if mime.eq_ignore_ascii_case("image/svg+xml") {
            let text = std::str::from_utf8(&bytes).map_err(|e| format!("SVG is not UTF-8: {e}"))?;
            if text.contains("<svg") {
                return Ok(());
            }
            return Err("SVG payload has no <svg> root".to_string());
        }

        image::guess_format(&bytes)
            .map(|_| ())
            .map_err(|e| format!("unrecognized image data ({mime}): {e}"))
    }
}

impl LoadEnvironment for DecodeProbe {
    fn begin_load(&self, node: &NodeRef, kind: NodeKind, listener: LoadListener) {
        let Some(reference) = current_reference(node, kind) else {
            listener.on_error("no reference assigned");
            return;
        };

        match Self::check(&reference.value) {
            Ok(()) => listener.on_load(),
            Err(reason) => listener.on_error(reason),
        }
    }
}
