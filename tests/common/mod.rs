//! Test doubles and helper functions for the snapshot test suite

#![allow(dead_code)]

use kodegen_tools_snapshot::embed::NodeKind;
use kodegen_tools_snapshot::{
    CssResolver, EmbedError, EmbedOptions, EmbedResult, FetchedResource, LoadEnvironment,
    LoadListener, ResourceFetcher,
};
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// PNG signature followed by the start of an IHDR chunk
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

/// Ordered record of collaborator calls shared between test doubles
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.borrow_mut().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.0.borrow().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

#[derive(Debug, Clone)]
pub enum Response {
    Ok(Vec<u8>, &'static str),
    Fail(&'static str),
    /// Never completes
    Hang,
}

/// Fetcher serving canned responses; unknown URLs answer 404
#[derive(Debug, Clone, Default)]
pub struct RecordingFetcher {
    pub log: EventLog,
    responses: Rc<HashMap<String, Response>>,
}

impl RecordingFetcher {
    pub fn new(log: EventLog, responses: &[(&str, Response)]) -> Self {
        Self {
            log,
            responses: Rc::new(
                responses
                    .iter()
                    .map(|(url, response)| ((*url).to_string(), response.clone()))
                    .collect(),
            ),
        }
    }
}

impl ResourceFetcher for RecordingFetcher {
    async fn fetch(&self, url: &str, _options: &EmbedOptions) -> EmbedResult<FetchedResource> {
        self.log.push(format!("fetch:{url}"));
        match self.responses.get(url) {
            Some(Response::Ok(bytes, content_type)) => {
                Ok(FetchedResource::new(bytes.clone(), *content_type))
            }
            Some(Response::Fail(reason)) => Err(EmbedError::Request {
                url: url.to_string(),
                reason: (*reason).to_string(),
            }),
            Some(Response::Hang) => futures::future::pending().await,
            None => Err(EmbedError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Resolver that records its input, yields once, then substitutes `replacement`
#[derive(Debug, Clone, Default)]
pub struct RecordingResolver {
    pub log: EventLog,
    pub replacement: Option<(String, String)>,
}

impl CssResolver for RecordingResolver {
    async fn resolve(
        &self,
        css_text: &str,
        _base_url: Option<&str>,
        _options: &EmbedOptions,
    ) -> EmbedResult<String> {
        self.log.push(format!("resolve:{css_text}"));
        tokio::task::yield_now().await;
        self.log.push("resolved");
        Ok(match &self.replacement {
            Some((from, to)) => css_text.replace(from, to),
            None => css_text.to_string(),
        })
    }
}

/// Load environments with a fixed verdict
#[derive(Debug, Clone, Copy)]
pub enum FixedLoad {
    Loads,
    Fails,
    Silent,
}

impl LoadEnvironment for FixedLoad {
    fn begin_load(&self, _node: &NodeRef, _kind: NodeKind, listener: LoadListener) {
        match self {
            FixedLoad::Loads => listener.on_load(),
            FixedLoad::Fails => listener.on_error("simulated decode failure"),
            FixedLoad::Silent => drop(listener),
        }
    }
}

/// Parse `html` and return the first node matching `selector`
pub fn select(html: &str, selector: &str) -> NodeRef {
    let document = kuchiki::parse_html().one(html);
    select_in(&document, selector)
}

pub fn select_in(root: &NodeRef, selector: &str) -> NodeRef {
    root.select_first(selector)
        .unwrap_or_else(|()| panic!("no element matches {selector}"))
        .as_node()
        .clone()
}

pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    node.as_element()?
        .attributes
        .borrow()
        .get(name)
        .map(str::to_string)
}
