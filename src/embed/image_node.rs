//! Embedding of the primary resource reference of image nodes
//!
//! `<img>` carries its reference in `src`; SVG `<image>` in `href`, falling
//! back to the legacy `xlink:href`. A reference that is already a data URL is
//! never fetched again, which makes the embedder idempotent.

use kuchiki::{ExpandedName, NodeRef};

use super::load_signal::{LoadEnvironment, LoadOutcome, load_channel};
use super::node_kind::{NodeKind, classify};
use crate::config::EmbedOptions;
use crate::inline_css::downloaders::ResourceFetcher;
use crate::inline_css::types::EmbedResult;
use crate::inline_css::utils::{is_data_url, make_data_url, mime_from_path};

const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Attribute that holds a node's primary reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSlot {
    Src,
    Href,
    XlinkHref,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryReference {
    pub slot: ReferenceSlot,
    pub value: String,
}

fn xlink_href() -> ExpandedName {
    ExpandedName::new(XLINK_NAMESPACE, "href")
}

/// Read the primary reference of a resource node.
///
/// `None` for other kinds and for resource nodes without a usable reference.
#[must_use]
pub fn current_reference(node: &NodeRef, kind: NodeKind) -> Option<PrimaryReference> {
    let element = node.as_element()?;
    let attributes = element.attributes.borrow();

    let (slot, value) = match kind {
        NodeKind::RasterImage => (ReferenceSlot::Src, attributes.get("src")?),
        NodeKind::VectorImage => match attributes.get("href") {
            Some(href) => (ReferenceSlot::Href, href),
            None => (
                ReferenceSlot::XlinkHref,
                attributes.map.get(&xlink_href()).map(|a| a.value.as_str())?,
            ),
        },
        NodeKind::Element | NodeKind::Other => return None,
    };

    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some(PrimaryReference {
        slot,
        value: value.to_string(),
    })
}

/// Write a new reference into its slot.
///
/// For `<img>` the responsive `srcset` is cleared first so the renderer
/// cannot prefer a candidate that was never inlined.
pub fn assign_reference(node: &NodeRef, slot: ReferenceSlot, value: &str) {
    let Some(element) = node.as_element() else {
        return;
    };
    let mut attributes = element.attributes.borrow_mut();

    match slot {
        ReferenceSlot::Src => {
            attributes.remove("srcset");
            attributes.insert("src", value.to_string());
        }
        ReferenceSlot::Href => {
            attributes.insert("href", value.to_string());
        }
        ReferenceSlot::XlinkHref => {
            if let Some(attribute) = attributes.map.get_mut(&xlink_href()) {
                attribute.value = value.to_string();
            }
        }
    }
}

/// Inline the primary reference of an `<img>` or SVG `<image>`.
///
/// Other nodes, and nodes whose reference is already a data URL, come back
/// untouched without any I/O. A fetch failure propagates. Once the new
/// reference is assigned, the node is returned whether or not the environment
/// manages to load it.
pub async fn embed_image_node<F, E>(
    node: NodeRef,
    fetcher: &F,
    environment: &E,
    options: &EmbedOptions,
) -> EmbedResult<NodeRef>
where
    F: ResourceFetcher,
    E: LoadEnvironment,
{
    let kind = classify(&node);
    if !kind.is_resource_node() {
        return Ok(node);
    }

    let Some(reference) = current_reference(&node, kind) else {
        return Ok(node);
    };
    if is_data_url(&reference.value) {
        log::debug!("Skipping already inlined {kind:?} reference");
        return Ok(node);
    }

    let resource = fetcher.fetch(&reference.value, options).await?;
    let mime = mime_from_path(&reference.value).unwrap_or(resource.content_type.as_str());
    let data_url = make_data_url(&resource.bytes, mime);

    let (listener, completion) = load_channel();
    assign_reference(&node, reference.slot, &data_url);
    environment.begin_load(&node, kind, listener);

    match completion.await {
        LoadOutcome::Loaded => log::debug!("Inlined {} as {mime}", reference.value),
        LoadOutcome::Failed(reason) => {
            log::warn!("Inlined {} but it failed to load: {reason}", reference.value);
        }
        LoadOutcome::Abandoned => {
            log::debug!("Load of inlined {} was never reported", reference.value);
        }
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchiki::traits::TendrilSink;

    fn first(document: &NodeRef, selector: &str) -> NodeRef {
        document.select_first(selector).unwrap().as_node().clone()
    }

    #[test]
    fn test_reads_src_and_both_href_forms() {
        let document = kuchiki::parse_html().one(
            r#"<img src=" http://x/a.png "><svg><image href="b.svg"></image><image xlink:href="c.svg"></image></svg>"#,
        );

        let img = first(&document, "img");
        assert_eq!(
            current_reference(&img, NodeKind::RasterImage),
            Some(PrimaryReference {
                slot: ReferenceSlot::Src,
                value: "http://x/a.png".to_string()
            })
        );

        let images: Vec<NodeRef> = document
            .select("image")
            .unwrap()
            .map(|n| n.as_node().clone())
            .collect();
        assert_eq!(
            current_reference(&images[0], NodeKind::VectorImage).map(|r| r.slot),
            Some(ReferenceSlot::Href)
        );
        let legacy = current_reference(&images[1], NodeKind::VectorImage).unwrap();
        assert_eq!(legacy.slot, ReferenceSlot::XlinkHref);
        assert_eq!(legacy.value, "c.svg");
    }

    #[test]
    fn test_missing_or_blank_reference_is_none() {
        let document = kuchiki::parse_html().one(r#"<img alt="x"><img src="  ">"#);
        for img in document.select("img").unwrap() {
            assert_eq!(current_reference(img.as_node(), NodeKind::RasterImage), None);
        }
    }

    #[test]
    fn test_assign_clears_srcset() {
        let document =
            kuchiki::parse_html().one(r#"<img src="a.png" srcset="a@2x.png 2x, a@3x.png 3x">"#);
        let img = first(&document, "img");
        assign_reference(&img, ReferenceSlot::Src, "data:image/png;base64,AA==");

        let element = img.as_element().unwrap();
        let attributes = element.attributes.borrow();
        assert_eq!(attributes.get("src"), Some("data:image/png;base64,AA=="));
        assert_eq!(attributes.get("srcset"), None);
    }

    #[test]
    fn test_assign_keeps_xlink_slot() {
        let document =
            kuchiki::parse_html().one(r#"<svg><image xlink:href="c.svg"></image></svg>"#);
        let image = first(&document, "image");
        assign_reference(&image, ReferenceSlot::XlinkHref, "data:image/svg+xml;base64,AA==");

        let reference = current_reference(&image, NodeKind::VectorImage).unwrap();
        assert_eq!(reference.slot, ReferenceSlot::XlinkHref);
        assert_eq!(reference.value, "data:image/svg+xml;base64,AA==");
    }
}
