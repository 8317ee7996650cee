//! Node classification for the embedding pipeline
//!
//! Classification looks only at the element's namespace and local name, so
//! it holds for any node regardless of which document produced it.

use kuchiki::NodeRef;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Kind tag computed once per node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Any element that is not one of the resource-bearing kinds below
    Element,
    /// HTML `<img>`; reference lives in `src`
    RasterImage,
    /// SVG `<image>`; reference lives in `href` or `xlink:href`
    VectorImage,
    /// Text, comments, doctypes, documents and fragments
    Other,
}

impl NodeKind {
    /// All element kinds pass the pipeline's entry gate
    #[must_use]
    pub fn is_element(self) -> bool {
        !matches!(self, NodeKind::Other)
    }

    /// True for the two kinds that carry a primary resource reference
    #[must_use]
    pub fn is_resource_node(self) -> bool {
        matches!(self, NodeKind::RasterImage | NodeKind::VectorImage)
    }
}

#[must_use]
pub fn classify(node: &NodeRef) -> NodeKind {
    let Some(element) = node.as_element() else {
        return NodeKind::Other;
    };

    let namespace: &str = &element.name.ns;
    let local: &str = &element.name.local;
    match (namespace, local) {
        (HTML_NAMESPACE, "img") => NodeKind::RasterImage,
        (SVG_NAMESPACE, "image") => NodeKind::VectorImage,
        _ => NodeKind::Element,
    }
}
