//! Embedding of CSS backgrounds declared in an element's inline style

use kuchiki::NodeRef;

use super::style::InlineStyle;
use crate::config::EmbedOptions;
use crate::inline_css::processors::CssResolver;
use crate::inline_css::types::EmbedResult;

/// Inline style property whose `url(...)` references are embedded.
///
/// Longhands such as `background-image` are left untouched.
pub const BACKGROUND_PROPERTY: &str = "background";

/// Rewrite the `url(...)` references of the node's `background` declaration.
///
/// A node without a `background` value is returned without calling the
/// resolver. The rewritten text keeps the declaration's `!important` flag.
/// Resolver errors propagate.
pub async fn embed_background<R: CssResolver>(
    node: NodeRef,
    resolver: &R,
    options: &EmbedOptions,
) -> EmbedResult<NodeRef> {
    // No borrow of the node survives the await below
    let Some(css_text) = InlineStyle::of(&node)
        .and_then(|style| style.property_value(BACKGROUND_PROPERTY).map(str::to_string))
    else {
        return Ok(node);
    };

    let resolved = resolver.resolve(&css_text, None, options).await?;

    let mut style = InlineStyle::of(&node).unwrap_or_default();
    let important = style.is_important(BACKGROUND_PROPERTY);
    style.set_property(BACKGROUND_PROPERTY, resolved, important);
    style.write_to(&node);

    Ok(node)
}
