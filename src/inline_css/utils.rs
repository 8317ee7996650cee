//! Utility functions for URL handling, MIME inference and data URLs

use base64::Engine;
use url::Url;

use super::types::{EmbedError, EmbedResult};
use crate::utils::FALLBACK_CONTENT_TYPE;

/// Resolve a potentially relative reference against an optional base URL.
///
/// Without a base the reference must already be absolute.
pub fn resolve_url(base_url: Option<&str>, reference: &str) -> EmbedResult<String> {
    let reference = reference.trim();
    let resolved = match base_url {
        Some(base) => Url::parse(base)
            .and_then(|base| base.join(reference))
            .map_err(|e| EmbedError::InvalidUrl {
                url: reference.to_string(),
                reason: format!("cannot resolve against '{base}': {e}"),
            })?,
        None => Url::parse(reference).map_err(|e| EmbedError::InvalidUrl {
            url: reference.to_string(),
            reason: e.to_string(),
        })?,
    };
    Ok(resolved.to_string())
}

/// Infer a MIME type from the extension of a URL or file path.
///
/// Query string and fragment are ignored. Returns `None` for unknown or
/// missing extensions so callers can fall back to the reported content type.
#[must_use]
pub fn mime_from_path(path: &str) -> Option<&'static str> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let (_, extension) = path.rsplit_once('.')?;
    if extension.contains('/') {
        return None;
    }

    let mime = match extension.to_ascii_lowercase().as_str() {
        "woff" => "application/font-woff",
        "woff2" => "application/font-woff2",
        "ttf" => "application/font-truetype",
        "eot" => "application/vnd.ms-fontobject",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => return None,
    };
    Some(mime)
}

/// True if the reference is already a self-contained data URL
#[must_use]
pub fn is_data_url(reference: &str) -> bool {
    reference
        .trim_start()
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:"))
}

/// Build a base64 data URL from raw bytes and a MIME type
#[must_use]
pub fn make_data_url(bytes: &[u8], mime: &str) -> String {
    let mime = if mime.trim().is_empty() {
        FALLBACK_CONTENT_TYPE
    } else {
        mime.trim()
    };

    let encoded_capacity = base64::encoded_len(bytes.len(), true).unwrap_or(0);
    let mut encoded = String::with_capacity(encoded_capacity + 13 + mime.len());

    encoded.push_str("data:");
    encoded.push_str(mime);
    encoded.push_str(";base64,");
    base64::engine::general_purpose::STANDARD.encode_string(bytes, &mut encoded);

    encoded
}

/// Split a data URL into its MIME type and decoded payload.
///
/// Supports both `;base64` payloads and percent-encoded text payloads.
pub fn parse_data_url(data_url: &str) -> EmbedResult<(String, Vec<u8>)> {
    let trimmed = data_url.trim();
    if !is_data_url(trimmed) {
        return Err(EmbedError::InvalidDataUrl(truncate(trimmed)));
    }

    let (header, payload) = trimmed[5..]
        .split_once(',')
        .ok_or_else(|| EmbedError::InvalidDataUrl(truncate(trimmed)))?;

    let mut params = header.split(';');
    let mime = params
        .next()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or("text/plain")
        .to_string();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| EmbedError::InvalidDataUrl(format!("{}: {e}", truncate(trimmed))))?
    } else {
        urlencoding::decode_binary(payload.as_bytes()).into_owned()
    };

    Ok((mime, bytes))
}

/// Keep data URLs out of error messages beyond a short prefix
fn truncate(text: &str) -> String {
    match text.char_indices().nth(48) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
