//! Inline `data:` URL decoding.
//!
//! Pages inline small background images as data URLs; those preloads must
//! succeed without touching the network.

use crate::error::FetchError;
use crate::fetch::FetchedResource;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Default media type when the data URL declares none (RFC 2397).
const DEFAULT_MEDIA_TYPE: &str = "text/plain";

/// Decode a `data:` URL into resource metadata.
pub fn decode(url: &str) -> Result<FetchedResource, FetchError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| FetchError::DataUrl(format!("missing data: prefix in {url}")))?;

    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| FetchError::DataUrl(format!("missing comma separator in {url}")))?;

    let (media_type, is_base64) = match meta.strip_suffix(";base64") {
        Some(media) => (media, true),
        None => (meta, false),
    };
    let media_type = if media_type.is_empty() {
        DEFAULT_MEDIA_TYPE
    } else {
        media_type
    };

    let bytes = if is_base64 {
        STANDARD
            .decode(payload)
            .map_err(|e| FetchError::DataUrl(format!("bad base64 payload: {e}")))?
            .len()
    } else {
        payload.len()
    };

    Ok(FetchedResource {
        url: url.to_string(),
        content_type: Some(media_type.to_string()),
        bytes,
    })
}
