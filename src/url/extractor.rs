//! Resource extraction from REST paths of the form
//! `/{contextId}/lineitems[/{lineItemId}[/...]]`.

use ::url::Url;

use crate::error::{AgsError, AgsResult};

/// Token separating the context id from the line item id.
pub const DEFAULT_SPLIT_TOKEN: &str = "/lineitems";

/// Identifiers found in a request path. Empty segments are never reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedResource {
    pub context_id: Option<String>,
    pub line_item_id: Option<String>,
}

fn non_empty(segment: &str) -> Option<String> {
    (!segment.is_empty()).then(|| segment.to_string())
}

/// Extract the context and line item identifiers from `path`.
///
/// The context is the last segment before the first `split_token`, the line
/// item is the first segment after it. Anything trailing the line item id
/// (e.g. `/scores`) is ignored. A path without the token yields an empty
/// [`ExtractedResource`].
pub fn extract(path: &str, split_token: &str) -> ExtractedResource {
    let path = path.trim_matches('/');

    if split_token.is_empty() {
        return ExtractedResource::default();
    }

    let Some((before, after)) = path.split_once(split_token) else {
        return ExtractedResource::default();
    };

    let context_id = before.rsplit('/').next().and_then(non_empty);
    let line_item_id = after
        .trim_matches('/')
        .split('/')
        .next()
        .and_then(non_empty);

    ExtractedResource {
        context_id,
        line_item_id,
    }
}

/// Same as [`extract`], applied to the path of an absolute URL.
pub fn extract_from_url(url: &str, split_token: &str) -> AgsResult<ExtractedResource> {
    let parsed = Url::parse(url).map_err(|e| AgsError::MalformedUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(extract(parsed.path(), split_token))
}
