//! Outbound URL construction.

use ::url::Url;

use crate::error::{AgsError, AgsResult};

/// Build an endpoint URL from `url`.
///
/// `path_suffix` is appended to the path behind a single `/`. Pairs in
/// `extra_query` are merged into the existing query string; on a key
/// collision the new value replaces the old one in place. Credentials, port
/// and fragment of the source URL are preserved.
pub fn build(url: &str, path_suffix: Option<&str>, extra_query: &[(&str, &str)]) -> AgsResult<String> {
    let mut parsed = Url::parse(url).map_err(|e| AgsError::MalformedUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if let Some(suffix) = path_suffix
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
    {
        let path = format!("{}/{}", parsed.path().trim_end_matches('/'), suffix);
        parsed.set_path(&path);
    }

    if !extra_query.is_empty() {
        let mut pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        for (key, value) in extra_query {
            match pairs.iter_mut().find(|(k, _)| k == key) {
                Some(existing) => existing.1 = value.to_string(),
                None => pairs.push((key.to_string(), value.to_string())),
            }
        }
        parsed.query_pairs_mut().clear().extend_pairs(&pairs);
    }

    Ok(parsed.into())
}
