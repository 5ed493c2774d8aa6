//! `Link` header handling for paginated containers (RFC 5988).

/// Format a `Link` header value pointing at the next page.
pub fn format_next_link(url: &str) -> String {
    format!("<{url}>; rel=\"next\"")
}

/// Find the `rel="next"` target in a `Link` header value.
pub fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;

        let is_next = parts.any(|param| {
            let Some((name, value)) = param.split_once('=') else {
                return false;
            };
            name.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next"))
        });

        (is_next && !url.is_empty()).then(|| url.to_string())
    })
}
