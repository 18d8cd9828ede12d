//! `Link` header parsing for paginated REST responses.
//!
//! The platform advertises further pages as
//! `<https://api.example.com/...&page=2>; rel="next", <...>; rel="last"`.

use regex::Regex;
use std::sync::LazyLock;

/// Matches one `<url>; rel="name"` link-value.
static LINK_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*<([^>]+)>\s*;(?:.*;)?\s*rel="?([^";]+)"?"#).expect("link value regex")
});

/// Return the `rel="next"` target of a `Link` header, if any.
pub(crate) fn next_page(link_header: &str) -> Option<String> {
    link_header
        .split(',')
        .filter_map(|part| LINK_VALUE_RE.captures(part))
        .find(|caps| caps[2].split_whitespace().any(|rel| rel == "next"))
        .map(|caps| caps[1].to_string())
}
