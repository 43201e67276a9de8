//! Text and href cleanup applied to every extracted result.

use std::sync::OnceLock;

use regex::Regex;
use scraper::Html;

fn strip_tags_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

/// Strips tag-like substrings and decodes HTML entities.
pub fn normalize_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let stripped = strip_tags_regex().replace_all(raw, "");
    // A leftover `<` has no closing `>`; escape it so the fragment parser
    // only decodes entities and never opens an element.
    Html::parse_fragment(&stripped.replace('<', "&lt;"))
        .root_element()
        .text()
        .collect()
}

/// URL-decodes an href and replaces spaces with `+`.
pub fn normalize_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let decoded = urlencoding::decode(url)
        .map(|d| d.into_owned())
        .unwrap_or_else(|_| url.to_string());
    decoded.replace(' ', "+")
}

/// Resolves protocol-relative hrefs and unwraps DuckDuckGo `/l/?uddg=` redirects.
pub fn resolve_href(href: &str) -> String {
    let href = href.trim();
    let absolute = match href.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => href.to_string(),
    };

    extract_redirect_url(&absolute).unwrap_or(absolute)
}

fn extract_redirect_url(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://duckduckgo.com/l/?")
        .or_else(|| url.strip_prefix("/l/?"))?;
    let encoded = rest
        .split('&')
        .find_map(|pair| pair.strip_prefix("uddg="))?;
    let decoded = urlencoding::decode(encoded).ok()?;
    Some(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_strips_tags_and_decodes() {
        assert_eq!(normalize_text("<b>Hello &amp; World</b>"), "Hello & World");
    }

    #[test]
    fn test_normalize_text_numeric_entities() {
        assert_eq!(normalize_text("It&#39;s &lt;fine&gt;"), "It's <fine>");
    }

    #[test]
    fn test_normalize_text_empty() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_normalize_text_keeps_unclosed_angle_bracket() {
        assert_eq!(normalize_text("x <y"), "x <y");
        assert_eq!(normalize_text("<b>a</b> &amp; <c"), "a & <c");
    }

    #[test]
    fn test_normalize_text_plain() {
        assert_eq!(normalize_text("plain text"), "plain text");
    }

    #[test]
    fn test_normalize_url_decodes_and_plusses_spaces() {
        assert_eq!(
            normalize_url("https://example.com/a%20b"),
            "https://example.com/a+b"
        );
    }

    #[test]
    fn test_normalize_url_literal_spaces() {
        assert_eq!(
            normalize_url("https://example.com/a b c"),
            "https://example.com/a+b+c"
        );
    }

    #[test]
    fn test_normalize_url_invalid_utf8_kept() {
        assert_eq!(normalize_url("https://example.com/%FF"), "https://example.com/%FF");
    }

    #[test]
    fn test_normalize_url_empty() {
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn test_resolve_href_protocol_relative() {
        assert_eq!(
            resolve_href("//duckduckgo.com/y.js?ad_domain=x"),
            "https://duckduckgo.com/y.js?ad_domain=x"
        );
    }

    #[test]
    fn test_resolve_href_unwraps_redirect() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpage&rut=abc";
        assert_eq!(resolve_href(href), "https://example.com/page");
    }

    #[test]
    fn test_resolve_href_relative_redirect() {
        let href = "/l/?kh=-1&uddg=https%3A%2F%2Fexample.com";
        assert_eq!(resolve_href(href), "https://example.com");
    }

    #[test]
    fn test_resolve_href_plain() {
        assert_eq!(resolve_href(" https://example.com "), "https://example.com");
    }
}
