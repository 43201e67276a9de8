//! Search backend implementations.

mod html;
mod lite;

pub use html::HtmlEngine;
pub use lite::LiteEngine;

use scraper::{ElementRef, Selector};

pub(crate) fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// True if a navigation control points backwards ("Previous", "< Previous Page").
pub(crate) fn is_previous_control(control: &ElementRef<'_>) -> bool {
    let Some(submit) = selector("input[type=\"submit\"]") else {
        return false;
    };
    control.select(&submit).any(|input| {
        input
            .value()
            .attr("value")
            .map(|v| v.to_ascii_lowercase().contains("prev"))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_is_previous_control() {
        let html = Html::parse_document(
            r#"<form id="prev"><input type="submit" value="&lt; Previous Page"></form>
               <form id="next"><input type="submit" value="Next Page &gt;"></form>
               <form id="bare"><input type="hidden" name="s" value="30"></form>"#,
        );
        let form = selector("form").unwrap();
        let flags: Vec<bool> = html.select(&form).map(|f| is_previous_control(&f)).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn test_selector_rejects_invalid_css() {
        assert!(selector("div[").is_none());
        assert!(selector("div.result").is_some());
    }
}
