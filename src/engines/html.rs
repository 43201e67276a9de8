//! DuckDuckGo html backend.

use scraper::{ElementRef, Html};

use super::{is_previous_control, selector};
use crate::engine::{Candidate, Engine};
use crate::payload::FormPayload;
use crate::BackendKind;

const ENDPOINT: &str = "https://html.duckduckgo.com/html";

/// Rules for `html.duckduckgo.com`.
///
/// Each result is the nearest `div` around an `h2` heading; the next page
/// is a form inside the last `.nav-link` whose hidden inputs replace the
/// whole payload.
#[derive(Debug, Clone)]
pub struct HtmlEngine {
    endpoint: String,
}

impl HtmlEngine {
    /// Creates the engine with the public endpoint.
    pub fn new() -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
        }
    }

    /// Points the engine at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for HtmlEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn is_heading(node: &ElementRef<'_>) -> bool {
    node.value().name() == "h2"
}

impl Engine for HtmlEngine {
    fn kind(&self) -> BackendKind {
        BackendKind::Html
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn sentinel(&self) -> &str {
        "No results."
    }

    fn extract(&self, document: &Html) -> Option<Vec<Candidate>> {
        let heading = selector("h2")?;
        let anchor = selector("a")?;
        let snippet = selector(".result__snippet")?;

        let mut blocks: Vec<ElementRef<'_>> = Vec::new();
        for h2 in document.select(&heading) {
            let block = h2
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|e| e.value().name() == "div");
            if let Some(block) = block {
                if !blocks.iter().any(|b| b.id() == block.id()) {
                    blocks.push(block);
                }
            }
        }
        if blocks.is_empty() {
            return None;
        }

        let candidates = blocks
            .into_iter()
            .map(|block| {
                let title_anchor = block
                    .select(&anchor)
                    .find(|a| a.ancestors().filter_map(ElementRef::wrap).any(|e| is_heading(&e)));
                let href = title_anchor
                    .or_else(|| block.select(&anchor).next())
                    .and_then(|a| a.value().attr("href"))
                    .map(str::to_string);
                let title = title_anchor.map(|a| a.inner_html()).unwrap_or_default();

                let body = match block.select(&snippet).next() {
                    Some(s) => s.inner_html(),
                    None => block
                        .select(&anchor)
                        .filter(|a| !a.ancestors().filter_map(ElementRef::wrap).any(|e| is_heading(&e)))
                        .map(|a| a.inner_html())
                        .collect::<Vec<_>>()
                        .join(" "),
                };

                Candidate { href, title, body }
            })
            .collect();

        Some(candidates)
    }

    fn next_page(&self, document: &Html, _current: &FormPayload) -> Option<FormPayload> {
        let nav = selector(".nav-link")?;
        let hidden = selector("input[type=\"hidden\"]")?;

        let next = document.select(&nav).last()?;
        if is_previous_control(&next) {
            return None;
        }

        let fields: Vec<(String, String)> = next
            .select(&hidden)
            .filter_map(|input| {
                let name = input.value().attr("name")?;
                let value = input.value().attr("value")?;
                Some((name.to_string(), value.to_string()))
            })
            .collect();

        if fields.is_empty() {
            return None;
        }
        Some(FormPayload::from_fields(fields))
    }
}
