//! DuckDuckGo lite backend.

use scraper::{ElementRef, Html};

use super::{is_previous_control, selector};
use crate::engine::{Candidate, Engine};
use crate::payload::FormPayload;
use crate::BackendKind;

const ENDPOINT: &str = "https://lite.duckduckgo.com/lite";

/// Rows per result in the lite table: title, snippet, url preview, separator.
const ROWS_PER_RESULT: usize = 4;

/// Rules for `lite.duckduckgo.com`.
///
/// Results live in the last `table` of the page, four rows each. The next
/// page only advances the `s` offset of the current payload.
#[derive(Debug, Clone)]
pub struct LiteEngine {
    endpoint: String,
}

impl LiteEngine {
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

impl Default for LiteEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for LiteEngine {
    fn kind(&self) -> BackendKind {
        BackendKind::Lite
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn sentinel(&self) -> &str {
        "No more results."
    }

    fn extract(&self, document: &Html) -> Option<Vec<Candidate>> {
        let table = selector("table")?;
        let row = selector("tr")?;
        let anchor = selector("a")?;
        let snippet = selector(".result-snippet")?;

        let results_table = document.select(&table).last()?;
        let rows: Vec<ElementRef<'_>> = results_table.select(&row).collect();
        if rows.is_empty() {
            return None;
        }

        let candidates = rows
            .chunks(ROWS_PER_RESULT)
            .filter_map(|group| {
                let title_row = group.first()?;
                let snippet_row = group.get(1)?;
                let link = title_row.select(&anchor).next();

                Some(Candidate {
                    href: link
                        .and_then(|a| a.value().attr("href"))
                        .map(str::to_string),
                    title: link.map(|a| a.inner_html()).unwrap_or_default(),
                    body: snippet_row
                        .select(&snippet)
                        .next()
                        .map(|s| s.inner_html().trim().to_string())
                        .unwrap_or_default(),
                })
            })
            .collect();

        Some(candidates)
    }

    fn next_page(&self, document: &Html, current: &FormPayload) -> Option<FormPayload> {
        let form = selector("form")?;
        let offset = selector("input[name=\"s\"][value]")?;

        let value = document
            .select(&form)
            .filter(|f| !is_previous_control(f))
            .find_map(|f| {
                f.select(&offset)
                    .filter_map(|input| input.value().attr("value"))
                    .find(|v| !v.is_empty())
            })?;

        let mut next = current.clone();
        next.set("s", value);
        Some(next)
    }
}
