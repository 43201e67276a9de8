//! Per-backend extraction rules.

use scraper::Html;

use crate::payload::FormPayload;
use crate::BackendKind;

/// A result entry as found in the markup, before filtering and cleanup.
///
/// `title` and `body` hold raw HTML fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub href: Option<String>,
    pub title: String,
    pub body: String,
}

/// Rules for one search backend.
///
/// The page loop is shared; an engine only knows where to send requests,
/// how to recognise an exhausted result set, and how to read its markup.
pub trait Engine: Send + Sync {
    /// Which backend these rules describe.
    fn kind(&self) -> BackendKind;

    /// Endpoint the form payload is posted to.
    fn endpoint(&self) -> &str;

    /// Text that marks a response as having no (further) results.
    fn sentinel(&self) -> &str;

    /// Returns true if the raw body signals the end of results.
    fn is_exhausted(&self, body: &str) -> bool {
        body.contains(self.sentinel())
    }

    /// Extracts result candidates in page order.
    ///
    /// Returns `None` when the page lacks the expected structure.
    fn extract(&self, document: &Html) -> Option<Vec<Candidate>>;

    /// Reads the continuation control and returns the next page's payload.
    fn next_page(&self, document: &Html, current: &FormPayload) -> Option<FormPayload>;
}
