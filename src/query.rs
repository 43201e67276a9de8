//! Search query representation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Default region code ("no region").
pub const DEFAULT_REGION: &str = "wt-wt";

/// Safe search level.
///
/// Accepted for API compatibility; the html and lite endpoints ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    On,
    #[default]
    Moderate,
    Off,
}

/// Time window filter for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeLimit {
    Day,
    Week,
    Month,
    Year,
}

impl TimeLimit {
    /// Value of the `df` form field for this window.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Day => "d",
            Self::Week => "w",
            Self::Month => "m",
            Self::Year => "y",
        }
    }
}

/// A concrete backend that can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Html,
    Lite,
}

impl BackendKind {
    /// All backends, in declaration order.
    pub const ALL: [BackendKind; 2] = [BackendKind::Html, BackendKind::Lite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Lite => "lite",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend selection requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Try every backend, in random order.
    #[default]
    Auto,
    Html,
    Lite,
}

impl Backend {
    /// Backends to try, before any shuffling.
    pub fn candidates(&self) -> Vec<BackendKind> {
        match self {
            Self::Auto => BackendKind::ALL.to_vec(),
            Self::Html => vec![BackendKind::Html],
            Self::Lite => vec![BackendKind::Lite],
        }
    }
}

/// A text search query with all parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The search terms.
    pub keywords: String,
    /// Region code (e.g., "us-en").
    #[serde(default = "default_region")]
    pub region: String,
    /// Safe search level.
    #[serde(default)]
    pub safesearch: SafeSearch,
    /// Time window filter.
    #[serde(default)]
    pub time_limit: Option<TimeLimit>,
    /// Backend selection.
    #[serde(default)]
    pub backend: Backend,
    /// Hard cap on the number of results. Pagination only happens when set.
    #[serde(default)]
    pub max_results: Option<usize>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl SearchQuery {
    /// Creates a new search query with the given keywords.
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            region: default_region(),
            safesearch: SafeSearch::default(),
            time_limit: None,
            backend: Backend::default(),
            max_results: None,
        }
    }

    /// Sets the region code.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the safe search level.
    pub fn with_safesearch(mut self, level: SafeSearch) -> Self {
        self.safesearch = level;
        self
    }

    /// Sets the time window filter.
    pub fn with_time_limit(mut self, limit: TimeLimit) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the backend selection.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the maximum number of results.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Checks the query preconditions.
    pub fn validate(&self) -> Result<()> {
        if self.keywords.trim().is_empty() {
            return Err(SearchError::Validation("keywords is mandatory".into()));
        }
        if self.max_results == Some(0) {
            return Err(SearchError::Validation(
                "max_results must be a positive integer".into(),
            ));
        }
        Ok(())
    }
}
