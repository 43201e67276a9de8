//! Page-by-page retrieval loop shared by every backend.

use std::collections::HashSet;

use reqwest::Method;
use scraper::Html;
use tracing::Level;

use crate::engine::Engine;
use crate::normalize::{normalize_text, normalize_url, resolve_href};
use crate::observer::SearchObserver;
use crate::payload::FormPayload;
use crate::rate_limit::RateLimiter;
use crate::transport::Transport;
use crate::{Result, SearchError, SearchQuery, SearchResult};

/// Hard ceiling on page requests per backend run.
pub const MAX_PAGES: usize = 5;

/// Hrefs that never point at a real result.
const BLOCKED_PREFIXES: &[&str] = &[
    // Google search redirect wrapper
    "http://www.google.com/search?q=",
    // sponsored links
    "https://duckduckgo.com/y.js?ad_domain",
];

/// Statuses the endpoints use to throttle clients.
const RATE_LIMIT_STATUSES: &[u16] = &[202, 301, 403];

fn is_blocked(href: &str) -> bool {
    BLOCKED_PREFIXES.iter().any(|p| href.starts_with(p))
}

enum PageOutcome {
    Done,
    Next(FormPayload),
}

/// Drives request, extraction and pagination for one backend.
pub(crate) struct Driver<'a> {
    transport: &'a dyn Transport,
    limiter: &'a RateLimiter,
    observer: &'a dyn SearchObserver,
}

impl<'a> Driver<'a> {
    pub(crate) fn new(
        transport: &'a dyn Transport,
        limiter: &'a RateLimiter,
        observer: &'a dyn SearchObserver,
    ) -> Self {
        Self {
            transport,
            limiter,
            observer,
        }
    }

    fn emit(&self, level: Level, message: &str, fields: &[(&str, String)]) {
        self.observer.on_event(level, message, fields);
    }

    /// Runs the page loop. Transport errors propagate; a page without the
    /// expected structure ends the run with what was collected so far.
    pub(crate) async fn run(
        &self,
        engine: &dyn Engine,
        query: &SearchQuery,
    ) -> Result<Vec<SearchResult>> {
        let backend = engine.kind().to_string();
        self.emit(
            Level::INFO,
            "Starting backend search",
            &[
                ("backend", backend.clone()),
                ("keywords", query.keywords.clone()),
                ("region", query.region.clone()),
                ("max_results", format!("{:?}", query.max_results)),
            ],
        );

        let mut payload = FormPayload::initial(query);
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for page in 1..=MAX_PAGES {
            self.emit(Level::DEBUG, "Fetching page", &[("page", page.to_string())]);
            let body = self.request(Method::POST, engine.endpoint(), &payload).await?;

            if engine.is_exhausted(&body) {
                self.emit(Level::INFO, "No more results", &[("backend", backend.clone())]);
                return Ok(results);
            }

            match self.process_page(engine, &body, query, &payload, &mut seen, &mut results) {
                PageOutcome::Done => break,
                PageOutcome::Next(next) => payload = next,
            }
        }

        self.emit(
            Level::INFO,
            "Search completed",
            &[("backend", backend), ("count", results.len().to_string())],
        );
        Ok(results)
    }

    fn process_page(
        &self,
        engine: &dyn Engine,
        body: &str,
        query: &SearchQuery,
        payload: &FormPayload,
        seen: &mut HashSet<String>,
        results: &mut Vec<SearchResult>,
    ) -> PageOutcome {
        let document = Html::parse_document(body);

        let candidates = match engine.extract(&document) {
            Some(candidates) if !candidates.is_empty() => candidates,
            _ => {
                self.emit(
                    Level::DEBUG,
                    "No extractable results on page",
                    &[("backend", engine.kind().to_string())],
                );
                return PageOutcome::Done;
            }
        };

        for candidate in candidates {
            let Some(raw) = candidate.href else {
                continue;
            };
            let resolved = resolve_href(&raw);
            if resolved.is_empty() || is_blocked(&resolved) {
                continue;
            }
            // Dedup on the emitted form so `%20`, `+` and ` ` spellings collapse.
            let href = normalize_url(&resolved);
            if !seen.insert(href.clone()) {
                continue;
            }

            results.push(SearchResult::new(
                normalize_text(&candidate.title),
                href,
                normalize_text(&candidate.body),
            ));

            if query.max_results.is_some_and(|max| results.len() >= max) {
                self.emit(
                    Level::INFO,
                    "Reached maximum results limit",
                    &[("count", results.len().to_string())],
                );
                return PageOutcome::Done;
            }
        }

        // Without a caller-supplied bound only the first page is fetched.
        if query.max_results.is_none() {
            return PageOutcome::Done;
        }

        match engine.next_page(&document, payload) {
            Some(next) => PageOutcome::Next(next),
            None => {
                self.emit(
                    Level::INFO,
                    "No more pages to fetch",
                    &[("count", results.len().to_string())],
                );
                PageOutcome::Done
            }
        }
    }

    /// Sends one request after the rate-limit delay and interprets the status.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        payload: &FormPayload,
    ) -> Result<String> {
        self.emit(
            Level::INFO,
            "Making request",
            &[("method", method.to_string()), ("url", url.to_string())],
        );

        let delay = self.limiter.wait().await;
        if !delay.is_zero() {
            self.emit(
                Level::DEBUG,
                "Slept before request",
                &[("delay_ms", delay.as_millis().to_string())],
            );
        }

        let response = match self.transport.send(method, url, payload.fields()).await {
            Ok(response) => response,
            Err(err) => {
                let message = match &err {
                    SearchError::Timeout(_) => "Request timeout",
                    _ => "Request failed",
                };
                self.emit(
                    Level::ERROR,
                    message,
                    &[("url", url.to_string()), ("error", err.to_string())],
                );
                return Err(err);
            }
        };

        let status = response.status;
        if status == 200 {
            self.emit(
                Level::DEBUG,
                "Request successful",
                &[("status", status.to_string()), ("url", url.to_string())],
            );
            return Ok(response.body);
        }

        if RATE_LIMIT_STATUSES.contains(&status) {
            self.emit(
                Level::WARN,
                "Ratelimit hit",
                &[("status", status.to_string()), ("url", url.to_string())],
            );
            return Err(SearchError::RateLimit(format!("{} {} Ratelimit", url, status)));
        }

        self.emit(
            Level::ERROR,
            "Unexpected status code",
            &[("status", status.to_string()), ("url", url.to_string())],
        );
        Err(SearchError::transport(format!(
            "{} returned unexpected status {}",
            url, status
        )))
    }
}
