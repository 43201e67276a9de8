//! # ddgs
//!
//! A DuckDuckGo text search client that scrapes the html and lite
//! endpoints.
//!
//! - Backend fallback: `auto` tries both backends in random order
//! - Pagination bounded by `max_results` and a fixed page ceiling
//! - Ad and redirect filtering, href deduplication
//! - Fixed inter-request delay for requests in quick succession
//!
//! ## Example
//!
//! ```rust,no_run
//! use ddgs::{Ddgs, SearchQuery, TimeLimit};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ddgs = Ddgs::new()?;
//!
//!     let query = SearchQuery::new("rust programming")
//!         .with_time_limit(TimeLimit::Month)
//!         .with_max_results(20);
//!
//!     for result in ddgs.text(query).await? {
//!         println!("{}: {}", result.title, result.href);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod driver;
mod engine;
mod error;
mod identity;
mod normalize;
mod observer;
mod payload;
mod query;
mod rate_limit;
mod result;
mod transport;
mod transport_http;

#[cfg(test)]
mod mock;

pub mod engines;

pub use client::{Ddgs, DdgsBuilder};
pub use config::ClientOptions;
pub use driver::MAX_PAGES;
pub use engine::{Candidate, Engine};
pub use error::{ErrorKind, Result, SearchError};
pub use identity::{ClientIdentity, IDENTITIES};
pub use normalize::{normalize_text, normalize_url};
pub use observer::{NoopObserver, SearchObserver, TracingObserver};
pub use payload::FormPayload;
pub use query::{Backend, BackendKind, SafeSearch, SearchQuery, TimeLimit, DEFAULT_REGION};
pub use rate_limit::RateLimiter;
pub use result::SearchResult;
pub use transport::{Transport, TransportResponse};
pub use transport_http::HttpTransport;
