//! Search client with backend fallback.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::Level;

use crate::config::ClientOptions;
use crate::driver::Driver;
use crate::engine::Engine;
use crate::engines::{HtmlEngine, LiteEngine};
use crate::identity::ClientIdentity;
use crate::observer::{SearchObserver, TracingObserver};
use crate::rate_limit::RateLimiter;
use crate::transport::Transport;
use crate::transport_http::HttpTransport;
use crate::{BackendKind, Result, SearchError, SearchQuery, SearchResult};

/// DuckDuckGo text search client.
///
/// Tries the requested backend (or every backend in random order for
/// [`crate::Backend::Auto`]) and returns the first successful result list.
///
/// The identity is fixed for the client's lifetime. Concurrent calls share
/// the rate limiter but keep their own pagination state.
pub struct Ddgs {
    transport: Arc<dyn Transport>,
    identity: ClientIdentity,
    rate_limiter: RateLimiter,
    observer: Arc<dyn SearchObserver>,
    rng: Mutex<StdRng>,
    html: HtmlEngine,
    lite: LiteEngine,
}

impl Ddgs {
    /// Creates a client with default options.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Creates a client with the given options.
    pub fn with_options(options: ClientOptions) -> Result<Self> {
        Self::builder().options(options).build()
    }

    /// Returns a builder for fine-grained construction.
    pub fn builder() -> DdgsBuilder {
        DdgsBuilder::default()
    }

    /// The identity presented by this client.
    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    fn emit(&self, level: Level, message: &str, fields: &[(&str, String)]) {
        self.observer.on_event(level, message, fields);
    }

    fn engine(&self, kind: BackendKind) -> &dyn Engine {
        match kind {
            BackendKind::Html => &self.html,
            BackendKind::Lite => &self.lite,
        }
    }

    fn backend_order(&self, query: &SearchQuery) -> Vec<BackendKind> {
        let mut backends = query.backend.candidates();
        if backends.len() > 1 {
            let mut rng = match self.rng.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            backends.shuffle(&mut *rng);
        }
        backends
    }

    /// Runs a text search.
    ///
    /// Fails with [`SearchError::Validation`] before any request when the
    /// keywords are blank, and with [`SearchError::AllBackendsFailed`] when
    /// no backend could be queried.
    pub async fn text(&self, query: SearchQuery) -> Result<Vec<SearchResult>> {
        self.emit(
            Level::INFO,
            "Starting text search",
            &[
                ("keywords", query.keywords.clone()),
                ("region", query.region.clone()),
                ("safesearch", format!("{:?}", query.safesearch)),
                ("time_limit", format!("{:?}", query.time_limit)),
                ("backend", format!("{:?}", query.backend)),
                ("max_results", format!("{:?}", query.max_results)),
            ],
        );

        if let Err(err) = query.validate() {
            self.emit(Level::ERROR, "Invalid query", &[("error", err.to_string())]);
            return Err(err);
        }

        let backends = self.backend_order(&query);
        self.emit(
            Level::DEBUG,
            "Selected backends",
            &[(
                "backends",
                backends
                    .iter()
                    .map(BackendKind::as_str)
                    .collect::<Vec<_>>()
                    .join(","),
            )],
        );

        let driver = Driver::new(
            self.transport.as_ref(),
            &self.rate_limiter,
            self.observer.as_ref(),
        );
        let mut last_error = None;

        for kind in backends {
            match driver.run(self.engine(kind), &query).await {
                Ok(results) => {
                    self.emit(
                        Level::INFO,
                        "Search completed successfully",
                        &[("backend", kind.to_string()), ("count", results.len().to_string())],
                    );
                    return Ok(results);
                }
                Err(err) => {
                    self.emit(
                        Level::ERROR,
                        &format!("Error searching using {} backend", kind),
                        &[("error", err.to_string())],
                    );
                    last_error = Some(err);
                }
            }
        }

        let err = SearchError::all_backends_failed(last_error);
        self.emit(Level::ERROR, "All backends failed", &[("error", err.to_string())]);
        Err(err)
    }
}

/// Builder for [`Ddgs`].
#[derive(Default)]
pub struct DdgsBuilder {
    options: ClientOptions,
    seed: Option<u64>,
    transport: Option<Arc<dyn Transport>>,
    observer: Option<Arc<dyn SearchObserver>>,
    rate_limiter: Option<RateLimiter>,
    html_endpoint: Option<String>,
    lite_endpoint: Option<String>,
}

impl DdgsBuilder {
    /// Sets the client options used for the HTTP transport.
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Seeds the random source for identity choice and backend order.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Uses a custom transport instead of the reqwest-based one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the event observer.
    pub fn observer(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Replaces the default rate limiter.
    pub fn rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    /// Overrides the html backend endpoint.
    pub fn html_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.html_endpoint = Some(endpoint.into());
        self
    }

    /// Overrides the lite backend endpoint.
    pub fn lite_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.lite_endpoint = Some(endpoint.into());
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Ddgs> {
        let observer = self
            .observer
            .unwrap_or_else(|| Arc::new(TracingObserver));
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        observer.on_event(
            Level::INFO,
            "Initializing client",
            &[
                ("proxy", self.options.proxy.clone().unwrap_or_default()),
                ("timeout_ms", self.options.timeout_ms.to_string()),
                ("verify", self.options.verify.to_string()),
            ],
        );

        let identity = ClientIdentity::random(&mut rng);
        observer.on_event(
            Level::DEBUG,
            "Selected identity",
            &[("identity", identity.name().to_string())],
        );

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.options, &identity)?),
        };

        let mut html = HtmlEngine::new();
        if let Some(endpoint) = self.html_endpoint {
            html = html.with_endpoint(endpoint);
        }
        let mut lite = LiteEngine::new();
        if let Some(endpoint) = self.lite_endpoint {
            lite = lite.with_endpoint(endpoint);
        }

        Ok(Ddgs {
            transport,
            identity,
            rate_limiter: self.rate_limiter.unwrap_or_default(),
            observer,
            rng: Mutex::new(rng),
            html,
            lite,
        })
    }
}
