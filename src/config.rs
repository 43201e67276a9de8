//! Client construction options.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Options for building a [`crate::Ddgs`] client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Extra request headers, applied on top of the built-in set.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Upstream proxy URL (`http://`, `https://` or `socks5://`).
    #[serde(default)]
    pub proxy: Option<String>,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Whether TLS certificates are validated.
    #[serde(default = "default_verify")]
    pub verify: bool,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_verify() -> bool {
    true
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            headers: BTreeMap::new(),
            proxy: None,
            timeout_ms: default_timeout_ms(),
            verify: default_verify(),
        }
    }
}

impl ClientOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Routes requests through a proxy.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Sets the per-request timeout in milliseconds.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Enables or disables TLS certificate validation.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Checks the proxy URL scheme and host.
    pub fn validate(&self) -> Result<()> {
        if let Some(proxy) = &self.proxy {
            let url = url::Url::parse(proxy)
                .map_err(|e| SearchError::Config(format!("invalid proxy URL '{}': {}", proxy, e)))?;
            match url.scheme() {
                "http" | "https" | "socks5" | "socks5h" => {}
                scheme => {
                    return Err(SearchError::Config(format!(
                        "unsupported proxy protocol: {}",
                        scheme
                    )))
                }
            }
            if url.host_str().is_none() {
                return Err(SearchError::Config(format!("missing proxy host: {}", proxy)));
            }
        }
        if self.timeout_ms == 0 {
            return Err(SearchError::Config("timeout must be non-zero".into()));
        }
        Ok(())
    }
}
