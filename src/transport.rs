//! Transport abstraction for issuing form requests.

use async_trait::async_trait;
use reqwest::Method;

use crate::Result;

/// Raw response from a transport: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Trait for sending a request and returning the raw response.
///
/// Implementations report connection faults and timeouts as errors and
/// return every HTTP status as a response; status interpretation happens
/// in the client. Identity, headers, proxy and timeout are fixed at
/// construction time.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `form` as an `application/x-www-form-urlencoded` body.
    async fn send(
        &self,
        method: Method,
        url: &str,
        form: &[(String, String)],
    ) -> Result<TransportResponse>;
}
