//! HTTP transport using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{redirect, Client, Method, Proxy};

use crate::config::ClientOptions;
use crate::identity::ClientIdentity;
use crate::transport::{Transport, TransportResponse};
use crate::{Result, SearchError};

/// Browser-like headers sent with every request, to get past CAPTCHA gates.
const DEFAULT_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
    ),
    ("Accept-Language", "en-GB,en-US;q=0.9,en;q=0.8"),
    ("Cache-Control", "max-age=0"),
    (
        "Sec-Ch-Ua",
        r#""Google Chrome";v="131", "Chromium";v="131", "Not_A Brand";v="24""#,
    ),
    ("Sec-Ch-Ua-Mobile", "?0"),
    ("Sec-Ch-Ua-Platform", r#""Linux""#),
    ("Sec-Fetch-Dest", "document"),
    ("Sec-Fetch-Mode", "navigate"),
    ("Sec-Fetch-Site", "same-origin"),
    ("Sec-Fetch-User", "?1"),
    ("Referer", "https://duckduckgo.com/"),
];

/// A transport that issues real HTTP requests via reqwest.
///
/// Redirects are not followed so that a 301 reaches the status check.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport from client options and a fixed identity.
    pub fn new(options: &ClientOptions, identity: &ClientIdentity) -> Result<Self> {
        options.validate()?;

        let mut builder = Client::builder()
            .default_headers(build_headers(options, identity)?)
            .timeout(Duration::from_millis(options.timeout_ms))
            .redirect(redirect::Policy::none())
            .danger_accept_invalid_certs(!options.verify);

        if let Some(proxy_url) = &options.proxy {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| SearchError::Config(format!("Failed to create proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| SearchError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

fn build_headers(options: &ClientOptions, identity: &ClientIdentity) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let defaults = DEFAULT_HEADERS.iter().map(|(k, v)| (*k, *v));
    let custom = options.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()));

    for (name, value) in defaults.chain(custom) {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SearchError::Config(format!("invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| SearchError::Config(format!("invalid value for header '{}': {}", name, e)))?;
        headers.insert(name, value);
    }

    if !headers.contains_key(USER_AGENT) {
        let value = HeaderValue::from_str(identity.user_agent())
            .map_err(|e| SearchError::Config(format!("invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, value);
    }

    Ok(headers)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        form: &[(String, String)],
    ) -> Result<TransportResponse> {
        let response = self.client.request(method, url).form(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ClientIdentity {
        ClientIdentity::from_name("firefox_133")
    }

    #[test]
    fn test_http_transport_new() {
        let transport = HttpTransport::new(&ClientOptions::default(), &identity());
        assert!(transport.is_ok());
    }

    #[test]
    fn test_http_transport_with_proxy() {
        let options = ClientOptions::new().with_proxy("http://127.0.0.1:8080");
        assert!(HttpTransport::new(&options, &identity()).is_ok());
    }

    #[test]
    fn test_http_transport_rejects_bad_proxy() {
        let options = ClientOptions::new().with_proxy("gopher://127.0.0.1:70");
        let err = HttpTransport::new(&options, &identity()).err().unwrap();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn test_http_transport_insecure() {
        let options = ClientOptions::new().with_verify(false);
        assert!(HttpTransport::new(&options, &identity()).is_ok());
    }

    #[test]
    fn test_build_headers_uses_identity_user_agent() {
        let headers = build_headers(&ClientOptions::default(), &identity()).unwrap();
        let ua = headers.get(USER_AGENT).unwrap().to_str().unwrap();
        assert!(ua.contains("Firefox/133.0"));
        assert_eq!(
            headers.get("referer").unwrap().to_str().unwrap(),
            "https://duckduckgo.com/"
        );
    }

    #[test]
    fn test_build_headers_custom_overrides_default() {
        let options = ClientOptions::new()
            .with_header("Accept-Language", "de-DE")
            .with_header("User-Agent", "custom/1.0");
        let headers = build_headers(&options, &identity()).unwrap();
        assert_eq!(headers.get("accept-language").unwrap(), "de-DE");
        assert_eq!(headers.get(USER_AGENT).unwrap(), "custom/1.0");
    }

    #[test]
    fn test_build_headers_rejects_invalid_name() {
        let options = ClientOptions::new().with_header("bad header", "x");
        assert!(matches!(
            build_headers(&options, &identity()),
            Err(SearchError::Config(_))
        ));
    }
}
