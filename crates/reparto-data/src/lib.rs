//! HTTP client for the Reparto marketplace API.
//!
//! [`FetchClient`] is a small builder over reqwest with base-URL joining
//! and JSON helpers. [`MarketplaceApi`] is the typed
//! surface the views call; [`HttpMarketplaceApi`] implements it over a
//! `FetchClient`.
//!
//! # Example
//!
//! ```rust,no_run
//! use reparto_data::{ClientConfig, FetchClient, HttpMarketplaceApi, MarketplaceApi};
//! use reparto_commerce::NegocioId;
//!
//! # async fn demo() -> Result<(), reparto_data::FetchError> {
//! let client = FetchClient::new(ClientConfig::default())?
//!     .with_base_url("https://api.reparto.example");
//! let api = HttpMarketplaceApi::new(client);
//!
//! api.login("ana@example.com", "secreto").await?;
//! let productos = api.list_products(NegocioId::new(3)).await?;
//! println!("{} productos", productos.len());
//! # Ok(())
//! # }
//! ```

mod api;
mod error;
mod request;
mod response;

pub use api::{paths, HttpMarketplaceApi, MarketplaceApi};
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

use std::time::Duration;

/// Transport settings for [`FetchClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout for establishing a connection.
    pub connect_timeout: Duration,
    /// Timeout for the whole request.
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(20),
            user_agent: concat!("reparto/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP client for outbound API requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl FetchClient {
    /// Build a client with the given transport settings.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url: None,
        })
    }

    /// Prepend `base_url` to every relative request path.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    pub fn patch(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Patch, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let full_url = self.resolve(url.into());
        ClientRequestBuilder {
            http: self.http.clone(),
            builder: RequestBuilder::new(method, full_url),
        }
    }

    fn resolve(&self, url: String) -> String {
        match &self.base_url {
            Some(_) if url.starts_with("http://") || url.starts_with("https://") => url,
            Some(base) => {
                let base = base.trim_end_matches('/');
                if url.starts_with('/') {
                    format!("{}{}", base, url)
                } else {
                    format!("{}/{}", base, url)
                }
            }
            None => url,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// The request as it would be sent.
    pub fn build(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and read the whole response.
    ///
    /// Non-2xx statuses are returned as a `Response`; call
    /// [`Response::error_for_status`] to turn them into errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = self.builder;

        let mut request = self.http.request(method.into(), &url);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        tracing::debug!(method = method.as_str(), %url, "sending request");
        let response = request.send().await?;
        let response = Response::read(response).await?;
        tracing::debug!(method = method.as_str(), %url, status = response.status, "response received");

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> FetchClient {
        FetchClient::new(ClientConfig::default())
            .unwrap()
            .with_base_url(base)
    }

    #[test]
    fn test_base_url_joining() {
        let c = client("https://api.example.com/v1/");
        assert_eq!(c.get("/pedidos").build().url(), "https://api.example.com/v1/pedidos");
        assert_eq!(c.get("pedidos").build().url(), "https://api.example.com/v1/pedidos");
    }

    #[test]
    fn test_absolute_url_bypasses_base() {
        let c = client("https://api.example.com");
        assert_eq!(
            c.get("https://cdn.example.com/img.png").build().url(),
            "https://cdn.example.com/img.png"
        );
    }

    #[test]
    fn test_request_headers_and_method() {
        let c = client("https://api.example.com");
        let req = c.patch("/pedidos/7/estado").bearer_auth("tok");
        assert_eq!(
            req.build().headers.get("Authorization").map(String::as_str),
            Some("Bearer tok")
        );
        assert_eq!(req.build().method(), Method::Patch);
    }
}
