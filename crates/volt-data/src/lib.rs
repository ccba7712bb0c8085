//! Outbound HTTP client utilities for VoltCart.
//!
//! Provides a simple, ergonomic API for making HTTP requests from Spin WASM
//! applications with automatic JSON handling. On native targets `send`
//! resolves to an inert success response so client code can be exercised in
//! tests without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use volt_data::ApiClient;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct CartUpload {
//!     total: i64,
//!     products: String,
//! }
//!
//! let client = ApiClient::new().with_base_url("https://api.example.com");
//!
//! // POST with JSON body; non-2xx statuses become errors
//! client
//!     .post("/carts")
//!     .json(&upload)?
//!     .send()
//!     .await?
//!     .error_for_status()?;
//! ```

mod error;
mod request;
mod response;

pub use error::ApiError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

use std::collections::HashMap;

/// HTTP client for making outbound requests.
///
/// A lightweight wrapper around Spin's HTTP client that provides a
/// convenient builder API for constructing and sending requests.
pub struct ApiClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Put, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder { builder }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Set the request body as a string.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.builder = self.builder.text(text);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, ApiError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Send the request and return the response.
    #[cfg(target_arch = "wasm32")]
    pub async fn send(self) -> Result<Response, ApiError> {
        use spin_sdk::http::{Method as SpinMethod, Request};

        let method = match self.builder.method {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
            Method::Put => SpinMethod::Put,
            Method::Delete => SpinMethod::Delete,
        };

        let mut request = Request::builder();
        request.method(method);
        request.uri(&self.builder.url);

        for (key, value) in &self.builder.headers {
            request.header(key.as_str(), value.as_str());
        }

        let request = if let Some(body) = self.builder.body {
            request
                .body(body)
                .map_err(|e| ApiError::RequestError(e.to_string()))?
        } else {
            request.build()
        };

        let response: spin_sdk::http::Response = spin_sdk::http::send(request)
            .await
            .map_err(|e| ApiError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.into_body();

        Ok(Response::new(status, headers, body))
    }

    /// Send the request and return the response (non-WASM stub).
    ///
    /// Returns an empty success response for native builds (testing and
    /// development).
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn send(self) -> Result<Response, ApiError> {
        Ok(Response::new(200, HashMap::new(), Vec::new()))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ApiError, Method, Response};
}
