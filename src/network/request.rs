//! Outgoing request and response types

use url::Url;

/// HTTP GET request description
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Base URL, without query string
    pub url: String,
    /// Query parameters, sent in insertion order
    pub params: Vec<(String, String)>,
}

impl HttpRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Look up a query parameter by name
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Full URL with the query string applied
    pub fn full_url(&self) -> anyhow::Result<Url> {
        Ok(Url::parse_with_params(&self.url, &self.params)?)
    }
}

/// HTTP response with the body read into memory
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl HttpResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.text)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
