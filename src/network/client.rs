//! HTTP client for remote suggestion sources

use super::request::{HttpRequest, HttpResponse};
use crate::config::OutgoingSettings;
use anyhow::Result;
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client wrapper with MusicMatch-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: format!("musicmatch-rs/{}", crate::VERSION),
        })
    }

    /// Execute a GET request
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.full_url()?;

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json,text/javascript,*/*;q=0.01")
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Parse response into HttpResponse
    async fn parse_response(response: Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let text = response.text().await?;

        Ok(HttpResponse {
            status,
            text,
            url,
        })
    }

    /// Current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_user_agent() -> String {
        format!("musicmatch-rs/{}", crate::VERSION)
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().user_agent(), client_user_agent());
    }

    #[tokio::test]
    async fn test_execute_sends_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2.0/"))
            .and(query_param("track", "yesterday"))
            .and(header("user-agent", client_user_agent().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request =
            HttpRequest::get(format!("{}/2.0/", server.uri())).param("track", "yesterday");
        let response = client.execute(request).await.unwrap();

        assert!(response.is_success());
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["ok"], true);
    }
}
