//! Last.fm track search client
//!
//! Builds `track.search` requests and turns the JSON payload into
//! [`RemoteTrack`] values.

use crate::autocomplete::MIN_QUERY_LEN;
use crate::config::LastFmSettings;
use crate::error::{AutocompleteError, Result};
use crate::network::{HttpClient, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error};

/// A track match returned by the remote search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTrack {
    pub artist: String,
    pub name: String,
}

impl RemoteTrack {
    pub fn new(artist: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RemoteTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Artist: {} - Song: {}", self.artist, self.name)
    }
}

/// Last.fm API client
#[derive(Debug, Clone)]
pub struct LastFm {
    base_url: String,
    api_key: Option<String>,
    limit: Option<u32>,
}

impl LastFm {
    pub fn new(settings: &LastFmSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            limit: settings.limit,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the `track.search` request for `query`
    pub fn request(&self, query: &str) -> Result<HttpRequest> {
        if query.chars().count() < MIN_QUERY_LEN {
            return Err(AutocompleteError::remote_lookup(format!(
                "query must be at least {} characters long",
                MIN_QUERY_LEN
            )));
        }

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AutocompleteError::remote_lookup("Last.fm API key is not configured"))?;

        let mut request = HttpRequest::get(&self.base_url)
            .param("method", "track.search")
            .param("track", query)
            .param("api_key", api_key)
            .param("format", "json");

        if let Some(limit) = self.limit {
            request = request.param("limit", limit.to_string());
        }

        Ok(request)
    }

    /// Parse a `track.search` response
    pub fn response(&self, response: HttpResponse) -> Result<Vec<RemoteTrack>> {
        let json: serde_json::Value = serde_json::from_str(&response.text).or_else(|e| {
            if response.is_success() {
                Err(AutocompleteError::from(e))
            } else {
                Ok(serde_json::Value::Null)
            }
        })?;

        if !response.is_success() {
            let message = json
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("network response was not ok");
            return Err(AutocompleteError::remote_lookup(format!(
                "HTTP {}: {}",
                response.status, message
            )));
        }

        let matches = json
            .get("results")
            .and_then(|r| r.get("trackmatches"))
            .and_then(|t| t.get("track"))
            .ok_or_else(|| AutocompleteError::remote_lookup("invalid response structure from Last.fm"))?;

        let items = match matches {
            serde_json::Value::Array(items) => items.iter().collect::<Vec<_>>(),
            serde_json::Value::Object(_) => vec![matches],
            _ => {
                return Err(AutocompleteError::remote_lookup(
                    "invalid response structure from Last.fm",
                ))
            }
        };

        let tracks = items
            .into_iter()
            .filter_map(|item| {
                let artist = item.get("artist").and_then(artist_name)?;
                let name = item.get("name").and_then(|n| n.as_str())?;
                Some(RemoteTrack::new(artist, name))
            })
            .collect();

        Ok(tracks)
    }

    /// Search tracks matching `query`
    pub async fn search_tracks(&self, client: &HttpClient, query: &str) -> Result<Vec<RemoteTrack>> {
        let request = self.request(query)?;

        let response = client.execute(request).await.map_err(|e| {
            error!("Error fetching data from Last.fm: {}", e);
            AutocompleteError::remote_lookup(format!("failed to fetch tracks from Last.fm: {}", e))
        })?;

        let tracks = self.response(response)?;
        debug!("Last.fm returned {} track matches for '{}'", tracks.len(), query);

        Ok(tracks)
    }
}

/// Artist is a plain string in search results, an object elsewhere
fn artist_name(value: &serde_json::Value) -> Option<&str> {
    value
        .as_str()
        .or_else(|| value.get("name").and_then(|n| n.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base_url: &str) -> LastFmSettings {
        LastFmSettings {
            base_url: base_url.to_string(),
            api_key: Some("test-key".to_string()),
            limit: None,
        }
    }

    fn response(status: u16, text: &str) -> HttpResponse {
        HttpResponse {
            status,
            text: text.to_string(),
            url: "https://ws.audioscrobbler.com/2.0/".to_string(),
        }
    }

    #[test]
    fn test_display_format() {
        let track = RemoteTrack::new("The Beatles", "Yesterday");
        assert_eq!(track.to_string(), "Artist: The Beatles - Song: Yesterday");
    }

    #[test]
    fn test_request_shape() {
        let lastfm = LastFm::new(&settings("https://ws.audioscrobbler.com/2.0/"));
        let request = lastfm.request("believe").unwrap();

        assert_eq!(
            request.full_url().unwrap().as_str(),
            "https://ws.audioscrobbler.com/2.0/?method=track.search&track=believe&api_key=test-key&format=json"
        );
    }

    #[test]
    fn test_request_with_limit() {
        let mut config = settings("https://ws.audioscrobbler.com/2.0/");
        config.limit = Some(10);
        let request = LastFm::new(&config).request("believe").unwrap();
        assert_eq!(request.get_param("limit"), Some("10"));
    }

    #[test]
    fn test_request_rejects_short_query_and_missing_key() {
        let lastfm = LastFm::new(&settings("https://ws.audioscrobbler.com/2.0/"));
        assert_err!(lastfm.request("ab"));

        let keyless = LastFm::new(&LastFmSettings::default());
        assert!(!keyless.has_api_key());
        assert_eq!(
            keyless.request("believe").unwrap_err(),
            AutocompleteError::remote_lookup("Last.fm API key is not configured")
        );
    }

    #[test]
    fn test_response_parses_tracks() {
        let lastfm = LastFm::new(&settings("https://ws.audioscrobbler.com/2.0/"));
        let body = r#"{"results":{"trackmatches":{"track":[
            {"name":"Believe","artist":"Cher","listeners":"1"},
            {"name":"Believer","artist":"Imagine Dragons"}
        ]}}}"#;

        let tracks = assert_ok!(lastfm.response(response(200, body)));
        assert_eq!(
            tracks,
            vec![
                RemoteTrack::new("Cher", "Believe"),
                RemoteTrack::new("Imagine Dragons", "Believer"),
            ]
        );
    }

    #[test]
    fn test_response_accepts_single_track_object() {
        let lastfm = LastFm::new(&settings("https://ws.audioscrobbler.com/2.0/"));
        let body = r#"{"results":{"trackmatches":{"track":{"name":"Believe","artist":{"name":"Cher"}}}}}"#;

        let tracks = assert_ok!(lastfm.response(response(200, body)));
        assert_eq!(tracks, vec![RemoteTrack::new("Cher", "Believe")]);
    }

    #[test]
    fn test_response_errors() {
        let lastfm = LastFm::new(&settings("https://ws.audioscrobbler.com/2.0/"));

        let err = lastfm.response(response(200, r#"{"results":{}}"#)).unwrap_err();
        assert!(matches!(err, AutocompleteError::RemoteLookup(_)));

        let err = lastfm.response(response(200, "<html>")).unwrap_err();
        assert!(matches!(err, AutocompleteError::RemoteLookup(_)));

        let err = lastfm
            .response(response(403, r#"{"error":10,"message":"Invalid API key"}"#))
            .unwrap_err();
        assert_eq!(
            err,
            AutocompleteError::remote_lookup("HTTP 403: Invalid API key")
        );
    }

    #[tokio::test]
    async fn test_search_tracks_against_stub() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("method", "track.search"))
            .and(query_param("track", "test"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": {"trackmatches": {"track": [
                    {"artist": "Artist 1", "name": "Track 1"},
                    {"artist": "Artist 2", "name": "Track 2"}
                ]}}
            })))
            .mount(&server)
            .await;

        let lastfm = LastFm::new(&settings(&format!("{}/2.0/", server.uri())));
        let client = HttpClient::new().unwrap();
        let tracks = lastfm.search_tracks(&client, "test").await.unwrap();

        let display: Vec<String> = tracks.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            display,
            vec![
                "Artist: Artist 1 - Song: Track 1",
                "Artist: Artist 2 - Song: Track 2"
            ]
        );
    }

    #[tokio::test]
    async fn test_search_tracks_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let lastfm = LastFm::new(&settings(&format!("{}/2.0/", server.uri())));
        let client = HttpClient::new().unwrap();
        let err = lastfm.search_tracks(&client, "test").await.unwrap_err();

        assert_eq!(
            err,
            AutocompleteError::remote_lookup("HTTP 500: network response was not ok")
        );
    }
}
