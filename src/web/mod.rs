//! Web server module
//!
//! Serves the home and search views and routes browser events to
//! per-session autocomplete controllers.

mod handlers;
mod routes;
mod sessions;
mod state;
mod templates;

pub use routes::create_router;
pub use sessions::{SessionController, SessionStore};
pub use state::AppState;
pub use templates::Templates;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::network::HttpClient;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn local_state() -> AppState {
        let mut settings = Settings::default();
        settings.autocomplete.backend = "local".to_string();
        AppState::new(settings, HttpClient::new().unwrap()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_home_page_opens_session() {
        let state = local_state();
        let app = create_router(state.clone());

        let (status, body) = send(app, Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("data-session="));
        assert!(body.contains(r#"data-source="local""#));
    }

    #[tokio::test]
    async fn test_search_page() {
        let app = create_router(local_state());
        let (status, body) = send(app, Request::get("/search").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("5 candidates loaded"));
    }

    #[tokio::test]
    async fn test_session_input_and_select() {
        let state = local_state();
        let id = state.sessions.create(state.local.clone()).await;

        let (status, body) = send(
            create_router(state.clone()),
            post_json(&format!("/session/{}/input", id), json!({ "value": "App" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let view: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(view["stale"], false);
        assert_eq!(view["state"], "displaying");
        assert_eq!(view["entries"][0]["text"], "apple");
        assert_eq!(view["entries"][1]["text"], "pineapple");
        assert!(view["html"]
            .as_str()
            .unwrap()
            .contains(r#"<li data-index="0">apple</li>"#));

        let (status, body) = send(
            create_router(state.clone()),
            post_json(&format!("/session/{}/select", id), json!({ "index": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let view: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(view["selected"], "pineapple");
        assert_eq!(view["input"], "pineapple");
        assert_eq!(view["state"], "idle");
        assert_eq!(view["entries"], json!([]));
    }

    #[tokio::test]
    async fn test_session_no_matches() {
        let state = local_state();
        let id = state.sessions.create(state.local.clone()).await;

        let (_, body) = send(
            create_router(state),
            post_json(&format!("/session/{}/input", id), json!({ "value": "kiwi" })),
        )
        .await;

        let view: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(view["entries"], json!([{ "text": "No matches found", "selectable": false }]));
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let app = create_router(local_state());
        let (status, _) = send(
            app,
            post_json(
                &format!("/session/{}/input", uuid::Uuid::new_v4()),
                json!({ "value": "abc" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_autocomplete_endpoint() {
        let app = create_router(local_state());

        let (status, body) = send(
            app.clone(),
            Request::get("/autocomplete?q=ang").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!(["ang", ["mango", "orange"]])
        );

        let (_, body) = send(app, Request::get("/autocomplete?q=an").body(Body::empty()).unwrap()).await;
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!(["an", []]));
    }

    #[tokio::test]
    async fn test_candidates_endpoint() {
        let state = local_state();

        let (status, body) = send(
            create_router(state.clone()),
            post_json("/candidates", json!(["Rock", "ROCK", "Jazz"])),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "count": 2 }));

        let (status, _) = send(
            create_router(state.clone()),
            post_json("/candidates", json!({ "items": ["Blues"] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.local.candidates(), vec!["rock", "jazz"]);
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(local_state());
        let (status, body) = send(app, Request::get("/health").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let mut settings = Settings::default();
        settings.autocomplete.backend = "altavista".to_string();
        assert!(AppState::new(settings, HttpClient::new().unwrap()).is_err());
    }
}
