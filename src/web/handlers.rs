//! HTTP request handlers

use super::sessions::SessionController;
use super::state::AppState;
use crate::autocomplete::{fetch_suggestions, ControllerState, InputOutcome, ListEntry, SuggestionSource};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Context;
use uuid::Uuid;

/// Input-change event posted by the page
#[derive(Debug, Deserialize)]
pub struct InputEvent {
    pub value: String,
}

/// Click event posted by the page
#[derive(Debug, Deserialize)]
pub struct SelectEvent {
    pub index: usize,
}

/// Session snapshot returned after every event
#[derive(Debug, Serialize)]
pub struct SessionView {
    /// The event was superseded; the page keeps its current list
    pub stale: bool,
    pub state: ControllerState,
    pub input: String,
    /// Text written into the input by a selection
    pub selected: Option<String>,
    pub entries: Vec<ListEntry>,
    /// Rendered list items
    pub html: String,
}

/// Home page handler
pub async fn index(State(state): State<AppState>) -> Response {
    let source = state.backend.clone();
    render_view(&state, "index.html", source, Context::new()).await
}

/// Search page handler, bound to the local candidate set
pub async fn search(State(state): State<AppState>) -> Response {
    let mut ctx = Context::new();
    ctx.insert("candidate_count", &state.local.candidates().len());

    let source: Arc<dyn SuggestionSource> = state.local.clone();
    render_view(&state, "search.html", source, ctx).await
}

async fn render_view(
    state: &AppState,
    template: &str,
    source: Arc<dyn SuggestionSource>,
    mut ctx: Context,
) -> Response {
    let source_name = source.name().to_string();
    let session_id = state.sessions.create(source).await;

    ctx.insert("instance_name", state.instance_name());
    ctx.insert("session_id", &session_id.to_string());
    ctx.insert("source", &source_name);

    match state.templates.render_with_context(template, &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Input-change handler
pub async fn session_input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<InputEvent>,
) -> Response {
    let Some(controller) = state.sessions.get(&id).await else {
        return unknown_session(id);
    };

    let outcome = controller.on_input(&event.value).await;
    session_view(&state, &controller, outcome == InputOutcome::Stale, None)
}

/// Suggestion click handler
pub async fn session_select(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<SelectEvent>,
) -> Response {
    let Some(controller) = state.sessions.get(&id).await else {
        return unknown_session(id);
    };

    let selected = controller.select(event.index);
    session_view(&state, &controller, false, selected)
}

fn session_view(
    state: &AppState,
    controller: &SessionController,
    stale: bool,
    selected: Option<String>,
) -> Response {
    let entries = controller.entries();

    let mut ctx = Context::new();
    ctx.insert("entries", &entries);

    match state
        .templates
        .render_with_context("components/suggestions.html", &ctx)
    {
        Ok(html) => Json(SessionView {
            stale,
            state: controller.state(),
            input: controller.input_value(),
            selected,
            entries,
            html,
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

fn unknown_session(id: Uuid) -> Response {
    tracing::debug!("Unknown session {}", id);
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "unknown session" })),
    )
        .into_response()
}

/// Autocomplete handler
#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    pub q: String,
}

/// Stateless lookup in OpenSearch suggestion format: `[query, [suggestions]]`
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> impl IntoResponse {
    let suggestions = fetch_suggestions(state.backend.as_ref(), &params.q).await;
    Json((params.q, suggestions))
}

/// Replace the local candidate set
pub async fn candidates(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    match state.local.load_json(&body) {
        Ok(()) => {
            let count = state.local.candidates().len();
            tracing::info!("Loaded {} candidates", count);
            Json(serde_json::json!({ "count": count })).into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
