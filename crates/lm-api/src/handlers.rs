//! # lm-api JSON Handlers
//!
//! This module coordinates the flow between HTTP requests and the core service.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use lm_core::models::{CreatePost, Post};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::AppState;

#[derive(Serialize)]
pub struct PostListResponse {
    pub ok: bool,
    pub posts: Vec<Post>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse<'a> {
    pub ok: bool,
    pub post: &'a Post,
    /// The plaintext delete secret; never returned again
    pub delete_token: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    #[serde(default, alias = "delete_token")]
    pub delete_token: String,
}

/// `GET /api/posts`, newest first.
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<PostListResponse>, ApiError> {
    let posts = state.service.list_posts().await?;
    Ok(Json(PostListResponse { ok: true, posts }))
}

/// `GET /api/posts/{id}`
pub async fn get_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = raw_id
        .parse()
        .map_err(|_| lm_core::AppError::NotFound(raw_id.clone()))?;
    let post = state.service.get_post(id).await?;
    Ok(Json(json!({ "ok": true, "post": post })))
}

/// `POST /api/posts`
pub async fn create_post(
    State(state): State<AppState>,
    body: Result<Json<CreatePost>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(input) = body?;
    let created = state.service.create_post(input).await?;
    state.metrics.record_create();

    let body = CreatedResponse {
        ok: true,
        post: &created.post,
        delete_token: created.delete_secret.expose_secret(),
    };
    Ok((
        StatusCode::CREATED,
        [(header::CACHE_CONTROL, "no-store")],
        Json(body),
    )
        .into_response())
}

/// `DELETE /api/posts/{id}` with `{ "deleteToken": ... }`.
///
/// A missing or unreadable body counts as a blank token.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    let request: DeleteRequest = serde_json::from_slice(&body).unwrap_or_default();

    let result = state.service.delete_post(&raw_id, &request.delete_token).await;
    state.metrics.record_delete(&result);
    result?;

    Ok(Json(json!({ "ok": true })))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// `GET /metrics`
pub async fn metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let text = state
        .metrics
        .render()
        .map_err(lm_core::AppError::internal)?;
    Ok((
        [(
            header::CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        text,
    )
        .into_response())
}
