//! # HTML pages
//!
//! Form-driven counterpart of the JSON API, rendered with `lm-ui` templates.

use askama::Template;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use chrono::Utc;
use lm_core::models::CreatePost;
use lm_core::AppError;
use lm_ui::{share_intent_url, CreatedTemplate, IndexTemplate, NoticeTemplate};
use serde::Deserialize;

use crate::AppState;

const SITE_TITLE: &str = "ライブ同行掲示板";

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub delete_token: String,
}

fn render(template: &impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "template rendering failed").into_response()
        }
    }
}

fn notice(status: StatusCode, heading: &str, message: &str) -> Response {
    let page = NoticeTemplate { title: SITE_TITLE, heading, message };
    (status, render(&page)).into_response()
}

fn unreadable_form(rejection: FormRejection) -> Response {
    tracing::debug!(error = %rejection, "form rejected");
    notice(StatusCode::BAD_REQUEST, "エラー", "フォームの内容を読み取れませんでした")
}

async fn board(state: &AppState, status: StatusCode, error: Option<&str>) -> Response {
    let posts = match state.service.list_posts().await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!(error = %e, "listing failed");
            return notice(StatusCode::INTERNAL_SERVER_ERROR, "エラー", "読み込みに失敗しました");
        }
    };
    let page = IndexTemplate {
        title: SITE_TITLE,
        posts: &posts,
        today: Utc::now().format("%Y-%m-%d").to_string(),
        error,
    };
    (status, render(&page)).into_response()
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Response {
    board(&state, StatusCode::OK, None).await
}

/// `POST /posts` (form-encoded)
pub async fn create_post(
    State(state): State<AppState>,
    input: Result<Form<CreatePost>, FormRejection>,
) -> Response {
    let Form(input) = match input {
        Ok(form) => form,
        Err(rejection) => return unreadable_form(rejection),
    };
    match state.service.create_post(input).await {
        Ok(created) => {
            state.metrics.record_create();
            let share_url = share_intent_url(&created.post, &state.site_url);
            let page = CreatedTemplate {
                title: SITE_TITLE,
                post: &created.post,
                delete_token: created.delete_secret.expose_secret(),
                share_url: &share_url,
            };
            ([(header::CACHE_CONTROL, "no-store")], render(&page)).into_response()
        }
        Err(AppError::RequiredFieldsMissing) => {
            board(
                &state,
                StatusCode::BAD_REQUEST,
                Some("ライブ名・日付・会場・Xユーザ名は必須です！"),
            )
            .await
        }
        Err(e) => {
            tracing::error!(error = %e, "post creation failed");
            notice(StatusCode::INTERNAL_SERVER_ERROR, "エラー", "投稿に失敗しました")
        }
    }
}

/// `POST /posts/{id}/delete` (form-encoded `delete_token`)
pub async fn delete_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    form: Result<Form<DeleteForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return unreadable_form(rejection),
    };
    let result = state.service.delete_post(&raw_id, &form.delete_token).await;
    state.metrics.record_delete(&result);

    match result {
        Ok(()) => notice(StatusCode::OK, "削除しました", "投稿を削除しました。"),
        Err(AppError::MissingCredential) => {
            notice(StatusCode::BAD_REQUEST, "削除できません", "削除キーを入力してください。")
        }
        Err(AppError::NotFound(_)) => {
            notice(StatusCode::NOT_FOUND, "削除できません", "投稿が見つかりません。")
        }
        Err(AppError::InvalidCredential) => {
            notice(StatusCode::FORBIDDEN, "削除できません", "削除キーが違います")
        }
        Err(e) => {
            tracing::error!(error = %e, "post deletion failed");
            notice(StatusCode::INTERNAL_SERVER_ERROR, "エラー", "削除に失敗しました")
        }
    }
}
