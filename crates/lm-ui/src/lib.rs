//! # lm-ui
//!
//! Server-rendered pages. Askama escapes every interpolated value, so author
//! input can be passed through as-is.

pub mod share;

use askama::Template;
use lm_core::models::Post;

pub use share::{share_intent_url, share_text};

/// The board: creation form plus the newest-first listing.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub posts: &'a [Post],
    /// Earliest selectable event date (YYYY-MM-DD)
    pub today: String,
    pub error: Option<&'a str>,
}

/// Shown once after creation; the only place the delete key ever appears.
#[derive(Template)]
#[template(path = "created.html")]
pub struct CreatedTemplate<'a> {
    pub title: &'a str,
    pub post: &'a Post,
    pub delete_token: &'a str,
    /// Output of [`share_intent_url`]; percent-encoded, rendered unescaped
    pub share_url: &'a str,
}

/// Generic outcome page (deletion results, errors).
#[derive(Template)]
#[template(path = "notice.html")]
pub struct NoticeTemplate<'a> {
    pub title: &'a str,
    pub heading: &'a str,
    pub message: &'a str,
}
