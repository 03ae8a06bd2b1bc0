//! # lm-api
//!
//! The web routing and orchestration layer for LiveMate.

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod pages;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use lm_core::BoardService;

pub use error::ApiError;
pub use metrics::Metrics;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BoardService>,
    pub metrics: Arc<Metrics>,
    /// Public URL of the board, attached to share links
    pub site_url: Arc<str>,
}

/// Used until the binary supplies the configured public URL.
pub const DEFAULT_SITE_URL: &str = "http://127.0.0.1:8080/";

impl AppState {
    pub fn new(service: BoardService) -> Self {
        Self {
            service: Arc::new(service),
            metrics: Arc::new(Metrics::new()),
            site_url: Arc::from(DEFAULT_SITE_URL),
        }
    }

    pub fn with_site_url(mut self, site_url: &str) -> Self {
        self.site_url = Arc::from(site_url);
        self
    }
}

/// HTTP-level knobs supplied by the binary.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    pub body_limit_bytes: usize,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self { allowed_origins: Vec::new(), body_limit_bytes: 16 * 1024 }
    }
}

/// Configures the routes for the board.
pub fn router(state: AppState, options: &HttpOptions) -> Router {
    let routes = Router::new()
        // HTML board
        .route("/", get(pages::index))
        .route("/posts", post(pages::create_post))
        .route("/posts/{id}/delete", post(pages::delete_post))
        // JSON API
        .route("/api/posts", get(handlers::list_posts).post(handlers::create_post))
        .route("/api/posts/{id}", get(handlers::get_post).delete(handlers::delete_post))
        // Operations
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(DefaultBodyLimit::max(options.body_limit_bytes))
        .with_state(state);

    middleware::standard_middleware(routes, &options.allowed_origins)
}
