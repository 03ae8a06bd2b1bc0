//! # lm-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational model
//! and the `lm-core` domain models.

use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lm_core::models::{NewPost, Post, PostId};
use lm_core::token::Fingerprint;
use lm_core::traits::PostStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    seq              INTEGER PRIMARY KEY AUTOINCREMENT,
    id               BLOB    NOT NULL UNIQUE,
    title            TEXT    NOT NULL,
    date             TEXT    NOT NULL,
    area             TEXT    NOT NULL,
    comment          TEXT,
    contact_handle   TEXT    NOT NULL,
    created_at       INTEGER NOT NULL,
    delete_token_hash TEXT   NOT NULL
);
CREATE INDEX IF NOT EXISTS posts_created_at ON posts (created_at DESC, seq DESC);
"#;

pub struct SqlitePostStore {
    pool: SqlitePool,
}

// Helper for UUID conversion
fn uuid_to_blob(id: PostId) -> Vec<u8> {
    id.0.as_bytes().to_vec()
}

fn blob_to_id(blob: &[u8]) -> anyhow::Result<PostId> {
    Ok(PostId(Uuid::from_slice(blob).context("malformed post id in database")?))
}

fn row_to_post(row: &SqliteRow) -> anyhow::Result<Post> {
    let micros: i64 = row.try_get("created_at")?;
    Ok(Post {
        id: blob_to_id(row.try_get::<Vec<u8>, _>("id")?.as_slice())?,
        title: row.try_get("title")?,
        date: row.try_get("date")?,
        area: row.try_get("area")?,
        comment: row.try_get("comment")?,
        contact_handle: row.try_get("contact_handle")?,
        created_at: DateTime::<Utc>::from_timestamp_micros(micros)
            .context("created_at out of range")?,
    })
}

impl SqlitePostStore {
    /// Opens (creating if needed) the database at `url` and applies the schema.
    ///
    /// `sqlite::memory:` gives every pooled connection its own database, so
    /// in-memory URLs are pinned to one connection that is never recycled.
    pub async fn new(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid sqlite url {url:?}"))?
            .create_if_missing(true);

        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .context("failed to open sqlite database")?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await.context("failed to apply schema")?;
        tracing::info!("sqlite post store ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl PostStore for SqlitePostStore {
    /// Single INSERT, so the post and its fingerprint land together or not at all.
    async fn insert(&self, post: NewPost) -> anyhow::Result<Post> {
        let id = PostId::new_v7();
        let (post, fingerprint) = post.into_post(id, Utc::now());

        sqlx::query(
            "INSERT INTO posts (id, title, date, area, comment, contact_handle, created_at, delete_token_hash) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(post.id))
        .bind(&post.title)
        .bind(&post.date)
        .bind(&post.area)
        .bind(&post.comment)
        .bind(&post.contact_handle)
        .bind(post.created_at.timestamp_micros())
        .bind(fingerprint.as_str())
        .execute(&self.pool)
        .await?;

        // Round-trip through the stored precision so callers see what readers will.
        let created_at = DateTime::<Utc>::from_timestamp_micros(post.created_at.timestamp_micros())
            .unwrap_or(post.created_at);
        Ok(Post { created_at, ..post })
    }

    async fn list_recent(&self) -> anyhow::Result<Vec<Post>> {
        // `delete_token_hash` is only ever read by `get_fingerprint`.
        let rows = sqlx::query(
            "SELECT id, title, date, area, comment, contact_handle, created_at \
             FROM posts ORDER BY created_at DESC, seq DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_post).collect()
    }

    async fn get(&self, id: PostId) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query(
            "SELECT id, title, date, area, comment, contact_handle, created_at \
             FROM posts WHERE id = ?",
        )
        .bind(uuid_to_blob(id))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_post).transpose()
    }

    async fn get_fingerprint(&self, id: PostId) -> anyhow::Result<Option<Fingerprint>> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT delete_token_hash FROM posts WHERE id = ?")
                .bind(uuid_to_blob(id))
                .fetch_optional(&self.pool)
                .await?;

        Ok(hash.map(Fingerprint::from_hex))
    }

    async fn delete_by_id(&self, id: PostId) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
