//! livemate/crates/lm-core/src/lib.rs
//!
//! The central domain logic and interface definitions for LiveMate,
//! a bulletin board for finding concert companions.

pub mod error;
pub mod gate;
pub mod models;
pub mod service;
pub mod token;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use gate::{Decision, OwnershipGate};
pub use models::*;
pub use service::BoardService;
pub use token::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use super::token::Fingerprint;

    #[test]
    fn test_post_creation_v7() {
        let id = PostId::new_v7();
        let new = NewPost {
            title: "Winter Live".to_string(),
            date: "2026-12-24".to_string(),
            area: "Budokan".to_string(),
            comment: None,
            contact_handle: "@nagi".to_string(),
            fingerprint: Fingerprint::from_hex("00ff"),
        };
        let (post, fp) = new.into_post(id, chrono::Utc::now());
        assert_eq!(post.id, id);
        assert_eq!(fp.as_str(), "00ff");

        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("fingerprint").is_none());
        assert_eq!(json["id"], serde_json::json!(id.to_string()));
    }

    #[test]
    fn create_post_accepts_legacy_field_name() {
        let req: CreatePost = serde_json::from_str(
            r#"{"title":"t","date":"d","area":"a","xUsername":"nagi"}"#,
        )
        .unwrap();
        assert_eq!(req.contact_handle, "nagi");
        assert_eq!(req.comment, None);
    }

    #[test]
    fn post_id_parsing() {
        let id = PostId::new_v7();
        assert_eq!(format!(" {id} ").parse::<PostId>().unwrap(), id);
        assert!("42".parse::<PostId>().is_err());
    }
}
