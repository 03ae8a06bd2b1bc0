//! "Post to X" intent links offered right after a listing is created.

use lm_core::models::Post;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const INTENT_URL: &str = "https://twitter.com/intent/tweet";

/// Same unreserved set as `application/x-www-form-urlencoded`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'*').remove(b'-').remove(b'.').remove(b'_');

/// Share text: header, event lines, optional comment, blank line, hashtag.
pub fn share_text(post: &Post) -> String {
    let mut lines = vec![
        "同行者募集🎤".to_string(),
        format!("【ライブ】{}", post.title),
        format!("【日程】{}", post.date),
        format!("【会場】{}", post.area),
    ];
    if let Some(comment) = post.comment.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        lines.push(format!("【ひとこと】{comment}"));
    }
    lines.push(String::new());
    lines.push("#推し活".to_string());
    lines.join("\n")
}

/// Intent URL carrying the share text and the board's public URL.
///
/// Every variable part is percent-encoded, so the result contains no HTML
/// metacharacters other than the `&` separating the two parameters.
pub fn share_intent_url(post: &Post, site_url: &str) -> String {
    format!(
        "{INTENT_URL}?text={}&url={}",
        utf8_percent_encode(&share_text(post), QUERY_VALUE),
        utf8_percent_encode(site_url, QUERY_VALUE),
    )
}
