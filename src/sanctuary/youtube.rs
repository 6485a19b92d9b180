//! YouTube URL recognition.
//!
//! Accepted shapes, each with an optional scheme and `www.`:
//!
//! | Shape | Example |
//! |-------|---------|
//! | watch | `youtube.com/watch?v=<id>&...` |
//! | short | `youtu.be/<id>?...` |
//! | embed | `youtube.com/embed/<id>?...` |
//! | share | `youtube.com/v/<id>?...` |
//!
//! A video id is exactly 11 characters from `[A-Za-z0-9_-]`.

use crate::error::{Result, SanctuaryError};
use once_cell::sync::Lazy;
use regex::Regex;

const PATTERNS: [&str; 4] = [
    r"^(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})(?:&.*)?$",
    r"^(?:https?://)?(?:www\.)?youtu\.be/([a-zA-Z0-9_-]{11})(?:\?.*)?$",
    r"^(?:https?://)?(?:www\.)?youtube\.com/embed/([a-zA-Z0-9_-]{11})(?:\?.*)?$",
    r"^(?:https?://)?(?:www\.)?youtube\.com/v/([a-zA-Z0-9_-]{11})(?:\?.*)?$",
];

static URL_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| PATTERNS.iter().filter_map(|p| Regex::new(p).ok()).collect());

/// Returns the video id in `url`.
///
/// Fails with `EmptyUrl` for an empty string and `InvalidUrl` for anything
/// that matches none of the accepted shapes.
pub fn extract_video_id(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(SanctuaryError::EmptyUrl);
    }
    URL_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| SanctuaryError::InvalidUrl(url.to_string()))
}

pub fn is_youtube_url(url: &str) -> bool {
    extract_video_id(url).is_ok()
}
