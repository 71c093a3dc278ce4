//! YouTube URL parsing
//!
//! Pure extraction of the 11-character video identifier from the URL
//! variants YouTube hands out: watch, youtu.be, embed, /v/, /e/, shorts.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Matches every supported URL shape and captures the 11-character id.
static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?|shorts)/|.*[?&]v=)|youtu\.be/)([^"&?/ ]{11})"#,
    )
    .expect("video id regex is valid")
});

/// The canonical 11-character token YouTube uses to address a video.
///
/// Only constructed through [`extract_video_id`], so it is never empty and
/// never contains URL delimiter characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video id from a raw URL string.
///
/// Returns `None` when the URL carries no recognizable id. That is an
/// expected outcome for arbitrary input, not an error.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_RE
        .captures(url)
        .map(|caps| VideoId(caps[1].to_string()))
}
