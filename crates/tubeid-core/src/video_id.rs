//! The `YouTube` video ID type.
//!
//! A video ID is exactly 11 characters drawn from `[A-Za-z0-9_-]`. There is no
//! checksum, so a well-formed ID says nothing about whether the video exists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Length of every `YouTube` video ID.
pub const VIDEO_ID_LEN: usize = 11;

/// Check whether `s` is a well-formed video ID.
///
/// This is the alphabet check applied to bare input and re-applied to every
/// candidate captured out of a URL.
#[must_use]
pub fn is_valid_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN && s.bytes().all(is_id_byte)
}

const fn is_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// A validated `YouTube` video ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Parse a bare video ID.
    ///
    /// Unlike extraction this does not look inside URLs.
    pub fn parse(s: &str) -> Result<Self> {
        if is_valid_video_id(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidVideoId(s.to_string()))
        }
    }

    /// Wrap a string the caller has already validated.
    pub(crate) fn from_validated(s: &str) -> Self {
        debug_assert!(is_valid_video_id(s));
        Self(s.to_string())
    }

    /// The ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the ID, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Canonical watch page URL.
    #[must_use]
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Embeddable player URL.
    #[must_use]
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.0)
    }

    /// Short share link.
    #[must_use]
    pub fn short_url(&self) -> String {
        format!("https://youtu.be/{}", self.0)
    }

    /// High-quality thumbnail URL (hqdefault).
    #[must_use]
    pub fn thumbnail_url(&self) -> String {
        // Quality options: default, mqdefault, hqdefault, sddefault, maxresdefault
        format!("https://img.youtube.com/vi/{}/hqdefault.jpg", self.0)
    }

    /// Highest-resolution thumbnail URL.
    ///
    /// Note: maxresdefault is not always available for all videos.
    #[must_use]
    pub fn thumbnail_url_maxres(&self) -> String {
        format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for VideoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for VideoId {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VideoId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        if is_valid_video_id(&s) {
            Ok(Self(s))
        } else {
            Err(Error::InvalidVideoId(s))
        }
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl PartialEq<str> for VideoId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for VideoId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert!(is_valid_video_id("dQw4w9WgXcQ"));
        assert!(is_valid_video_id("___________"));
        assert!(is_valid_video_id("-----------"));
        assert!(is_valid_video_id("A1b2C3d4E5f"));
    }

    #[test]
    fn test_invalid_ids() {
        assert!(!is_valid_video_id(""));
        assert!(!is_valid_video_id("dQw4w9WgXc"));
        assert!(!is_valid_video_id("dQw4w9WgXcQQ"));
        assert!(!is_valid_video_id("dQw4w9WgXc!"));
        assert!(!is_valid_video_id("dQw4w9WgX/Q"));
        assert!(!is_valid_video_id("dQw4w9WgX Q"));
    }

    #[test]
    fn test_non_ascii_rejected() {
        // 11 chars but more than 11 bytes
        assert!(!is_valid_video_id("dQw4w9WgXcé"));
        // 11 bytes but fewer chars
        assert!(!is_valid_video_id("dQw4w9WgXé"));
    }

    #[test]
    fn test_parse() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
        assert_eq!(id, "dQw4w9WgXcQ");

        let err = VideoId::parse("nope").unwrap_err();
        assert_eq!(err, Error::InvalidVideoId("nope".to_string()));
    }

    #[test]
    fn test_from_str_and_try_from() {
        let a: VideoId = "dQw4w9WgXcQ".parse().unwrap();
        let b = VideoId::try_from("dQw4w9WgXcQ".to_string()).unwrap();
        assert_eq!(a, b);
        assert!(VideoId::try_from("too-long-for-an-id").is_err());
    }

    #[test]
    fn test_display() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.to_string(), "dQw4w9WgXcQ");
        assert_eq!(String::from(id), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_urls() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.embed_url(), "https://www.youtube.com/embed/dQw4w9WgXcQ");
        assert_eq!(id.short_url(), "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(
            id.thumbnail_url(),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
        assert_eq!(
            id.thumbnail_url_maxres(),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
    }

    #[test]
    fn test_serde_validates_on_deserialize() {
        let id: VideoId = serde_json::from_str("\"dQw4w9WgXcQ\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"dQw4w9WgXcQ\"");

        let bad: std::result::Result<VideoId, _> = serde_json::from_str("\"dQw4w9WgXc\"");
        assert!(bad.is_err());
    }
}
