//! URL shapes recognized on the canonical `YouTube` domain.
//!
//! The table is a fixed, priority-ordered array of [`UrlPattern`] tags. Each tag
//! owns one compiled regex whose first capture group is the candidate ID.
//! Regexes compile once on first use and are read-only afterwards.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::video_id::is_valid_video_id;

/// Capture group for an ID-shaped run of characters.
macro_rules! id_pattern {
    ($prefix:literal) => {
        concat!($prefix, r"([a-zA-Z0-9_-]{11})")
    };
}

// The patterns are compile-time constants; failing here is a programmer error.
#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in URL pattern must compile")
}

/// `http(s)://` followed by the short-link host.
static SHORT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(id_pattern!(r"^https?://youtu\.be/")));

/// `http(s)://`, optional `www.`, a video-site host, then a path separator.
static CANONICAL_HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^https?://(?:www\.)?(?:youtube\.com|youtu\.be)/"));

static WATCH_RE: LazyLock<Regex> = LazyLock::new(|| compile(id_pattern!(r"watch\?v=")));
static EMBED_RE: LazyLock<Regex> = LazyLock::new(|| compile(id_pattern!(r"embed/")));
static LEGACY_V_RE: LazyLock<Regex> = LazyLock::new(|| compile(id_pattern!(r"v/")));
/// The gap before `v=` stops at line terminators, including U+2028 and U+2029.
static PLAYLIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(id_pattern!(r"playlist\?[^\n\r\x{2028}\x{2029}]*v="))
});

/// A path or query shape that carries a video ID on the canonical domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlPattern {
    /// `watch?v=<id>`
    Watch,
    /// `embed/<id>`
    Embed,
    /// Legacy `v/<id>`
    LegacyV,
    /// `playlist?...v=<id>`
    Playlist,
}

impl UrlPattern {
    /// Every pattern, in the order they are tried.
    pub const ALL: [Self; 4] = [Self::Watch, Self::Embed, Self::LegacyV, Self::Playlist];

    fn regex(self) -> &'static Regex {
        match self {
            Self::Watch => &WATCH_RE,
            Self::Embed => &EMBED_RE,
            Self::LegacyV => &LEGACY_V_RE,
            Self::Playlist => &PLAYLIST_RE,
        }
    }

    /// Short lowercase name, as used in serialized output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Watch => "watch",
            Self::Embed => "embed",
            Self::LegacyV => "legacy_v",
            Self::Playlist => "playlist",
        }
    }

    /// Search `url` for this shape and return the validated ID slice.
    ///
    /// The search is unanchored: the shape may appear anywhere in the input.
    #[must_use]
    pub fn capture(self, url: &str) -> Option<&str> {
        capture_id(self.regex(), url)
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn capture_id<'a>(re: &Regex, haystack: &'a str) -> Option<&'a str> {
    let candidate = re.captures(haystack)?.get(1)?.as_str();
    // The capture class already limits characters; re-check anyway.
    is_valid_video_id(candidate).then_some(candidate)
}

/// Extract the ID from a short link (`http(s)://youtu.be/<id>`).
///
/// Anything after the 11 ID characters (query string, fragment) is ignored.
#[must_use]
pub fn capture_short_link(url: &str) -> Option<&str> {
    capture_id(&SHORT_LINK_RE, url)
}

/// Whether `url` starts with a scheme and a recognized video-site host.
#[must_use]
pub fn is_canonical_host(url: &str) -> bool {
    CANONICAL_HOST_RE.is_match(url)
}
