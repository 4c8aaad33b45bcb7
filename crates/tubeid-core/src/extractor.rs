//! `YouTube` video ID extraction.
//!
//! Turns whatever a user pasted into a [`VideoId`], or nothing. The pipeline is
//! strictly ordered and stops at the first stage that produces an ID:
//!
//! 1. Bare ID: the whole input is already an ID.
//! 2. Scheme normalization: `www.youtube.com/...` and `youtu.be/...` get an
//!    `https://` prefix, once.
//! 3. Short link: `http(s)://youtu.be/<id>`.
//! 4. Canonical domain: the [`UrlPattern`] table, in priority order.
//!
//! A stage that does not apply is a silent non-match. There is exactly one
//! failure outcome, regardless of why the input was rejected.
//!
//! ## Usage
//!
//! ```rust
//! use tubeid_core::extract_video_id;
//!
//! let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=42");
//! assert_eq!(id.as_ref().map(|id| id.as_str()), Some("dQw4w9WgXcQ"));
//!
//! assert!(extract_video_id("https://www.example.com/watch?v=dQw4w9WgXcQ").is_none());
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::pattern::{UrlPattern, capture_short_link, is_canonical_host};
use crate::video_id::{VideoId, is_valid_video_id};

/// Bare host prefixes that get a scheme prepended.
pub const BARE_HOST_PREFIXES: [&str; 2] = ["www.youtube.com", "youtu.be"];

/// Scheme used when normalizing a bare host prefix.
const DEFAULT_SCHEME: &str = "https://";

/// Which pipeline stage produced an ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "stage", content = "pattern")]
pub enum MatchSource {
    /// The input was itself a bare ID.
    BareId,
    /// A `youtu.be` short link.
    ShortLink,
    /// One of the canonical-domain URL shapes.
    Canonical(UrlPattern),
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BareId => write!(f, "bare_id"),
            Self::ShortLink => write!(f, "short_link"),
            Self::Canonical(pattern) => write!(f, "canonical:{pattern}"),
        }
    }
}

/// A successful extraction with details about how it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// The extracted ID.
    pub video_id: VideoId,
    /// The stage that produced it.
    pub source: MatchSource,
    /// Whether a scheme was prepended before matching.
    pub normalized: bool,
}

/// Extract a video ID from a URL or bare ID.
///
/// Returns `None` when no ID can be determined. Never panics.
#[must_use]
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    extract_video_id_detailed(input).map(|extraction| extraction.video_id)
}

/// Like [`extract_video_id`], but maps absence to [`Error::ExtractionFailed`].
pub fn try_extract_video_id(input: &str) -> Result<VideoId> {
    extract_video_id(input).ok_or_else(|| Error::extraction_failed(input))
}

/// Extract a video ID and report which stage matched.
#[must_use]
pub fn extract_video_id_detailed(input: &str) -> Option<Extraction> {
    if input.is_empty() {
        trace!("Empty input");
        return None;
    }

    if let Some(id) = recognize_bare_id(input) {
        debug!(video_id = %id, "Input is a bare video ID");
        return Some(Extraction {
            video_id: id,
            source: MatchSource::BareId,
            normalized: false,
        });
    }

    // Normalization yields a string that always has a scheme, so the URL
    // stages run at most once.
    let Some(url) = normalize_scheme(input) else {
        trace!(input, "No scheme and no recognized host prefix");
        return None;
    };
    let normalized = matches!(url, Cow::Owned(_));

    let result = match_url(&url).map(|(video_id, source)| Extraction {
        video_id,
        source,
        normalized,
    });

    match &result {
        Some(extraction) => debug!(
            video_id = %extraction.video_id,
            source = %extraction.source,
            normalized,
            "Extracted video ID"
        ),
        None => debug!(input, "No video ID found"),
    }

    result
}

/// Stage 1: the whole input is an ID with no URL punctuation.
fn recognize_bare_id(input: &str) -> Option<VideoId> {
    if is_valid_video_id(input) && !input.contains(['?', '=', '/']) {
        Some(VideoId::from_validated(input))
    } else {
        None
    }
}

fn has_http_scheme(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Stage 2: make sure the input carries a scheme.
///
/// Returns the input unchanged if it already has one, a prefixed copy if it
/// starts with a recognized bare host, and `None` otherwise.
fn normalize_scheme(input: &str) -> Option<Cow<'_, str>> {
    if has_http_scheme(input) {
        return Some(Cow::Borrowed(input));
    }

    if BARE_HOST_PREFIXES
        .iter()
        .any(|prefix| input.starts_with(prefix))
    {
        trace!(input, "Prepending scheme to bare host");
        return Some(Cow::Owned(format!("{DEFAULT_SCHEME}{input}")));
    }

    None
}

/// Stages 3 and 4, on an input that starts with a scheme.
fn match_url(url: &str) -> Option<(VideoId, MatchSource)> {
    if let Some(id) = capture_short_link(url) {
        return Some((VideoId::from_validated(id), MatchSource::ShortLink));
    }

    if !is_canonical_host(url) {
        trace!(url, "Host is not a YouTube domain");
        return None;
    }

    UrlPattern::ALL.iter().find_map(|&pattern| {
        let id = pattern.capture(url)?;
        trace!(%pattern, "URL pattern matched");
        Some((VideoId::from_validated(id), MatchSource::Canonical(pattern)))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn extract(input: &str) -> Option<String> {
        extract_video_id(input).map(VideoId::into_inner)
    }

    // =========================================================================
    // Bare ID
    // =========================================================================

    #[test]
    fn test_bare_id() {
        assert_eq!(extract("dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_bare_id_wrong_length() {
        assert_eq!(extract("dQw4w9WgXc"), None);
        assert_eq!(extract("dQw4w9WgXcQQ"), None);
    }

    #[test]
    fn test_bare_id_invalid_char() {
        assert_eq!(extract("dQw4w9WgXcQ!"), None);
        assert_eq!(extract("dQw4w9WgX?Q"), None);
    }

    #[test]
    fn test_bare_id_source() {
        let extraction = extract_video_id_detailed("dQw4w9WgXcQ").unwrap();
        assert_eq!(extraction.source, MatchSource::BareId);
        assert!(!extraction.normalized);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract(""), None);
        assert!(extract_video_id_detailed("").is_none());
    }

    // =========================================================================
    // Scheme normalization
    // =========================================================================

    #[test]
    fn test_normalize_scheme_present() {
        let url = normalize_scheme("https://youtu.be/x").unwrap();
        assert!(matches!(url, Cow::Borrowed("https://youtu.be/x")));
    }

    #[test]
    fn test_normalize_scheme_prepended() {
        let url = normalize_scheme("www.youtube.com/watch?v=x").unwrap();
        assert_eq!(url, "https://www.youtube.com/watch?v=x");
        assert!(matches!(url, Cow::Owned(_)));
    }

    #[test]
    fn test_normalize_scheme_unrecognized() {
        assert!(normalize_scheme("youtube.com/watch?v=dQw4w9WgXcQ").is_none());
        assert!(normalize_scheme("example.com").is_none());
        assert!(normalize_scheme("//www.youtube.com/watch").is_none());
    }

    #[test]
    fn test_normalized_flag() {
        let extraction =
            extract_video_id_detailed("www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(extraction.video_id, "dQw4w9WgXcQ");
        assert!(extraction.normalized);
        assert_eq!(extraction.source, MatchSource::Canonical(UrlPattern::Watch));
    }

    #[test]
    fn test_short_link_without_scheme() {
        let extraction = extract_video_id_detailed("youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(extraction.source, MatchSource::ShortLink);
        assert!(extraction.normalized);
    }

    // =========================================================================
    // URL stages
    // =========================================================================

    #[test]
    fn test_short_link_source() {
        let extraction = extract_video_id_detailed("https://youtu.be/dQw4w9WgXcQ?t=42").unwrap();
        assert_eq!(extraction.video_id, "dQw4w9WgXcQ");
        assert_eq!(extraction.source, MatchSource::ShortLink);
        assert!(!extraction.normalized);
    }

    #[test]
    fn test_short_host_falls_through_to_table() {
        // Not an ID right after the host, but the watch shape still applies.
        let extraction =
            extract_video_id_detailed("https://youtu.be/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(extraction.source, MatchSource::Canonical(UrlPattern::Watch));
    }

    #[test]
    fn test_match_url_rejects_other_hosts() {
        assert!(match_url("https://www.example.com/watch?v=dQw4w9WgXcQ").is_none());
        assert!(match_url("https://vimeo.com/embed/dQw4w9WgXcQ").is_none());
    }

    #[test]
    fn test_try_extract() {
        assert_eq!(
            try_extract_video_id("https://www.youtube.com/v/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        let err = try_extract_video_id("not a url").unwrap_err();
        assert!(err.is_extraction_failure());
        assert_eq!(err, Error::extraction_failed("not a url"));
    }

    #[test]
    fn test_match_source_display() {
        assert_eq!(MatchSource::BareId.to_string(), "bare_id");
        assert_eq!(MatchSource::ShortLink.to_string(), "short_link");
        assert_eq!(
            MatchSource::Canonical(UrlPattern::Embed).to_string(),
            "canonical:embed"
        );
    }

    #[test]
    fn test_match_source_serialization() {
        let json = serde_json::to_string(&MatchSource::Canonical(UrlPattern::LegacyV)).unwrap();
        assert_eq!(json, r#"{"stage":"canonical","pattern":"legacy_v"}"#);
        let json = serde_json::to_string(&MatchSource::ShortLink).unwrap();
        assert_eq!(json, r#"{"stage":"short_link"}"#);
    }
}
