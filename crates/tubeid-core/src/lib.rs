//! `Tubeid` Core Library
//!
//! This crate extracts `YouTube` video IDs from the strings users paste:
//! - Watch, embed, legacy `v/`, and playlist URLs on youtube.com
//! - `youtu.be` short links
//! - URLs missing their `https://` scheme
//! - Bare 11-character IDs
//!
//! Extraction is a pure function of its input. The result is either a
//! validated [`VideoId`] or `None`; there is no sentinel value.
//!
//! ```rust
//! use tubeid_core::{VideoId, extract_video_id};
//!
//! let id = extract_video_id("www.youtube.com/watch?v=dQw4w9WgXcQ");
//! assert_eq!(id, VideoId::parse("dQw4w9WgXcQ").ok());
//! ```

pub mod error;
pub mod extractor;
pub mod pattern;
pub mod video_id;

pub use error::{Error, Result};
pub use extractor::{
    BARE_HOST_PREFIXES, Extraction, MatchSource, extract_video_id, extract_video_id_detailed,
    try_extract_video_id,
};
pub use pattern::UrlPattern;
pub use video_id::{VIDEO_ID_LEN, VideoId, is_valid_video_id};
