//! Per-input extraction and result rendering.

use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use serde::Serialize;
use tracing::debug;
use tubeid_core::{MatchSource, VideoId, extract_video_id_detailed};

use crate::config::{OutputFormat, UrlKind};
use crate::error::Result;

/// Message shown for inputs that yield no ID.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid YouTube URL or Video ID";

/// How each result is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputSettings {
    /// Plain lines or JSON objects.
    pub format: OutputFormat,
    /// Form of the ID in plain output.
    pub url_kind: UrlKind,
}

/// Counts of processed inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    /// Inputs that yielded an ID.
    pub succeeded: usize,
    /// Inputs that did not.
    pub failed: usize,
}

impl Summary {
    /// Whether every input yielded an ID.
    #[must_use]
    pub const fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    input: &'a str,
    video_id: Option<&'a VideoId>,
    source: Option<MatchSource>,
    normalized: bool,
    url: Option<String>,
}

/// Split `reader` into lines without requiring UTF-8.
///
/// The line terminator (`\n` or `\r\n`) is stripped. Invalid byte sequences
/// become U+FFFD, which is outside the ID alphabet, so such a line can still
/// be reported as a failed input instead of ending the run.
pub fn read_lines<R: BufRead>(mut reader: R) -> impl Iterator<Item = io::Result<String>> {
    let mut buf = Vec::new();
    std::iter::from_fn(move || {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                let line = String::from_utf8_lossy(&buf);
                if matches!(line, Cow::Owned(_)) {
                    debug!("Replaced invalid UTF-8 in input line");
                }
                Some(Ok(line.into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    })
}

/// Extract an ID from each input and write the results.
///
/// Successes go to `out`. In plain format failures are reported on `err`;
/// in JSON format every input produces a record on `out`.
///
/// # Errors
///
/// Returns an error if reading an input or writing a result fails.
pub fn process_inputs<I, W, E>(
    inputs: I,
    settings: OutputSettings,
    out: &mut W,
    err: &mut E,
) -> Result<Summary>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
    E: Write,
{
    let mut summary = Summary::default();

    for input in inputs {
        let input = input?;
        let extraction = extract_video_id_detailed(&input);

        match &extraction {
            Some(found) => {
                summary.succeeded += 1;
                debug!(input = %input, video_id = %found.video_id, "Resolved input");
            }
            None => {
                summary.failed += 1;
                debug!(input = %input, "No video ID found");
            }
        }

        match settings.format {
            OutputFormat::Plain => match &extraction {
                Some(found) => writeln!(out, "{}", settings.url_kind.render(&found.video_id))?,
                None => writeln!(err, "{INVALID_INPUT_MESSAGE}: {input}")?,
            },
            OutputFormat::Json => {
                let record = JsonRecord {
                    input: &input,
                    video_id: extraction.as_ref().map(|found| &found.video_id),
                    source: extraction.as_ref().map(|found| found.source),
                    normalized: extraction.as_ref().is_some_and(|found| found.normalized),
                    url: match settings.url_kind {
                        UrlKind::None => None,
                        kind => extraction
                            .as_ref()
                            .map(|found| kind.render(&found.video_id)),
                    },
                };
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
        }
    }

    out.flush()?;
    Ok(summary)
}
