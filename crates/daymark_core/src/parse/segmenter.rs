//! Document segmentation into time-stamped notes.
//!
//! # Responsibility
//! - Split one daily document into discrete note records on entry markers.
//! - Derive each note's timestamp from the document name plus the marker
//!   time, surfacing failures as explicit invalid timestamps.
//!
//! # Invariants
//! - Segmentation is deterministic: identical input, byte-identical bodies.
//! - Content dropped by the marker convention is reported through outcome
//!   flags, never lost silently.
//! - A bad document can never abort processing of sibling documents; this
//!   function does not fail.

use crate::model::note::{Note, NoteTimestamp};
use chrono::NaiveDate;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Entry marker: leading whitespace, `-`, optional whitespace, `HH:MM`.
/// The two-digit pairs are accepted syntactically without range checks;
/// range validation happens at date construction.
static ENTRY_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-\s*(\d{2}):(\d{2})").expect("valid entry marker regex"));

/// Result of segmenting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentOutcome {
    /// Notes in document order.
    pub notes: Vec<Note>,
    /// Set when lines before the first entry marker were discarded.
    pub dropped_leading_content: bool,
    /// Set when the document contained no entry marker at all, so every
    /// line (if any) was discarded.
    pub no_markers_found: bool,
}

/// Segments one source document into zero or more notes.
///
/// `source_id` is expected to end in a `yyyy-MM-dd` calendar date (an
/// optional `.md` suffix and any leading path components are stripped); the
/// date combines with each marker's `HH:MM` into the note timestamp. A
/// non-date source id or an out-of-range time yields
/// [`NoteTimestamp::Invalid`] for the affected notes.
pub fn segment_document(source_id: &str, raw_text: &str) -> SegmentOutcome {
    let (date_stem, date) = derive_source_date(source_id);
    let mut outcome = SegmentOutcome::default();
    let mut open: Option<(NoteTimestamp, String)> = None;

    for line in raw_text.split('\n') {
        if let Some(caps) = ENTRY_MARKER_RE.captures(line) {
            if let Some((created_at, body)) = open.take() {
                outcome.notes.push(finish_note(source_id, created_at, body));
            }
            let created_at = marker_timestamp(source_id, &date_stem, date, &caps[1], &caps[2]);
            open = Some((created_at, String::new()));
        } else if let Some((_, body)) = open.as_mut() {
            // Verbatim accumulation keeps internal line breaks intact.
            body.push_str(line);
            body.push('\n');
        } else if !line.is_empty() {
            outcome.dropped_leading_content = true;
        }
    }

    if let Some((created_at, body)) = open.take() {
        outcome.notes.push(finish_note(source_id, created_at, body));
    } else {
        outcome.no_markers_found = true;
    }

    debug!(
        "event=segment_document module=parse status=ok source_id={} notes={} dropped_leading={} no_markers={}",
        source_id,
        outcome.notes.len(),
        outcome.dropped_leading_content,
        outcome.no_markers_found
    );
    outcome
}

fn finish_note(source_id: &str, created_at: NoteTimestamp, body: String) -> Note {
    Note::new(source_id, normalize_body(body), created_at)
}

/// Collapses the trailing terminator run to a single `\n`; a body that is
/// only terminators (blank lines before the next marker) becomes empty.
/// Internal line breaks are never touched.
fn normalize_body(body: String) -> String {
    let trimmed = body.trim_end_matches('\n');
    if trimmed.is_empty() {
        String::new()
    } else {
        let mut normalized = trimmed.to_string();
        normalized.push('\n');
        normalized
    }
}

/// Strips path components and a `.md` suffix, then parses the remainder as
/// `yyyy-MM-dd`. Returns the stem alongside the parse result so invalid
/// timestamps can report what was actually tried.
fn derive_source_date(source_id: &str) -> (String, Option<NaiveDate>) {
    let component = source_id.rsplit('/').next().unwrap_or(source_id);
    let stem = component.strip_suffix(".md").unwrap_or(component);
    let date = NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok();
    (stem.to_string(), date)
}

fn marker_timestamp(
    source_id: &str,
    date_stem: &str,
    date: Option<NaiveDate>,
    hour: &str,
    minute: &str,
) -> NoteTimestamp {
    let raw = format!("{date_stem}T{hour}:{minute}");
    let Some(date) = date else {
        warn!(
            "event=invalid_timestamp module=parse status=warn source_id={source_id} raw={raw} reason=undated_source"
        );
        return NoteTimestamp::invalid(
            raw,
            format!("source id `{source_id}` does not encode a yyyy-MM-dd date"),
        );
    };

    // The marker grammar guarantees two digits; a failed parse falls through
    // to the same out-of-range path as a `27:99` value.
    let hh: u32 = hour.parse().unwrap_or(u32::MAX);
    let mm: u32 = minute.parse().unwrap_or(u32::MAX);
    match date.and_hms_opt(hh, mm, 0) {
        Some(at) => NoteTimestamp::Valid { at },
        None => {
            warn!(
                "event=invalid_timestamp module=parse status=warn source_id={source_id} raw={raw} reason=time_out_of_range"
            );
            NoteTimestamp::invalid(raw, format!("time `{hour}:{minute}` is out of range"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_body, segment_document};
    use crate::model::note::NoteTimestamp;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NoteTimestamp {
        NoteTimestamp::Valid {
            at: NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(hh, mm, 0))
                .expect("test timestamp should be constructible"),
        }
    }

    #[test]
    fn splits_on_entry_markers_with_derived_timestamps() {
        let outcome = segment_document("2024-05-01.md", "- 09:00\nhello\n- 10:30\nworld\n");
        assert_eq!(outcome.notes.len(), 2);
        assert_eq!(outcome.notes[0].body, "hello\n");
        assert_eq!(outcome.notes[0].created_at, at(2024, 5, 1, 9, 0));
        assert_eq!(outcome.notes[1].body, "world\n");
        assert_eq!(outcome.notes[1].created_at, at(2024, 5, 1, 10, 30));
        assert!(!outcome.dropped_leading_content);
        assert!(!outcome.no_markers_found);
    }

    #[test]
    fn leading_content_is_dropped_and_flagged() {
        let outcome = segment_document("2024-05-01.md", "orphan line\n- 09:00\nreal note\n");
        assert_eq!(outcome.notes.len(), 1);
        assert_eq!(outcome.notes[0].body, "real note\n");
        assert!(outcome.dropped_leading_content);
    }

    #[test]
    fn document_without_markers_yields_nothing_but_says_so() {
        let outcome = segment_document("2024-05-01.md", "just prose\nno markers\n");
        assert!(outcome.notes.is_empty());
        assert!(outcome.no_markers_found);
        assert!(outcome.dropped_leading_content);
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        let outcome = segment_document("2024-05-01.md", "");
        assert!(outcome.notes.is_empty());
        assert!(outcome.no_markers_found);
        assert!(!outcome.dropped_leading_content);
    }

    #[test]
    fn consecutive_markers_produce_an_empty_body() {
        let outcome = segment_document("2024-05-01.md", "- 09:00\n- 10:30\ntail\n");
        assert_eq!(outcome.notes.len(), 2);
        assert_eq!(outcome.notes[0].body, "");
        assert_eq!(outcome.notes[1].body, "tail\n");
    }

    #[test]
    fn marker_allows_leading_whitespace_and_tight_spacing() {
        let outcome = segment_document("2024-05-01.md", "  -09:05\nindented\n");
        assert_eq!(outcome.notes.len(), 1);
        assert_eq!(outcome.notes[0].created_at, at(2024, 5, 1, 9, 5));
    }

    #[test]
    fn out_of_range_time_becomes_explicit_invalid_timestamp() {
        let outcome = segment_document("2024-05-01.md", "- 27:99\nnote\n");
        assert_eq!(outcome.notes.len(), 1);
        match &outcome.notes[0].created_at {
            NoteTimestamp::Invalid { raw, reason } => {
                assert_eq!(raw, "2024-05-01T27:99");
                assert!(reason.contains("out of range"));
            }
            other => panic!("expected invalid timestamp, got {other:?}"),
        }
        assert_eq!(outcome.notes[0].body, "note\n");
    }

    #[test]
    fn undated_source_id_marks_every_note_invalid() {
        let outcome = segment_document("scratch.md", "- 09:00\nnote\n");
        assert_eq!(outcome.notes.len(), 1);
        assert!(!outcome.notes[0].created_at.is_valid());
    }

    #[test]
    fn source_id_may_carry_path_components() {
        let outcome = segment_document("vault/daily/2024-05-01.md", "- 09:00\nnote\n");
        assert_eq!(outcome.notes[0].created_at, at(2024, 5, 1, 9, 0));
        assert_eq!(outcome.notes[0].source_id, "vault/daily/2024-05-01.md");
    }

    #[test]
    fn trailing_blank_lines_collapse_to_one_terminator() {
        let outcome = segment_document("2024-05-01.md", "- 09:00\nbody\n\n\n- 10:00\nnext\n");
        assert_eq!(outcome.notes[0].body, "body\n");
    }

    #[test]
    fn internal_blank_lines_survive() {
        let outcome = segment_document("2024-05-01.md", "- 09:00\npara one\n\npara two\n");
        assert_eq!(outcome.notes[0].body, "para one\n\npara two\n");
    }

    #[test]
    fn segmentation_is_deterministic() {
        let input = "- 09:00\nhello #tag\n- 27:99\nodd\n";
        assert_eq!(
            segment_document("2024-05-01.md", input),
            segment_document("2024-05-01.md", input)
        );
    }

    #[test]
    fn normalize_body_only_touches_trailing_terminators() {
        assert_eq!(normalize_body("a\nb\n\n\n".to_string()), "a\nb\n");
        assert_eq!(normalize_body("\n\n".to_string()), "");
        assert_eq!(normalize_body("a  \n".to_string()), "a  \n");
    }
}
