//! Note domain model.
//!
//! # Responsibility
//! - Define the note record produced by document segmentation and by manual
//!   user input.
//! - Represent creation-time validity explicitly instead of guessing a date.
//!
//! # Invariants
//! - `created_at` never changes after construction.
//! - `body` is replaced only wholesale (edit-save), never patched in place.
//! - Manual notes always carry a fresh synthetic source id.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Creation timestamp with minute precision.
///
/// Segmentation can meet markers that are syntactically well-formed but do
/// not name a real instant: a `27:99` time, or a document whose name encodes
/// no date. Those become `Invalid`, preserving the offending raw text so a
/// caller can warn or exclude the note instead of trusting a fabricated
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteTimestamp {
    /// A real calendar instant, seconds always zero.
    Valid { at: NaiveDateTime },
    /// A timestamp that could not be constructed from its source text.
    Invalid { raw: String, reason: String },
}

impl NoteTimestamp {
    /// Creates an invalid timestamp carrying the raw source text and a
    /// human-readable reason.
    pub fn invalid(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Current local wall-clock time truncated to minute precision.
    pub fn now_minute() -> Self {
        let now = Local::now().naive_local();
        match now.with_second(0).and_then(|at| at.with_nanosecond(0)) {
            Some(at) => Self::Valid { at },
            // Truncating to second zero cannot fail for a real clock reading;
            // keep a loud sentinel rather than a panic path regardless.
            None => Self::invalid(now.to_string(), "clock truncation failed"),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Returns the parsed instant, or `None` for invalid timestamps.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Valid { at } => Some(*at),
            Self::Invalid { .. } => None,
        }
    }

    /// Chronological comparison for sorting.
    ///
    /// Invalid timestamps order before every valid one and are mutually
    /// tied; callers must use a stable sort so ties keep insertion order.
    /// Not an `Ord` impl: distinct invalid values compare tied without
    /// being equal.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        match (self.as_datetime(), other.as_datetime()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }
}

/// The unit of persisted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Origin identifier: the source filename for segmented notes, a
    /// synthetic uuid for manually created ones.
    pub source_id: String,
    /// Raw markdown text, trailing segmentation terminators collapsed.
    pub body: String,
    /// Creation time, minute precision, possibly an explicit invalid marker.
    pub created_at: NoteTimestamp,
}

impl Note {
    pub fn new(
        source_id: impl Into<String>,
        body: impl Into<String>,
        created_at: NoteTimestamp,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            body: body.into(),
            created_at,
        }
    }

    /// Creates a manually entered note stamped with the current wall clock.
    pub fn manual(body: impl Into<String>) -> Self {
        Self::new(
            Uuid::new_v4().to_string(),
            body,
            NoteTimestamp::now_minute(),
        )
    }

    /// Full-body replacement, the only permitted mutation.
    ///
    /// `created_at` is intentionally untouched: editing does not move a note
    /// in chronological views.
    pub fn replace_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteTimestamp};
    use chrono::NaiveDate;
    use std::cmp::Ordering;

    fn valid(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NoteTimestamp {
        let at = NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(hh, mm, 0))
            .expect("test timestamp should be constructible");
        NoteTimestamp::Valid { at }
    }

    #[test]
    fn invalid_orders_before_every_valid_timestamp() {
        let bad = NoteTimestamp::invalid("27:99", "out of range");
        let good = valid(2024, 5, 1, 9, 0);
        assert_eq!(bad.chronological_cmp(&good), Ordering::Less);
        assert_eq!(good.chronological_cmp(&bad), Ordering::Greater);
    }

    #[test]
    fn invalid_timestamps_tie_without_being_equal() {
        let a = NoteTimestamp::invalid("27:99", "out of range");
        let b = NoteTimestamp::invalid("99:00", "out of range");
        assert_eq!(a.chronological_cmp(&b), Ordering::Equal);
        assert_ne!(a, b);
    }

    #[test]
    fn now_minute_truncates_seconds() {
        let at = NoteTimestamp::now_minute()
            .as_datetime()
            .expect("wall clock timestamp should be valid");
        assert_eq!(at.and_utc().timestamp() % 60, 0);
    }

    #[test]
    fn manual_notes_get_distinct_synthetic_source_ids() {
        let first = Note::manual("one");
        let second = Note::manual("two");
        assert_ne!(first.source_id, second.source_id);
        assert!(first.created_at.is_valid());
    }

    #[test]
    fn replace_body_keeps_created_at() {
        let mut note = Note::new("2024-05-01.md", "old", valid(2024, 5, 1, 9, 0));
        let before = note.created_at.clone();
        note.replace_body("new body");
        assert_eq!(note.body, "new body");
        assert_eq!(note.created_at, before);
    }
}
