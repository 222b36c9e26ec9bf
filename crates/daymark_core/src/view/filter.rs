//! Active-tag filtering and chronological ordering.

use crate::model::note::Note;
use crate::parse::tags::extract_tags;
use serde::{Deserialize, Serialize};

/// Chronological list direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    NewestFirst,
    OldestFirst,
}

/// Exact-match membership of the active tag in the note's decomposed tag
/// set. `project` matches a note tagged `#project/sub`; `project/sub` does
/// not, because full paths are not tags.
pub fn note_matches_tag(note: &Note, tag: &str) -> bool {
    extract_tags(&note.body).contains(tag)
}

/// Filters notes by active tag, preserving input order.
pub fn filter_by_tag<'n>(notes: &'n [Note], tag: &str) -> Vec<&'n Note> {
    notes
        .iter()
        .filter(|note| note_matches_tag(note, tag))
        .collect()
}

/// Stable chronological sort.
///
/// Invalid timestamps group before every valid one in `OldestFirst` order
/// (after, in `NewestFirst`); ties keep their insertion order in both
/// directions, which makes the result deterministic for equal-minute notes.
pub fn sort_notes(notes: &mut [Note], direction: SortDirection) {
    match direction {
        SortDirection::OldestFirst => {
            notes.sort_by(|a, b| a.created_at.chronological_cmp(&b.created_at));
        }
        SortDirection::NewestFirst => {
            notes.sort_by(|a, b| b.created_at.chronological_cmp(&a.created_at));
        }
    }
}
