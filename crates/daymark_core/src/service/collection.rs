//! In-memory note collection service.
//!
//! # Responsibility
//! - Build the full note list from many segmented documents.
//! - Support manual note creation, full-body edit, explicit deletion.
//! - Derive the global tag index and filtered/ordered views.
//!
//! # Invariants
//! - Documents load independently; one bad document never aborts the batch.
//! - Insertion order is preserved; chronological order is a view concern.
//! - `created_at` survives every edit.

use crate::model::note::Note;
use crate::parse::segmenter::segment_document;
use crate::parse::tags::extract_tags;
use crate::view::filter::{filter_by_tag, sort_notes, SortDirection};
use log::{info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Collection-level error for index-addressed operations.
#[derive(Debug, PartialEq, Eq)]
pub enum CollectionError {
    /// The addressed note does not exist (already deleted, or never did).
    NoteNotFound(usize),
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(index) => write!(f, "note not found at index {index}"),
        }
    }
}

impl Error for CollectionError {}

/// Per-document summary of a batch load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub notes_added: usize,
    pub dropped_leading_content: bool,
    pub no_markers_found: bool,
}

/// The full in-memory note list a UI works against.
#[derive(Debug, Clone, Default)]
pub struct NoteCollection {
    notes: Vec<Note>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection by segmenting every `(source_id, raw_text)` pair.
    ///
    /// Documents are processed in iteration order and in isolation; a
    /// markerless or undated document contributes nothing (or invalid-stamped
    /// notes) without disturbing the rest of the batch.
    pub fn from_documents<I, S, T>(documents: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut collection = Self::new();
        let mut document_count = 0usize;
        for (source_id, raw_text) in documents {
            collection.load_document(source_id.as_ref(), raw_text.as_ref());
            document_count += 1;
        }
        info!(
            "event=load_documents module=service status=ok documents={} notes={}",
            document_count,
            collection.notes.len()
        );
        collection
    }

    /// Segments one document and appends its notes.
    pub fn load_document(&mut self, source_id: &str, raw_text: &str) -> LoadReport {
        let outcome = segment_document(source_id, raw_text);
        let report = LoadReport {
            notes_added: outcome.notes.len(),
            dropped_leading_content: outcome.dropped_leading_content,
            no_markers_found: outcome.no_markers_found,
        };
        if report.no_markers_found {
            warn!(
                "event=no_markers_found module=service status=warn source_id={source_id}"
            );
        } else if report.dropped_leading_content {
            warn!(
                "event=dropped_leading_content module=service status=warn source_id={source_id}"
            );
        }
        self.notes.extend(outcome.notes);
        report
    }

    /// Creates a note from direct user input and returns it.
    pub fn add_manual(&mut self, body: impl Into<String>) -> &Note {
        self.notes.push(Note::manual(body));
        // Just pushed, so the last element exists.
        &self.notes[self.notes.len() - 1]
    }

    /// Edit-save: replaces the addressed note's body wholesale.
    pub fn replace_body(
        &mut self,
        index: usize,
        body: impl Into<String>,
    ) -> Result<(), CollectionError> {
        let note = self
            .notes
            .get_mut(index)
            .ok_or(CollectionError::NoteNotFound(index))?;
        note.replace_body(body);
        Ok(())
    }

    /// Explicit deletion; returns the removed note.
    pub fn remove(&mut self, index: usize) -> Result<Note, CollectionError> {
        if index >= self.notes.len() {
            return Err(CollectionError::NoteNotFound(index));
        }
        Ok(self.notes.remove(index))
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Union of every note's decomposed tag set.
    pub fn tag_index(&self) -> BTreeSet<String> {
        let mut index = BTreeSet::new();
        for note in &self.notes {
            index.extend(extract_tags(&note.body));
        }
        index
    }

    /// The UI view: optional active-tag filter, then a stable chronological
    /// sort in the requested direction.
    pub fn view(&self, active_tag: Option<&str>, direction: SortDirection) -> Vec<Note> {
        let mut selected: Vec<Note> = match active_tag {
            Some(tag) => filter_by_tag(&self.notes, tag)
                .into_iter()
                .cloned()
                .collect(),
            None => self.notes.clone(),
        };
        sort_notes(&mut selected, direction);
        selected
    }
}
