//! Note parsing and tagging engine for daymark.
//!
//! Three pure components over raw markdown text: the segmenter splits a
//! daily document into time-stamped notes, the tag extractor derives the
//! hierarchical tag set of a body, and the tokenizer turns a body into
//! render-ready segments. File loading, persistence and UI state live in
//! collaborator crates; this crate never performs I/O on the parse path.

pub mod logging;
pub mod model;
pub mod parse;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteTimestamp};
pub use parse::segmenter::{segment_document, SegmentOutcome};
pub use parse::tags::extract_tags;
pub use parse::tokenizer::{tokenize, ContentSegment};
pub use service::collection::{CollectionError, LoadReport, NoteCollection};
pub use view::filter::{filter_by_tag, note_matches_tag, sort_notes, SortDirection};

/// Returns the engine crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
