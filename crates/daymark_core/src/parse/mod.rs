//! Parsing layer: segmentation, tag extraction, body tokenization.
//!
//! # Responsibility
//! - Own every grammar this engine recognizes (entry markers, hierarchical
//!   tags, inline images).
//! - Stay pure: no I/O, no shared state, safe to call concurrently.
//!
//! # Invariants
//! - Tag and image grammars never fail; unmatched text is plain text.
//! - Identical input always produces byte-identical output.

pub mod segmenter;
pub mod tags;
pub mod tokenizer;
