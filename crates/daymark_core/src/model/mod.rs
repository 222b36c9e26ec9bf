//! Domain model for the parsing engine.
//!
//! # Responsibility
//! - Define the canonical note record shared by segmentation, filtering and
//!   rendering consumers.
//! - Make timestamp validity an explicit, inspectable state.
//!
//! # Invariants
//! - `Note.created_at` is immutable after construction.
//! - `Note.body` changes only through a full-body replace.

pub mod note;
