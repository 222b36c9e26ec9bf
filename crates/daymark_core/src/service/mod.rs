//! Use-case services composing the parsing layer for callers.
//!
//! # Responsibility
//! - Orchestrate batch document loading and in-memory collection state for
//!   UI consumers.
//!
//! # Invariants
//! - A failing document never affects its siblings in a batch load.
//! - Services never perform I/O; raw text always arrives from the caller.

pub mod collection;
