//! View policies layered on top of the parsing contracts.
//!
//! # Responsibility
//! - Define how callers filter and order notes without owning any UI state.
//!
//! # Invariants
//! - Filtering matches one decomposed tag segment exactly, never a prefix.
//! - Ordering is a stable sort on `created_at`; ties keep insertion order.

pub mod filter;
