//! Domain model for submitted form records.
//!
//! # Responsibility
//! - Define the record shape shared by every store variant and the renderer.
//!
//! # Invariants
//! - Record identity is assigned by a store, never by a caller.
//! - Records are immutable once created.

pub mod record;
