//! HTML fragment rendering.
//!
//! # Responsibility
//! - Map a closed set of response kinds to their literal fragments.
//! - Render the record listing table from a store snapshot.
//!
//! # Invariants
//! - Fragment literals are part of the client contract and must not drift.
//! - Every stored value is HTML-escaped before it reaches the output.

pub mod escape;
pub mod fragment;
