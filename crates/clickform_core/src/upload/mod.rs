//! Single-file upload sink.
//!
//! # Responsibility
//! - Store one uploaded payload at a fixed destination, overwriting the last.
//! - Enforce the size cap before the destination is touched.
//!
//! # Invariants
//! - Oversized payloads never create or truncate the destination file.
//! - There is no rename-on-completion: a write interrupted mid-way can leave
//!   a partial destination file.

pub mod sink;
