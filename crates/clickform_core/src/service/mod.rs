//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into request-level operations.
//! - Keep the HTTP layer decoupled from storage details.

pub mod ingestion_service;
