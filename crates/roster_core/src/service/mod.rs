//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate predicate composition and store calls into search APIs.
//! - Keep CLI callers decoupled from SQL details.

pub mod member_search_service;
