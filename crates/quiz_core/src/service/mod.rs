//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the quiz store operations.
//! - Keep the CLI decoupled from storage details.

pub mod quiz_service;
pub mod seed;
