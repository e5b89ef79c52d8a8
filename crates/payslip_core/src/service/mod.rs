//! Core use-case services.
//!
//! # Responsibility
//! - Implement period selection rules and content sequencing.
//! - Orchestrate drafts into requests for the submission transport.
//! - Keep callers decoupled from transport and configuration details.

pub mod period_resolver;
pub mod report_mailing;
pub mod sequence_engine;
pub mod submission;
pub mod submission_draft;
