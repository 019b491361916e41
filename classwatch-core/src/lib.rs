// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Classwatch Core
//!
//! Core types and models for the Classwatch application.
//!
//! This crate provides the foundational abstractions used across all other
//! Classwatch crates, including:
//!
//! - Domain models (members, classes, sessions, competency documents)
//! - Progress computation from competency documents
//! - The normalized per-account snapshot rebuilt on every refresh
//! - Error types
//!
//! ## Key Types
//!
//! ### Graph Types
//! - [`Member`] - An account holder enrolled in classes
//! - [`Class`] - A course with attendance and competency tracking
//! - [`Session`] - A single scheduled session of a class
//! - [`CompetencyDocument`] - Skill tree plus per-member completion map,
//!   the source of truth for progress percentages
//!
//! ### Snapshot Types
//! - [`ProgressSnapshot`] - Flat mapping from member id to record
//! - [`MemberRecord`] - Normalized per-member view
//! - [`ClassRecord`] - Normalized per-class view

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Graph types
    Class,
    CompetencyDocument,
    CompetencyNode,
    Member,
    MemberId,
    Session,
    // Snapshot types
    ClassRecord,
    MemberRecord,
    ProgressSnapshot,
    // Timestamp handling
    parse_wire_timestamp,
    WIRE_TIMESTAMP_FORMAT,
};
