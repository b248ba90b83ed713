//! Common types and utilities for the molt transpiler front end.
//!
//! This crate provides foundational types used across the molt crates:
//! - Source spans (`Span`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, diagnostic codes)
//! - Centralized limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Diagnostics emitted by the analysis passes
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;
