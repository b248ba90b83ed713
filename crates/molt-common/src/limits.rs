//! Centralized limits and thresholds for the analysis passes.
//!
//! Centralizing these values prevents duplicate definitions with
//! inconsistent values and documents the rationale for each limit.

/// Maximum number of scopes a chain walk will visit before giving up.
///
/// Scope parent links form a tree by construction, so a well-formed chain is
/// never longer than the source nesting depth. The guard bounds the walk if a
/// corrupted scope table ever introduces a cycle, turning a hang into a
/// resolution miss.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

/// Initial capacity for the per-module binding arena.
///
/// Sized for a typical module so small inputs never reallocate; large
/// modules grow past it normally.
pub const BINDING_PREALLOC: usize = 64;
