//! Syntax tree contract for the molt transpiler front end.
//!
//! The external parser produces this tree; the analysis passes annotate it
//! through side tables keyed by [`NodeIndex`]. Node kinds and fields mirror
//! the source grammar and are a fixed contract: this crate does not decide
//! what the grammar means, only how it is stored.
//!
//! Storage is arena-based: all nodes live in a [`NodeArena`] and refer to
//! each other by [`NodeIndex`], so the tree has no owning pointers between
//! nodes and can be walked or annotated without lifetime entanglement.

pub mod arena;
pub mod node;

pub use arena::NodeArena;
pub use node::*;
