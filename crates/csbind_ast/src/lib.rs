//! csbind_ast: The declaration tree the binding generator works on.
//!
//! A C++ front end produces the tree (see [`dump`]); generator passes walk
//! it with [`visitor::walk`] and tag declarations that cannot be bound.
//! Nodes live in an arena and are addressed by [`DeclId`], so passes mutate
//! them through handles rather than long-lived references.

pub mod decl;
pub mod dump;
pub mod types;
pub mod visitor;

// Re-export key types
pub use decl::*;
pub use types::*;
pub use visitor::{walk, DeclVisitor, VisitEvent};
