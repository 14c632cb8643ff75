//! csbind_core: Core utilities shared by the binding generator crates.
//!
//! Provides string interning for symbol names and the source origin types
//! attached to declarations and diagnostics.

pub mod intern;
pub mod source;

// Re-export commonly used types
pub use intern::{InternedString, StringInterner};
pub use source::{SourceLocation, SourceOrigin};
