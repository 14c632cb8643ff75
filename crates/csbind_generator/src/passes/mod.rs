//! Generator passes.

mod unknown_types;

pub use unknown_types::UnknownTypesPass;
