//! csbind_generator: Binding generator passes and their driver.
//!
//! The generator loads the rules, collects the known symbols of the parsed
//! API and then runs passes over the declaration tree. Passes mark what
//! cannot be bound as ignored and report why.

pub mod context;
pub mod oracle;
pub mod passes;
pub mod pipeline;

pub use context::GeneratorContext;
pub use oracle::TypeOracle;
pub use passes::UnknownTypesPass;
pub use pipeline::{ApiPass, GenerationReport, Generator, Pipeline};
