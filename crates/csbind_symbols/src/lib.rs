//! csbind_symbols: The registry of symbols known to the binding generator.
//!
//! The collector walks the declaration tree once, before any filtering
//! pass, and records every declaration the rules select. Later passes ask
//! the registry whether a class or type name refers to something that will
//! be bound.

mod collector;
mod registry;

pub use collector::SymbolCollector;
pub use registry::{SymbolLookup, SymbolRegistry};
