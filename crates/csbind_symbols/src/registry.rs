//! Symbol registry definitions.

use csbind_ast::DeclId;
use csbind_core::intern::{InternedString, StringInterner};
use rustc_hash::FxHashMap;

/// Membership queries over known symbols, by fully qualified name.
pub trait SymbolLookup {
    fn has(&self, symbol_name: &str) -> bool;
}

/// Maps fully qualified symbol names to the declaration that introduced
/// them.
#[derive(Debug, Clone, Default)]
pub struct SymbolRegistry {
    interner: StringInterner,
    table: FxHashMap<InternedString, DeclId>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self {
            interner: StringInterner::new(),
            table: FxHashMap::default(),
        }
    }

    /// Register a symbol. Overloads share a name; the first declaration
    /// registered under a name keeps it. Returns `true` if the name is new.
    pub fn insert(&mut self, symbol_name: &str, decl: DeclId) -> bool {
        let key = self.interner.intern(symbol_name);
        let mut inserted = false;
        self.table.entry(key).or_insert_with(|| {
            inserted = true;
            decl
        });
        inserted
    }

    pub fn get(&self, symbol_name: &str) -> Option<DeclId> {
        let key = self.interner.get(symbol_name)?;
        self.table.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DeclId)> {
        self.table.iter().map(|(k, v)| (self.interner.resolve(*k), *v))
    }
}

impl SymbolLookup for SymbolRegistry {
    fn has(&self, symbol_name: &str) -> bool {
        self.get(symbol_name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = SymbolRegistry::new();
        assert!(registry.insert("Urho3D::Node", DeclId(3)));
        assert!(registry.has("Urho3D::Node"));
        assert!(!registry.has("Urho3D::Scene"));
        assert_eq!(registry.get("Urho3D::Node"), Some(DeclId(3)));
    }

    #[test]
    fn test_first_overload_keeps_the_name() {
        let mut registry = SymbolRegistry::new();
        assert!(registry.insert("Urho3D::Node::SetName", DeclId(5)));
        assert!(!registry.insert("Urho3D::Node::SetName", DeclId(6)));
        assert_eq!(registry.get("Urho3D::Node::SetName"), Some(DeclId(5)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iter_resolves_names() {
        let mut registry = SymbolRegistry::new();
        registry.insert("A", DeclId(1));
        registry.insert("B", DeclId(2));
        let mut names: Vec<_> = registry.iter().map(|(n, _)| n.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["A", "B"]);
    }
}
