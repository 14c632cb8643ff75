//! Fill the symbol registry from the declaration tree.

use crate::registry::SymbolRegistry;
use csbind_ast::visitor::{walk, DeclVisitor, VisitEvent};
use csbind_ast::{DeclId, DeclarationTree};
use csbind_rules::SymbolFilter;

/// Registers every named declaration that came from a header and that the
/// rules' symbol filter includes. Anonymous declarations never get a
/// symbol.
pub struct SymbolCollector<'r> {
    filter: &'r SymbolFilter,
    registry: SymbolRegistry,
    skipped: usize,
}

impl<'r> SymbolCollector<'r> {
    pub fn new(filter: &'r SymbolFilter) -> Self {
        Self {
            filter,
            registry: SymbolRegistry::new(),
            skipped: 0,
        }
    }

    /// Walk `tree` and return the populated registry.
    pub fn collect(tree: &mut DeclarationTree, filter: &'r SymbolFilter) -> SymbolRegistry {
        let mut collector = SymbolCollector::new(filter);
        walk(tree, &mut collector);
        tracing::debug!(
            known = collector.registry.len(),
            skipped = collector.skipped,
            "collected symbols"
        );
        collector.registry
    }
}

impl DeclVisitor for SymbolCollector<'_> {
    fn visit(&mut self, tree: &mut DeclarationTree, id: DeclId, event: VisitEvent) -> bool {
        if event == VisitEvent::Exit {
            return true;
        }

        let decl = tree.get(id);
        if decl.source.is_none() || decl.symbol_name.is_empty() {
            return true;
        }

        if self.filter.is_included(&decl.symbol_name) {
            self.registry.insert(&decl.symbol_name, id);
        } else {
            self.skipped += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SymbolLookup;
    use csbind_ast::DeclKind;
    use csbind_core::SourceOrigin;

    fn origin() -> Option<SourceOrigin> {
        Some(SourceOrigin::new("Scene/Node.h"))
    }

    #[test]
    fn test_collects_included_symbols() {
        let mut tree = DeclarationTree::new();
        let ns = tree.add(tree.root(), "Urho3D", DeclKind::Namespace, origin());
        tree.add(ns, "Node", DeclKind::Class, origin());
        let detail = tree.add(ns, "Detail", DeclKind::Namespace, origin());
        tree.add(detail, "Pool", DeclKind::Class, origin());

        let filter = SymbolFilter::new(&["Urho3D::**".to_string()], &["Urho3D::Detail::**".to_string()]).unwrap();
        let registry = SymbolCollector::collect(&mut tree, &filter);

        assert!(registry.has("Urho3D::Node"));
        assert!(registry.has("Urho3D::Detail"));
        assert!(!registry.has("Urho3D::Detail::Pool"));
        assert!(!registry.has("Urho3D"));
    }

    #[test]
    fn test_skips_synthesized_and_anonymous() {
        let mut tree = DeclarationTree::new();
        tree.add(tree.root(), "Generated", DeclKind::Class, None);
        tree.add(tree.root(), "", DeclKind::Class, origin());
        tree.add(tree.root(), "Scene", DeclKind::Class, origin());

        let registry = SymbolCollector::collect(&mut tree, &SymbolFilter::allow_all());

        assert_eq!(registry.len(), 1);
        assert!(registry.has("Scene"));
        assert!(!registry.has("Generated"));
        assert!(!registry.has(""));
    }
}
