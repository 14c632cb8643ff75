//! Declaration tree traversal.
//!
//! Containers (namespaces, classes, enums, templates) are visited twice,
//! once on entry before their children and once on exit after them. Every
//! other declaration is visited once as a leaf.

use crate::decl::{DeclId, DeclarationTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitEvent {
    Enter,
    Exit,
    Leaf,
}

/// A visitor over the declaration tree. Visitors receive the tree mutably
/// and address the current node by ID.
pub trait DeclVisitor {
    /// Returning `false` from an `Enter` visit skips the node's children
    /// and its `Exit` visit. The return value of other events is ignored.
    fn visit(&mut self, tree: &mut DeclarationTree, id: DeclId, event: VisitEvent) -> bool;
}

/// Walk the whole tree in pre-order, starting at the root.
pub fn walk<V: DeclVisitor + ?Sized>(tree: &mut DeclarationTree, visitor: &mut V) {
    let root = tree.root();
    walk_from(tree, root, visitor);
}

/// Walk the subtree rooted at `id` in pre-order.
pub fn walk_from<V: DeclVisitor + ?Sized>(tree: &mut DeclarationTree, id: DeclId, visitor: &mut V) {
    if !tree.get(id).kind.is_container() {
        visitor.visit(tree, id, VisitEvent::Leaf);
        return;
    }

    if visitor.visit(tree, id, VisitEvent::Enter) {
        // Iterate over a snapshot so visitors may append children.
        let children = tree.get(id).children.clone();
        for child in children {
            walk_from(tree, child, visitor);
        }
        visitor.visit(tree, id, VisitEvent::Exit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{DeclKind, Function, Variable};
    use crate::types::{BuiltinKind, CppType};

    struct Recorder {
        events: Vec<(String, VisitEvent)>,
        skip: Option<&'static str>,
    }

    impl DeclVisitor for Recorder {
        fn visit(&mut self, tree: &mut DeclarationTree, id: DeclId, event: VisitEvent) -> bool {
            let decl = tree.get(id);
            self.events.push((decl.name.clone(), event));
            self.skip != Some(decl.name.as_str())
        }
    }

    fn sample_tree() -> DeclarationTree {
        let mut tree = DeclarationTree::new();
        let ns = tree.add(tree.root(), "Urho3D", DeclKind::Namespace, None);
        let class = tree.add(ns, "Node", DeclKind::Class, None);
        tree.add(
            class,
            "id_",
            DeclKind::Variable(Variable { ty: CppType::builtin(BuiltinKind::UInt), member: true }),
            None,
        );
        tree.add(
            ns,
            "Init",
            DeclKind::Function(Function::free(CppType::builtin(BuiltinKind::Void), vec![])),
            None,
        );
        tree
    }

    #[test]
    fn test_walk_order_and_events() {
        let mut tree = sample_tree();
        let mut recorder = Recorder { events: Vec::new(), skip: None };
        walk(&mut tree, &mut recorder);

        let events: Vec<_> = recorder.events.iter().map(|(n, e)| (n.as_str(), *e)).collect();
        assert_eq!(
            events,
            vec![
                ("", VisitEvent::Enter),
                ("Urho3D", VisitEvent::Enter),
                ("Node", VisitEvent::Enter),
                ("id_", VisitEvent::Leaf),
                ("Node", VisitEvent::Exit),
                ("Init", VisitEvent::Leaf),
                ("Urho3D", VisitEvent::Exit),
                ("", VisitEvent::Exit),
            ]
        );
    }

    #[test]
    fn test_declining_enter_skips_children() {
        let mut tree = sample_tree();
        let mut recorder = Recorder { events: Vec::new(), skip: Some("Node") };
        walk(&mut tree, &mut recorder);

        let names: Vec<_> = recorder.events.iter().map(|(n, _)| n.as_str()).collect();
        assert!(!names.contains(&"id_"));
        assert_eq!(names.iter().filter(|n| **n == "Node").count(), 1);
        assert!(names.contains(&"Init"));
    }
}
