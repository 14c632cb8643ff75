//! Shared generator state: the loaded rules and the known symbols.

use crate::oracle::TypeOracle;
use csbind_ast::CppType;
use csbind_rules::{GeneratorRules, TypeMap};
use csbind_symbols::{SymbolLookup, SymbolRegistry};

#[derive(Debug)]
pub struct GeneratorContext {
    pub rules: GeneratorRules,
    pub symbols: SymbolRegistry,
}

impl GeneratorContext {
    pub fn new(rules: GeneratorRules, symbols: SymbolRegistry) -> Self {
        Self { rules, symbols }
    }

    /// The hand-written mapping for `ty`, looked up by its exact spelling
    /// first and by the spelling of its base type second.
    pub fn type_map(&self, ty: &CppType) -> Option<&TypeMap> {
        self.rules
            .type_map(&ty.to_string())
            .or_else(|| self.rules.type_map(&ty.base_type().to_string()))
    }

    /// The class wrapped by a smart pointer, e.g. `Urho3D::Node` for
    /// `SharedPtr<Urho3D::Node>`. Empty for every other type.
    pub fn template_subtype(&self, ty: &CppType) -> String {
        match ty.base_type() {
            CppType::TemplateInstantiation { template, arguments } if self.rules.is_smart_pointer(template) => {
                arguments.first().map(CppType::type_name).unwrap_or_default()
            }
            _ => String::new(),
        }
    }
}

fn is_pinvokable(ty: &CppType) -> bool {
    match ty {
        CppType::Builtin(kind) => kind.is_pinvokable(),
        CppType::CvQualified { inner, .. } | CppType::Pointer(inner) | CppType::Reference { inner, .. } => {
            is_pinvokable(inner)
        }
        _ => false,
    }
}

impl TypeOracle for GeneratorContext {
    fn is_acceptable_type(&self, ty: &CppType) -> bool {
        if ty.is_builtin() || self.type_map(ty).is_some() {
            return true;
        }

        if let CppType::TemplateInstantiation { .. } = ty {
            return self.symbols.has(&self.template_subtype(ty));
        }

        is_pinvokable(ty) || self.symbols.has(&ty.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csbind_ast::{BuiltinKind, DeclId};

    fn context() -> GeneratorContext {
        let rules = GeneratorRules::from_json(
            r#"{ "typemaps": [ { "type": "Urho3D::String", "ptype": "string" } ] }"#,
        )
        .unwrap();
        let mut symbols = SymbolRegistry::new();
        symbols.insert("Urho3D::Node", DeclId(1));
        GeneratorContext::new(rules, symbols)
    }

    #[test]
    fn test_builtins_are_acceptable() {
        let ctx = context();
        assert!(ctx.is_acceptable_type(&CppType::builtin(BuiltinKind::Int)));
        assert!(ctx.is_acceptable_type(&CppType::builtin(BuiltinKind::WChar)));
    }

    #[test]
    fn test_type_maps_match_spelling_or_base() {
        let ctx = context();
        let string = CppType::user("Urho3D::String");
        assert!(ctx.is_acceptable_type(&string));
        assert!(ctx.is_acceptable_type(&CppType::reference_to(CppType::const_of(string.clone()))));
        assert_eq!(ctx.type_map(&CppType::pointer_to(string)).unwrap().pinvoke_type, "string");
    }

    #[test]
    fn test_smart_pointers_need_a_known_subtype() {
        let ctx = context();
        let node = CppType::template("SharedPtr", vec![CppType::user("Urho3D::Node")]);
        let scene = CppType::template("WeakPtr", vec![CppType::user("Urho3D::Scene")]);
        let vector = CppType::template("Vector", vec![CppType::user("Urho3D::Node")]);

        assert_eq!(ctx.template_subtype(&node), "Urho3D::Node");
        assert!(ctx.is_acceptable_type(&node));
        assert!(!ctx.is_acceptable_type(&scene));
        assert_eq!(ctx.template_subtype(&vector), "");
        assert!(!ctx.is_acceptable_type(&vector));
    }

    #[test]
    fn test_pinvokable_pointers() {
        let ctx = context();
        assert!(ctx.is_acceptable_type(&CppType::pointer_to(CppType::const_of(CppType::builtin(
            BuiltinKind::Char
        )))));
        assert!(!ctx.is_acceptable_type(&CppType::pointer_to(CppType::builtin(BuiltinKind::Char16))));
    }

    #[test]
    fn test_known_classes_through_indirection() {
        let ctx = context();
        assert!(ctx.is_acceptable_type(&CppType::pointer_to(CppType::user("Urho3D::Node"))));
        assert!(!ctx.is_acceptable_type(&CppType::pointer_to(CppType::user("Urho3D::Context"))));
        assert!(!ctx.is_acceptable_type(&CppType::Unexposed("std::function<void()>".to_string())));
    }
}
