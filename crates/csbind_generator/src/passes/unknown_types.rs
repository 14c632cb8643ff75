//! Drop declarations whose types cannot be bound.
//!
//! Functions with an unsupported return or parameter type, variables with an
//! unsupported type, operators and classes that are not known symbols are
//! marked ignored. Every newly ignored declaration gets one diagnostic.

use crate::oracle::TypeOracle;
use crate::pipeline::ApiPass;
use csbind_ast::visitor::{DeclVisitor, VisitEvent};
use csbind_ast::{CppType, DeclId, DeclKind, Declaration, DeclarationTree, Function};
use csbind_diagnostics::messages;
use csbind_diagnostics::{Diagnostic, DiagnosticCollection, DiagnosticMessage};
use csbind_symbols::SymbolLookup;

/// Why a declaration was rejected.
enum Rejection {
    Operator,
    ReturnType(String),
    ParameterType(String),
    VariableType(String),
    UnknownClass,
}

impl Rejection {
    fn message(&self) -> &'static DiagnosticMessage {
        match self {
            Rejection::Operator => &messages::IGNORE_OPERATOR,
            Rejection::ReturnType(_) => &messages::IGNORE_UNKNOWN_RETURN_TYPE,
            Rejection::ParameterType(_) => &messages::IGNORE_UNKNOWN_PARAMETER_TYPE,
            Rejection::VariableType(_) => &messages::IGNORE_UNKNOWN_VARIABLE_TYPE,
            Rejection::UnknownClass => &messages::IGNORE_UNKNOWN_CLASS,
        }
    }

    fn offending_type(&self) -> Option<&str> {
        match self {
            Rejection::ReturnType(ty) | Rejection::ParameterType(ty) | Rejection::VariableType(ty) => Some(ty),
            Rejection::Operator | Rejection::UnknownClass => None,
        }
    }
}

pub struct UnknownTypesPass<'a> {
    types: &'a dyn TypeOracle,
    symbols: &'a dyn SymbolLookup,
    diagnostics: DiagnosticCollection,
}

impl<'a> UnknownTypesPass<'a> {
    pub fn new(types: &'a dyn TypeOracle, symbols: &'a dyn SymbolLookup) -> Self {
        Self {
            types,
            symbols,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    fn check_type(&self, ty: &CppType) -> Result<(), String> {
        if self.types.is_acceptable_type(ty) {
            Ok(())
        } else {
            Err(ty.to_string())
        }
    }

    /// Return type first, then parameters in order. Stops at the first
    /// rejected type.
    fn check_function(&self, func: &Function) -> Option<Rejection> {
        if let Some(return_type) = func.return_type() {
            if let Err(ty) = self.check_type(return_type) {
                return Some(Rejection::ReturnType(ty));
            }
        }
        func.parameters
            .iter()
            .find_map(|param| self.check_type(&param.ty).err())
            .map(Rejection::ParameterType)
    }

    fn evaluate(&self, decl: &Declaration) -> Option<Rejection> {
        match &decl.kind {
            DeclKind::Function(_) if decl.name.starts_with("operator") => Some(Rejection::Operator),
            DeclKind::Function(func) => self.check_function(func),
            DeclKind::Variable(var) => self.check_type(&var.ty).err().map(Rejection::VariableType),
            DeclKind::Class if !self.symbols.has(&decl.symbol_name) => Some(Rejection::UnknownClass),
            _ => None,
        }
    }

    fn report(&mut self, name: &str, decl: &Declaration, rejection: &Rejection) {
        let mut args = vec![name];
        args.extend(rejection.offending_type());

        let message = rejection.message();
        let diagnostic = match &decl.source {
            Some(origin) => Diagnostic::at_origin(origin, message, &args),
            None => Diagnostic::new(message, &args),
        };
        tracing::trace!("{}", diagnostic.message_text);
        self.diagnostics.add(diagnostic);
    }
}

impl DeclVisitor for UnknownTypesPass<'_> {
    fn visit(&mut self, tree: &mut DeclarationTree, id: DeclId, event: VisitEvent) -> bool {
        if event == VisitEvent::Exit {
            return true;
        }

        let decl = tree.get(id);
        if decl.source.is_none() || decl.is_ignored() {
            return true;
        }

        if let Some(rejection) = self.evaluate(decl) {
            self.report(&tree.display_name(id), decl, &rejection);
            tree.get_mut(id).ignore();
        }
        true
    }
}

impl ApiPass for UnknownTypesPass<'_> {
    fn name(&self) -> &'static str {
        "UnknownTypesPass"
    }

    fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }
}
