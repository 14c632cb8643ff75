//! Pass orchestration.
//!
//! Collects the known symbols, builds the generator context and runs each
//! pass over the whole declaration tree in order.

use crate::context::GeneratorContext;
use crate::passes::UnknownTypesPass;
use csbind_ast::visitor::{walk, DeclVisitor};
use csbind_ast::DeclarationTree;
use csbind_diagnostics::DiagnosticCollection;
use csbind_rules::GeneratorRules;
use csbind_symbols::SymbolCollector;

/// A pass over the declaration tree.
pub trait ApiPass: DeclVisitor {
    fn name(&self) -> &'static str;

    /// Called once before the walk.
    fn start(&mut self) {}

    /// Called once after the walk.
    fn stop(&mut self) {}

    /// Drain the diagnostics the pass recorded.
    fn take_diagnostics(&mut self) -> DiagnosticCollection;
}

/// An ordered list of passes.
#[derive(Default)]
pub struct Pipeline<'a> {
    passes: Vec<Box<dyn ApiPass + 'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    pub fn add(&mut self, pass: impl ApiPass + 'a) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run every pass over the tree. Returns the diagnostics of all passes,
    /// sorted by file and location.
    pub fn run(&mut self, tree: &mut DeclarationTree) -> DiagnosticCollection {
        let mut all_diagnostics = DiagnosticCollection::new();

        for pass in &mut self.passes {
            tracing::info!("Run pass: {}", pass.name());
            pass.start();
            walk(tree, &mut **pass);
            pass.stop();
            all_diagnostics.extend(pass.take_diagnostics());
        }

        all_diagnostics.sort();
        all_diagnostics
    }
}

/// The outcome of a generator run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub diagnostics: DiagnosticCollection,
    /// Display names of every ignored declaration, in tree order.
    pub ignored: Vec<String>,
}

pub struct Generator;

impl Generator {
    /// Filter `tree` against `rules`. Declarations that cannot be bound are
    /// left in the tree and marked ignored.
    pub fn run(rules: GeneratorRules, tree: &mut DeclarationTree) -> GenerationReport {
        let symbols = SymbolCollector::collect(tree, &rules.symbols);
        let context = GeneratorContext::new(rules, symbols);

        let diagnostics = {
            let mut pipeline = Pipeline::new();
            pipeline.add(UnknownTypesPass::new(&context, &context.symbols));
            pipeline.run(tree)
        };

        let ignored = tree.ignored().map(|d| tree.display_name(d.id)).collect();
        GenerationReport { diagnostics, ignored }
    }
}
