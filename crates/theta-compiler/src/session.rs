//! Compilation session state and the pipeline entry point.
//!
//! All state shared across passes and capsules — the diagnostics collector
//! and the capsule-name → parsed-AST link cache — is owned by one
//! [`CompilationSession`] created at session start and passed by reference
//! through the pipeline. Nothing here is ambient or global; dropping the
//! session drops the run.

use rustc_hash::FxHashMap;
use theta_ast::Ast;
use theta_core::{CompileError, Diagnostics};

use crate::passes::{LiteralInlinerPass, OptimizationPass};

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Stop running later passes as soon as one pass reports failure. Off by
    /// default: a failed pass is recorded and the rest still get their
    /// chance at the tree.
    pub abort_on_pass_failure: bool,
}

/// One compilation run's worth of shared state.
pub struct CompilationSession {
    diagnostics: Diagnostics,
    parsed_links: FxHashMap<String, Ast>,
    passes: Vec<Box<dyn OptimizationPass>>,
    options: SessionOptions,
}

impl CompilationSession {
    /// A session with the default pass pipeline and default options.
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    /// A session with the default pass pipeline.
    ///
    /// Passes run in the declared order, once per capsule AST.
    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            diagnostics: Diagnostics::new(),
            parsed_links: FxHashMap::default(),
            passes: vec![Box::new(LiteralInlinerPass::new())],
            options,
        }
    }

    /// Append a recoverable error to the shared collector.
    pub fn add_error(&mut self, error: CompileError) {
        self.diagnostics.add(error);
    }

    /// All errors collected so far, in insertion order.
    pub fn encountered_errors(&self) -> &[CompileError] {
        self.diagnostics.encountered()
    }

    /// Reset the collector between independent compilation runs. Never
    /// called implicitly.
    pub fn clear_errors(&mut self) {
        self.diagnostics.clear();
    }

    /// The cached parsed AST for a capsule, if one was already built.
    pub fn parsed_link_ast(&self, capsule_name: &str) -> Option<&Ast> {
        self.parsed_links.get(capsule_name)
    }

    /// Memoize a capsule's parsed AST.
    ///
    /// The cache is write-once per capsule name: if the name is already
    /// cached the existing AST is kept and returned, so a second build
    /// request can never produce a divergent tree for the same capsule.
    pub fn add_parsed_link_ast(&mut self, capsule_name: impl Into<String>, ast: Ast) -> &Ast {
        self.parsed_links.entry(capsule_name.into()).or_insert(ast)
    }

    /// Run the optimization pipeline over one capsule AST, in place.
    ///
    /// Returns `true` when every pass completed and the run collected no new
    /// diagnostics. `silence_errors` suppresses the stderr report of newly
    /// collected diagnostics; it never suppresses their collection.
    pub fn optimize_ast(&mut self, ast: &mut Ast, silence_errors: bool) -> bool {
        let already_collected = self.diagnostics.len();
        let mut all_passed = true;

        for pass in &mut self.passes {
            if !pass.run(ast, &mut self.diagnostics) {
                all_passed = false;
                if !silence_errors {
                    eprintln!("optimization pass `{}` failed", pass.name());
                }
                if self.options.abort_on_pass_failure {
                    break;
                }
            }
        }

        let new_errors = &self.diagnostics.encountered()[already_collected..];
        if !silence_errors {
            for error in new_errors {
                eprintln!("{error}");
            }
        }

        all_passed && new_errors.is_empty()
    }
}

impl Default for CompilationSession {
    fn default() -> Self {
        Self::new()
    }
}
