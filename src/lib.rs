//! Theta — a compiler front end for the Theta language.
//!
//! Theta source is organized into *capsules*: independently compilable
//! units that reference each other through explicit link declarations. This
//! facade crate re-exports the pieces of the front/middle end:
//!
//! - [`theta_core`]: shared vocabulary — [`DataType`], [`CompileError`],
//!   the [`Diagnostics`] collector
//! - [`theta_ast`]: the arena-based [`Ast`] the parser produces and the
//!   optimizer rewrites
//! - [`theta_compiler`]: the scope-tracking optimization pipeline and the
//!   [`CompilationSession`] that drives it
//!
//! # Example
//!
//! ```
//! use theta::{Ast, CompilationSession, NodeKind};
//!
//! // An empty capsule, as the parser would produce it.
//! let mut ast = Ast::new();
//! let capsule = ast.alloc(NodeKind::Capsule {
//!     name: "Main".into(),
//!     body: vec![],
//! });
//! ast.set_root(capsule);
//!
//! let mut session = CompilationSession::new();
//! assert!(session.optimize_ast(&mut ast, false));
//! assert!(session.encountered_errors().is_empty());
//! ```

pub use theta_ast::{Ast, Node, NodeId, NodeKind};
pub use theta_compiler::{
    CompilationSession, KeyAlreadyBound, LiteralInlinerPass, OptimizationPass, Rewrite,
    SessionOptions, SymbolTableStack, qualified_function_identifier,
    qualified_function_identifier_from_type_signature,
};
pub use theta_core::{CompileError, DataType, Diagnostics};
