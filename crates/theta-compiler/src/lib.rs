//! Theta Compiler — AST optimization and symbol resolution.
//!
//! This crate is the middle end of the Theta compiler: it takes the AST the
//! parser produced for one capsule and rewrites it in place before type
//! checking and code generation run.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CompilationSession                                      │
//! │   - diagnostics collector (shared, append-only)         │
//! │   - capsule name → parsed AST link cache (write-once)   │
//! │   - ordered optimization pass list                      │
//! └─────────────────────────────────────────────────────────┘
//!                           │ optimize_ast (once per capsule)
//!                           ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │ LiteralInlinerPass                                      │
//! │   - hoists top-level bindings, unpacks enums            │
//! │   - substitutes literal-bound identifiers               │
//! │   - elides dead literal assignments                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`scope`]: layered symbol table stack with shadowed lookup
//! - [`overload`]: qualified identifiers for overloaded functions
//! - [`passes`]: the optimization pass contract and the literal inliner
//! - [`session`]: session state and the pipeline entry point

pub mod overload;
pub mod passes;
pub mod scope;
pub mod session;

pub use overload::{
    qualified_function_identifier, qualified_function_identifier_from_type_signature,
};
pub use passes::{LiteralInlinerPass, OptimizationPass, Rewrite};
pub use scope::{KeyAlreadyBound, SymbolTableStack};
pub use session::{CompilationSession, SessionOptions};

// Re-export the shared error surface for convenience.
pub use theta_core::{CompileError, Diagnostics};
