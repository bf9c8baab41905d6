//! Abstract Syntax Tree for the Theta compiler.
//!
//! The parser produces an [`Ast`] rooted at a capsule node; the optimizer
//! rewrites it in place; the type checker and code generator consume the
//! rewritten tree. Nodes live in an arena indexed by [`NodeId`], so parent
//! back-references are plain handles rather than owning pointers, and a
//! rewrite can substitute or delete any subtree without touching the rest of
//! the arena.
//!
//! # Ownership rules
//!
//! - A node *owns* the children named by its [`NodeKind`] variant.
//! - A node's `parent` is a non-owning back-reference to its current
//!   structural owner. Any rewrite that relocates or replaces a node must
//!   update it, or drop it if the node becomes detached.
//! - Allocating a node claims its children: their parent references are
//!   re-pointed at the new node.
//!
//! Detached nodes stay in the arena but are invisible to [`Ast::find_all`],
//! which only walks the attached tree.

mod node;
mod tree;

pub use node::{Node, NodeId, NodeKind};
pub use tree::Ast;
