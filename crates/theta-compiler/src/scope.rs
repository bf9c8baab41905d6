//! Layered scope storage for the optimization passes.
//!
//! A [`SymbolTableStack`] is a stack of binding frames. Lookup walks frames
//! from innermost to outermost, so an inner frame shadows an outer one.
//! Insertion only ever targets the top frame, and a key already bound in
//! that frame is a failure the caller decides how to report — bindings are
//! immutable once inserted and are never overwritten.
//!
//! The literal inliner keeps two independent stacks: a *hoisted* stack
//! holding a capsule's forward-visible top-level bindings, and a *local*
//! stack entered and exited per lexical block. Lookup policy is local first,
//! hoisted as the fallback.

use rustc_hash::FxHashMap;
use theta_ast::NodeId;
use thiserror::Error;

/// Returned by [`SymbolTableStack::insert`] when the key is already bound in
/// the top frame. Carries the existing binding so callers can inspect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("key is already bound in the current scope frame")]
pub struct KeyAlreadyBound {
    /// The node the key was previously bound to.
    pub existing: NodeId,
}

/// A stack of scope frames mapping identifier keys to AST nodes.
#[derive(Debug, Default)]
pub struct SymbolTableStack {
    frames: Vec<FxHashMap<String, NodeId>>,
}

impl SymbolTableStack {
    /// Create a stack with no frames. Callers push the base frame with
    /// [`enter_scope`](Self::enter_scope).
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new, empty binding frame.
    pub fn enter_scope(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    /// Pop the most recently pushed frame.
    ///
    /// # Panics
    ///
    /// Panics if no frame is on the stack. Traversals enter and exit scopes
    /// in matched pairs; an unbalanced exit is a walker defect.
    pub fn exit_scope(&mut self) {
        assert!(
            self.frames.pop().is_some(),
            "exit_scope on an empty symbol table stack"
        );
    }

    /// Bind `key` in the top frame.
    ///
    /// Fails without modifying the existing binding if `key` is already
    /// bound in that frame. A key bound in an *outer* frame is shadowed, not
    /// a collision.
    ///
    /// # Panics
    ///
    /// Panics if no frame has been entered.
    pub fn insert(&mut self, key: impl Into<String>, node: NodeId) -> Result<(), KeyAlreadyBound> {
        let frame = self
            .frames
            .last_mut()
            .unwrap_or_else(|| panic!("insert with no scope frame entered"));

        match frame.entry(key.into()) {
            std::collections::hash_map::Entry::Occupied(entry) => Err(KeyAlreadyBound {
                existing: *entry.get(),
            }),
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(node);
                Ok(())
            }
        }
    }

    /// Find the innermost binding for `key`, if any.
    pub fn lookup(&self, key: &str) -> Option<NodeId> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(key).copied())
    }

    /// Number of frames currently on the stack.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
