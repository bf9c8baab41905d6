//! The node arena and tree-level utilities.

use crate::{Node, NodeId, NodeKind};

/// An abstract syntax tree: an arena of nodes plus the current root.
///
/// The root is optional so that a rewrite can express "the whole tree was
/// deleted" without a sentinel node. A freshly parsed capsule always has a
/// root; an [`Ast`] with no root is the absent tree.
#[derive(Debug, Default, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Ast {
    /// Create an empty arena with no root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and claim its children.
    ///
    /// Children named by `kind` must already be allocated in this arena;
    /// their parent back-references are re-pointed at the new node. The new
    /// node itself starts detached (no parent).
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node { kind, parent: None });
        for child in self.children(id) {
            self.nodes[child.index()].parent = Some(id);
        }
        id
    }

    /// The current root, if the tree is non-absent.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Install `id` as the root. The root has no parent by definition.
    pub fn set_root(&mut self, id: NodeId) {
        self.nodes[id.index()].parent = None;
        self.root = Some(id);
    }

    /// Delete the root, leaving the absent tree. Nodes stay in the arena.
    pub fn clear_root(&mut self) {
        self.root = None;
    }

    /// Borrow a node record: its variant plus its parent back-reference.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Borrow a node's variant.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Mutably borrow a node's variant (in-place rewrites, e.g. retagging a
    /// type declaration).
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }

    /// A node's parent back-reference.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Re-point a node's parent back-reference. `None` detaches the node.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.nodes[id.index()].parent = parent;
    }

    /// The children a node owns, in traversal order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.kind(id) {
            NodeKind::Capsule { body, .. } | NodeKind::Block { body } => body.clone(),
            NodeKind::Link { .. }
            | NodeKind::Symbol { .. }
            | NodeKind::NumberLiteral { .. }
            | NodeKind::StringLiteral { .. }
            | NodeKind::BooleanLiteral { .. } => Vec::new(),
            NodeKind::Assignment { left, right } => vec![*left, *right],
            NodeKind::Identifier { type_decl, .. } => type_decl.iter().copied().collect(),
            NodeKind::Enum {
                identifier,
                elements,
            } => {
                let mut children = Vec::with_capacity(elements.len() + 1);
                children.push(*identifier);
                children.extend_from_slice(elements);
                children
            }
            NodeKind::TypeDeclaration { params, .. } => params.clone(),
            NodeKind::FunctionDeclaration { parameters, body } => {
                let mut children = Vec::with_capacity(parameters.len() + 1);
                children.extend_from_slice(parameters);
                children.push(*body);
                children
            }
        }
    }

    /// All attached nodes satisfying `predicate`, in depth-first pre-order
    /// from the root. Detached arena nodes are never reported.
    pub fn find_all(&self, predicate: impl Fn(&NodeKind) -> bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        let Some(root) = self.root else {
            return found;
        };

        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            if predicate(self.kind(id)) {
                found.push(id);
            }
            let mut children = self.children(id);
            children.reverse();
            pending.extend(children);
        }
        found
    }

    /// Recursively copy a type-declaration subtree.
    ///
    /// Useful when type information must be duplicated without aliasing the
    /// original, e.g. when the type checker attaches a resolved type to a
    /// second node. The copy is parented under `parent` if one is given
    /// (the caller still splices it into the owning slot), detached
    /// otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a type declaration; handing a different variant
    /// here is a caller defect, not a recoverable condition.
    pub fn deep_copy_type_declaration(&mut self, id: NodeId, parent: Option<NodeId>) -> NodeId {
        let NodeKind::TypeDeclaration { data_type, params } = self.kind(id).clone() else {
            panic!("deep_copy_type_declaration on a non-type node");
        };

        let copied_params: Vec<NodeId> = params
            .iter()
            .map(|param| self.deep_copy_type_declaration(*param, None))
            .collect();
        let copy = self.alloc(NodeKind::TypeDeclaration {
            data_type,
            params: copied_params,
        });
        if parent.is_some() {
            self.set_parent(copy, parent);
        }
        copy
    }

    /// Number of nodes ever allocated, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
