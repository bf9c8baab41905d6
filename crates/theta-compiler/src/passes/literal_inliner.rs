//! Literal inlining: constant propagation and enum desugaring.
//!
//! Variables and enum elements whose values are known at compile time are
//! folded away before type checking, shrinking the tree and the work of
//! every downstream phase:
//!
//! - Top-level declarations are *hoisted* once per capsule so they are
//!   visible before their lexical position. Hoisted enums are removed from
//!   the capsule body; hoisted assignments stay, since they are the
//!   capsule's externally visible declarations.
//! - Enums are *unpacked*: each element binds `Base.element` to its
//!   zero-based index, and the bare enum name binds to a `Number` type
//!   declaration so later type references to the enum collapse to the
//!   primitive.
//! - Identifier uses that resolve to a literal binding are substituted with
//!   a fresh copy of the literal.
//! - A block-local assignment of a literal matching its declared type is
//!   deleted once bound, unless it is the last statement of its block (the
//!   block's value).
//!
//! Scope state lives in two independent stacks — hoisted and local, with
//! local shadowing hoisted — both rebuilt from scratch on every run, so
//! re-running over an already-optimized tree changes nothing.

use theta_ast::{Ast, NodeId, NodeKind};
use theta_core::{CompileError, DataType, Diagnostics};

use crate::overload;
use crate::passes::{OptimizationPass, Rewrite};
use crate::scope::SymbolTableStack;

/// Which of the pass's two stacks a binding goes into.
#[derive(Debug, Clone, Copy)]
enum ScopeTarget {
    Hoisted,
    Local,
}

/// The literal inlining pass. See the module docs for the algorithm.
#[derive(Debug, Default)]
pub struct LiteralInlinerPass {
    hoisted: SymbolTableStack,
    local: SymbolTableStack,
}

impl LiteralInlinerPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth-first visit. Children are rewritten before the node itself, so
    /// by the time an assignment is bound its right-hand side has already
    /// been substituted where possible.
    fn visit(
        &mut self,
        ast: &mut Ast,
        id: NodeId,
        diagnostics: &mut Diagnostics,
        capsule_child: bool,
    ) -> Rewrite {
        let owns_scope = matches!(
            ast.kind(id),
            NodeKind::Capsule { .. } | NodeKind::Block { .. } | NodeKind::FunctionDeclaration { .. }
        );
        if owns_scope {
            self.local.enter_scope();
        }
        if matches!(ast.kind(id), NodeKind::Capsule { .. }) {
            self.hoist_capsule(ast, id, diagnostics);
        }

        self.visit_children(ast, id, diagnostics);
        let rewrite = self.rewrite_node(ast, id, diagnostics, capsule_child);

        if owns_scope {
            self.local.exit_scope();
        }
        rewrite
    }

    fn visit_children(&mut self, ast: &mut Ast, id: NodeId, diagnostics: &mut Diagnostics) {
        match ast.kind(id) {
            NodeKind::Capsule { .. } => self.visit_body(ast, id, diagnostics, true),
            NodeKind::Block { .. } => self.visit_body(ast, id, diagnostics, false),
            NodeKind::Assignment { left, right } => {
                let (left, right) = (*left, *right);
                let rewrite = self.visit(ast, left, diagnostics, false);
                splice_assignment_left(ast, id, left, rewrite);
                let rewrite = self.visit(ast, right, diagnostics, false);
                splice_assignment_right(ast, id, right, rewrite);
            }
            NodeKind::Identifier {
                type_decl: Some(annotation),
                ..
            } => {
                let annotation = *annotation;
                let rewrite = self.visit(ast, annotation, diagnostics, false);
                splice_identifier_annotation(ast, id, annotation, rewrite);
            }
            NodeKind::Enum { elements, .. } => {
                // Element symbols produce no rewrites; the base identifier
                // is a declaration name, not a use, and is left unvisited.
                for element in elements.clone() {
                    let rewrite = self.visit(ast, element, diagnostics, false);
                    debug_assert_eq!(rewrite, Rewrite::Keep);
                }
            }
            NodeKind::TypeDeclaration { params, .. } => {
                for param in params.clone() {
                    let rewrite = self.visit(ast, param, diagnostics, false);
                    debug_assert_eq!(rewrite, Rewrite::Keep);
                }
            }
            NodeKind::FunctionDeclaration { parameters, body } => {
                let (parameters, body) = (parameters.clone(), *body);
                for parameter in parameters {
                    let rewrite = self.visit(ast, parameter, diagnostics, false);
                    debug_assert_eq!(rewrite, Rewrite::Keep);
                }
                let rewrite = self.visit(ast, body, diagnostics, false);
                splice_function_body(ast, id, body, rewrite);
            }
            NodeKind::Identifier { type_decl: None, .. }
            | NodeKind::Link { .. }
            | NodeKind::Symbol { .. }
            | NodeKind::NumberLiteral { .. }
            | NodeKind::StringLiteral { .. }
            | NodeKind::BooleanLiteral { .. } => {}
        }
    }

    /// Rewrite an ordered body, splicing each child's result. The arena's
    /// copy of the sequence stays untouched until every child has been
    /// visited, so position checks (last statement) see the original order.
    fn visit_body(
        &mut self,
        ast: &mut Ast,
        owner: NodeId,
        diagnostics: &mut Diagnostics,
        capsule_child: bool,
    ) {
        let body = match ast.kind(owner) {
            NodeKind::Capsule { body, .. } | NodeKind::Block { body } => body.clone(),
            _ => unreachable!("visit_body on a node without a body"),
        };

        let mut rewritten = Vec::with_capacity(body.len());
        for child in body {
            match self.visit(ast, child, diagnostics, capsule_child) {
                Rewrite::Keep => rewritten.push(child),
                Rewrite::Replace(new) => {
                    ast.set_parent(new, Some(owner));
                    ast.set_parent(child, None);
                    rewritten.push(new);
                }
                Rewrite::Remove => ast.set_parent(child, None),
            }
        }

        match ast.kind_mut(owner) {
            NodeKind::Capsule { body, .. } | NodeKind::Block { body } => *body = rewritten,
            _ => unreachable!("visit_body on a node without a body"),
        }
    }

    /// Node-kind dispatch, run after a node's children have been rewritten.
    fn rewrite_node(
        &mut self,
        ast: &mut Ast,
        id: NodeId,
        diagnostics: &mut Diagnostics,
        capsule_child: bool,
    ) -> Rewrite {
        match ast.kind(id) {
            NodeKind::Identifier { .. } => self.substitute_identifier(ast, id),
            NodeKind::TypeDeclaration { .. } => {
                self.remap_enum_type_reference(ast, id);
                Rewrite::Keep
            }
            NodeKind::Enum { .. } => {
                // A nested enum's information moves entirely into scope
                // bindings; the node itself is deleted.
                self.unpack_enum(ast, id, ScopeTarget::Local, diagnostics);
                Rewrite::Remove
            }
            NodeKind::Assignment { .. } if !capsule_child => {
                let bound = self.bind_assignment(ast, id, ScopeTarget::Local, diagnostics);
                if bound && should_elide(ast, id) {
                    Rewrite::Remove
                } else {
                    Rewrite::Keep
                }
            }
            _ => Rewrite::Keep,
        }
    }

    /// Hoisting: one walk over the capsule's top-level declarations before
    /// traversal, so every top-level binding is visible capsule-wide
    /// regardless of lexical position.
    fn hoist_capsule(&mut self, ast: &mut Ast, capsule: NodeId, diagnostics: &mut Diagnostics) {
        self.hoisted.enter_scope();

        let body = match ast.kind(capsule) {
            NodeKind::Capsule { body, .. } => body.clone(),
            _ => unreachable!("hoisting starts at a capsule"),
        };
        let mut remove_at = Vec::new();

        for (index, declaration) in body.iter().enumerate() {
            match ast.kind(*declaration) {
                NodeKind::Enum { .. } => {
                    self.unpack_enum(ast, *declaration, ScopeTarget::Hoisted, diagnostics);
                    // Enums are purely symbolic; nothing of them reaches
                    // code generation.
                    remove_at.push(index);
                }
                NodeKind::Assignment { .. } => {
                    // Bound but kept: top-level assignments are the
                    // capsule's externally visible declarations.
                    self.bind_assignment(ast, *declaration, ScopeTarget::Hoisted, diagnostics);
                }
                _ => {}
            }
        }

        // Remove marked indices in reverse so earlier indices stay valid.
        let mut rewritten = body;
        for index in remove_at.iter().rev() {
            ast.set_parent(rewritten[*index], None);
            rewritten.remove(*index);
        }
        match ast.kind_mut(capsule) {
            NodeKind::Capsule { body, .. } => *body = rewritten,
            _ => unreachable!("hoisting starts at a capsule"),
        }
    }

    /// Enum unpacking: `Base.element` → zero-based index literal for each
    /// element in declaration order, then `Base` → `Number` type alias.
    fn unpack_enum(
        &mut self,
        ast: &mut Ast,
        enum_id: NodeId,
        target: ScopeTarget,
        diagnostics: &mut Diagnostics,
    ) {
        let NodeKind::Enum {
            identifier,
            elements,
        } = ast.kind(enum_id)
        else {
            unreachable!("unpack_enum on a non-enum node");
        };
        let (identifier, elements) = (*identifier, elements.clone());
        let NodeKind::Identifier { name: base, .. } = ast.kind(identifier) else {
            unreachable!("an enum's base is always an identifier");
        };
        let base = base.clone();

        for (index, element) in elements.iter().enumerate() {
            let key = {
                let NodeKind::Symbol { name } = ast.kind(*element) else {
                    unreachable!("enum elements are always symbols");
                };
                // The leading sigil is spelling, not identity.
                format!("{base}.{}", name.strip_prefix(':').unwrap_or(name))
            };
            let literal = ast.alloc(NodeKind::NumberLiteral {
                value: (index as f64).into(),
            });
            if self.scope_mut(target).insert(key.clone(), literal).is_err() {
                diagnostics.add(CompileError::illegal_reassignment(key));
                // Already-unpacked elements stay bound; the rest of this
                // enum, including its type alias, is abandoned.
                return;
            }
        }

        // The bare enum name resolves to a Number type declaration, which is
        // what lets later type references to the enum collapse to the
        // primitive.
        let alias = ast.alloc(NodeKind::TypeDeclaration {
            data_type: DataType::Number,
            params: vec![],
        });
        if self.scope_mut(target).insert(base.clone(), alias).is_err() {
            diagnostics.add(CompileError::illegal_reassignment(base));
        }
    }

    /// Binding rule for assignments: functions bind under their qualified
    /// identifier so overloads coexist, everything else under the plain
    /// name. Returns whether the insertion took.
    fn bind_assignment(
        &mut self,
        ast: &Ast,
        id: NodeId,
        target: ScopeTarget,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let NodeKind::Assignment { left, right } = ast.kind(id) else {
            unreachable!("bind_assignment on a non-assignment node");
        };
        let (left, right) = (*left, *right);
        let NodeKind::Identifier { name, .. } = ast.kind(left) else {
            unreachable!("an assignment's target is always an identifier");
        };
        let name = name.clone();

        let key = if matches!(ast.kind(right), NodeKind::FunctionDeclaration { .. }) {
            overload::qualified_function_identifier(&name, right, ast)
        } else {
            name.clone()
        };

        match self.scope_mut(target).insert(key, right) {
            Ok(()) => true,
            Err(_) => {
                // The diagnostic names the plain identifier, even when the
                // colliding key was a qualified function identifier.
                diagnostics.add(CompileError::illegal_reassignment(name));
                false
            }
        }
    }

    /// Substitute an identifier use with a fresh copy of the literal it is
    /// bound to. Declaration-site identifiers (those carrying a type
    /// annotation) and identifiers bound to non-literals are left alone.
    fn substitute_identifier(&mut self, ast: &mut Ast, id: NodeId) -> Rewrite {
        let NodeKind::Identifier { name, type_decl } = ast.kind(id) else {
            unreachable!("substitute_identifier on a non-identifier node");
        };
        if let Some(annotation) = type_decl {
            if matches!(ast.kind(*annotation), NodeKind::TypeDeclaration { .. }) {
                return Rewrite::Keep;
            }
        }
        let name = name.clone();

        let Some(found) = self.lookup_in_scope(&name) else {
            return Rewrite::Keep;
        };
        if !ast.kind(found).is_literal() {
            return Rewrite::Keep;
        }

        // Always a fresh copy: the binding is shared by every use site and
        // must never be mutated through one of them.
        let literal = ast.kind(found).clone();
        Rewrite::Replace(ast.alloc(literal))
    }

    /// Rewrite a type reference to an unpacked enum into the primitive the
    /// enum desugars to.
    fn remap_enum_type_reference(&mut self, ast: &mut Ast, id: NodeId) {
        let NodeKind::TypeDeclaration { data_type, .. } = ast.kind(id) else {
            unreachable!("remap_enum_type_reference on a non-type node");
        };
        let DataType::Named(alias) = data_type else {
            return;
        };
        let alias = alias.clone();

        let Some(found) = self.lookup_in_scope(&alias) else {
            return;
        };
        let NodeKind::TypeDeclaration {
            data_type: resolved,
            ..
        } = ast.kind(found)
        else {
            return;
        };
        let resolved = resolved.clone();

        let NodeKind::TypeDeclaration { data_type, .. } = ast.kind_mut(id) else {
            unreachable!("remap_enum_type_reference on a non-type node");
        };
        *data_type = resolved;
    }

    /// Lookup policy: local scope shadows hoisted scope.
    fn lookup_in_scope(&self, key: &str) -> Option<NodeId> {
        self.local.lookup(key).or_else(|| self.hoisted.lookup(key))
    }

    fn scope_mut(&mut self, target: ScopeTarget) -> &mut SymbolTableStack {
        match target {
            ScopeTarget::Hoisted => &mut self.hoisted,
            ScopeTarget::Local => &mut self.local,
        }
    }
}

impl OptimizationPass for LiteralInlinerPass {
    fn name(&self) -> &'static str {
        "literal-inliner"
    }

    fn run(&mut self, ast: &mut Ast, diagnostics: &mut Diagnostics) -> bool {
        // Scope state is re-derived from scratch on every invocation so a
        // re-run can never double-apply hoisting.
        self.hoisted = SymbolTableStack::new();
        self.local = SymbolTableStack::new();

        let Some(root) = ast.root() else {
            return true;
        };
        match self.visit(ast, root, diagnostics, false) {
            Rewrite::Keep => {}
            Rewrite::Replace(new_root) => ast.set_root(new_root),
            Rewrite::Remove => ast.clear_root(),
        }
        true
    }
}

/// Whether a bound assignment can be deleted: its right-hand side is a
/// literal matching the declared type exactly, and it is not the final
/// statement of its enclosing block (the block's value).
fn should_elide(ast: &Ast, id: NodeId) -> bool {
    if !is_literal_assignment(ast, id) {
        return false;
    }
    if let Some(parent) = ast.parent(id) {
        if let NodeKind::Block { body } = ast.kind(parent) {
            if body.last() == Some(&id) {
                return false;
            }
        }
    }
    true
}

fn is_literal_assignment(ast: &Ast, id: NodeId) -> bool {
    let NodeKind::Assignment { left, right } = ast.kind(id) else {
        return false;
    };
    let NodeKind::Identifier {
        type_decl: Some(annotation),
        ..
    } = ast.kind(*left)
    else {
        return false;
    };
    let NodeKind::TypeDeclaration { data_type, .. } = ast.kind(*annotation) else {
        return false;
    };
    ast.kind(*right).literal_matches(data_type)
}

fn splice_assignment_left(ast: &mut Ast, owner: NodeId, old: NodeId, rewrite: Rewrite) {
    let Rewrite::Replace(new) = rewrite else {
        expect_kept(rewrite, "assignment target");
        return;
    };
    let NodeKind::Assignment { left, .. } = ast.kind_mut(owner) else {
        unreachable!("splicing into a non-assignment node");
    };
    *left = new;
    ast.set_parent(new, Some(owner));
    ast.set_parent(old, None);
}

fn splice_assignment_right(ast: &mut Ast, owner: NodeId, old: NodeId, rewrite: Rewrite) {
    let Rewrite::Replace(new) = rewrite else {
        expect_kept(rewrite, "assignment value");
        return;
    };
    let NodeKind::Assignment { right, .. } = ast.kind_mut(owner) else {
        unreachable!("splicing into a non-assignment node");
    };
    *right = new;
    ast.set_parent(new, Some(owner));
    ast.set_parent(old, None);
}

fn splice_identifier_annotation(ast: &mut Ast, owner: NodeId, old: NodeId, rewrite: Rewrite) {
    let Rewrite::Replace(new) = rewrite else {
        expect_kept(rewrite, "type annotation");
        return;
    };
    let NodeKind::Identifier { type_decl, .. } = ast.kind_mut(owner) else {
        unreachable!("splicing into a non-identifier node");
    };
    *type_decl = Some(new);
    ast.set_parent(new, Some(owner));
    ast.set_parent(old, None);
}

fn splice_function_body(ast: &mut Ast, owner: NodeId, old: NodeId, rewrite: Rewrite) {
    let Rewrite::Replace(new) = rewrite else {
        expect_kept(rewrite, "function body");
        return;
    };
    let NodeKind::FunctionDeclaration { body, .. } = ast.kind_mut(owner) else {
        unreachable!("splicing into a non-function node");
    };
    *body = new;
    ast.set_parent(new, Some(owner));
    ast.set_parent(old, None);
}

/// Single-child slots can be substituted but never emptied; `Remove` here
/// means a walker defect, not a recoverable condition.
fn expect_kept(rewrite: Rewrite, slot: &str) {
    assert!(
        rewrite != Rewrite::Remove,
        "removal from a single-child slot ({slot})"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    fn number(ast: &mut Ast, value: f64) -> NodeId {
        ast.alloc(NodeKind::NumberLiteral {
            value: OrderedFloat(value),
        })
    }

    fn type_decl(ast: &mut Ast, data_type: DataType) -> NodeId {
        ast.alloc(NodeKind::TypeDeclaration {
            data_type,
            params: vec![],
        })
    }

    fn declaration(ast: &mut Ast, name: &str, data_type: DataType, right: NodeId) -> NodeId {
        let annotation = type_decl(ast, data_type);
        let left = ast.alloc(NodeKind::Identifier {
            name: name.into(),
            type_decl: Some(annotation),
        });
        ast.alloc(NodeKind::Assignment { left, right })
    }

    fn use_of(ast: &mut Ast, name: &str) -> NodeId {
        ast.alloc(NodeKind::Identifier {
            name: name.into(),
            type_decl: None,
        })
    }

    fn enum_decl(ast: &mut Ast, name: &str, elements: &[&str]) -> NodeId {
        let identifier = use_of(ast, name);
        let elements = elements
            .iter()
            .map(|element| {
                ast.alloc(NodeKind::Symbol {
                    name: format!(":{element}"),
                })
            })
            .collect();
        ast.alloc(NodeKind::Enum {
            identifier,
            elements,
        })
    }

    fn capsule(ast: &mut Ast, body: Vec<NodeId>) -> NodeId {
        let capsule = ast.alloc(NodeKind::Capsule {
            name: "Test".into(),
            body,
        });
        ast.set_root(capsule);
        capsule
    }

    fn run(ast: &mut Ast) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let mut pass = LiteralInlinerPass::new();
        assert!(pass.run(ast, &mut diagnostics));
        diagnostics
    }

    fn body_of(ast: &Ast, id: NodeId) -> Vec<NodeId> {
        match ast.kind(id) {
            NodeKind::Capsule { body, .. } | NodeKind::Block { body } => body.clone(),
            other => panic!("no body on {other:?}"),
        }
    }

    #[test]
    fn hoisted_enum_is_removed_from_capsule_body() {
        let mut ast = Ast::new();
        let colors = enum_decl(&mut ast, "Color", &["red", "green"]);
        let five = number(&mut ast, 5.0);
        let x = declaration(&mut ast, "x", DataType::Number, five);
        let root = capsule(&mut ast, vec![colors, x]);

        let diagnostics = run(&mut ast);
        assert!(diagnostics.is_empty());

        // The enum is gone, the top-level assignment is kept.
        assert_eq!(body_of(&ast, root), vec![x]);
        assert_eq!(ast.parent(colors), None);
    }

    #[test]
    fn top_level_literal_assignment_is_never_elided() {
        let mut ast = Ast::new();
        let five = number(&mut ast, 5.0);
        let x = declaration(&mut ast, "x", DataType::Number, five);
        let root = capsule(&mut ast, vec![x]);

        run(&mut ast);
        assert_eq!(body_of(&ast, root), vec![x]);
    }

    #[test]
    fn block_literal_assignment_is_elided_unless_last() {
        let mut ast = Ast::new();
        let five = number(&mut ast, 5.0);
        let x = declaration(&mut ast, "x", DataType::Number, five);
        let ten = number(&mut ast, 10.0);
        let y = declaration(&mut ast, "y", DataType::Number, ten);
        let block = ast.alloc(NodeKind::Block { body: vec![x, y] });
        capsule(&mut ast, vec![block]);

        run(&mut ast);

        // x is deleted, y survives as the block's value.
        assert_eq!(body_of(&ast, block), vec![y]);
        assert_eq!(ast.parent(x), None);
    }

    #[test]
    fn identifier_use_becomes_a_fresh_literal() {
        let mut ast = Ast::new();
        let five = number(&mut ast, 5.0);
        let x = declaration(&mut ast, "x", DataType::Number, five);
        let use_site = use_of(&mut ast, "x");
        let block = ast.alloc(NodeKind::Block {
            body: vec![x, use_site],
        });
        capsule(&mut ast, vec![block]);

        run(&mut ast);

        let body = body_of(&ast, block);
        assert_eq!(body.len(), 1);
        let substituted = body[0];
        assert_ne!(substituted, use_site);
        assert_ne!(substituted, five);
        assert_eq!(
            ast.kind(substituted),
            &NodeKind::NumberLiteral {
                value: OrderedFloat(5.0)
            }
        );
        assert_eq!(ast.parent(substituted), Some(block));
    }

    #[test]
    fn declaration_site_identifier_is_not_substituted() {
        let mut ast = Ast::new();
        let five = number(&mut ast, 5.0);
        let first = declaration(&mut ast, "x", DataType::Number, five);
        // A later block shadows x; its declaration-site identifier must not
        // be replaced by the hoisted literal.
        let truth = ast.alloc(NodeKind::BooleanLiteral { value: true });
        let shadow = declaration(&mut ast, "x", DataType::Boolean, truth);
        let block = ast.alloc(NodeKind::Block { body: vec![shadow] });
        capsule(&mut ast, vec![first, block]);

        run(&mut ast);

        let NodeKind::Assignment { left, .. } = ast.kind(shadow) else {
            panic!("shadow declaration was rewritten");
        };
        assert!(matches!(
            ast.kind(*left),
            NodeKind::Identifier { name, .. } if name == "x"
        ));
    }

    #[test]
    fn nested_enum_is_deleted_and_unpacked_locally() {
        let mut ast = Ast::new();
        let states = enum_decl(&mut ast, "State", &["idle", "busy"]);
        let use_site = use_of(&mut ast, "State.busy");
        let block = ast.alloc(NodeKind::Block {
            body: vec![states, use_site],
        });
        capsule(&mut ast, vec![block]);

        let diagnostics = run(&mut ast);
        assert!(diagnostics.is_empty());

        let body = body_of(&ast, block);
        assert_eq!(body.len(), 1);
        assert_eq!(
            ast.kind(body[0]),
            &NodeKind::NumberLiteral {
                value: OrderedFloat(1.0)
            }
        );
    }

    #[test]
    fn enum_alias_remaps_type_annotations() {
        let mut ast = Ast::new();
        let colors = enum_decl(&mut ast, "Color", &["red", "green"]);
        let use_site = use_of(&mut ast, "Color.green");
        let favorite = declaration(
            &mut ast,
            "favorite",
            DataType::Named("Color".into()),
            use_site,
        );
        capsule(&mut ast, vec![colors, favorite]);

        run(&mut ast);

        // favorite: Color = Color.green  ⇒  favorite: Number = 1
        let NodeKind::Assignment { left, right } = ast.kind(favorite) else {
            panic!("declaration was rewritten");
        };
        let NodeKind::Identifier {
            type_decl: Some(annotation),
            ..
        } = ast.kind(*left)
        else {
            panic!("missing annotation");
        };
        assert_eq!(
            ast.kind(*annotation),
            &NodeKind::TypeDeclaration {
                data_type: DataType::Number,
                params: vec![],
            }
        );
        assert_eq!(
            ast.kind(*right),
            &NodeKind::NumberLiteral {
                value: OrderedFloat(1.0)
            }
        );
    }

    #[test]
    fn redeclaration_reports_once_and_keeps_first_binding() {
        let mut ast = Ast::new();
        let five = number(&mut ast, 5.0);
        let first = declaration(&mut ast, "x", DataType::Number, five);
        let ten = number(&mut ast, 10.0);
        let second = declaration(&mut ast, "x", DataType::Number, ten);
        let use_site = use_of(&mut ast, "x");
        let block = ast.alloc(NodeKind::Block {
            body: vec![first, second, use_site],
        });
        capsule(&mut ast, vec![block]);

        let diagnostics = run(&mut ast);
        assert_eq!(
            diagnostics.encountered(),
            &[CompileError::illegal_reassignment("x")]
        );

        // The use still resolves to the first binding's value, and the
        // colliding redeclaration is kept in the tree.
        let body = body_of(&ast, block);
        assert_eq!(body.len(), 2);
        assert_eq!(body[0], second);
        assert_eq!(
            ast.kind(body[1]),
            &NodeKind::NumberLiteral {
                value: OrderedFloat(5.0)
            }
        );
    }

    #[test]
    fn mismatched_literal_kind_is_not_elided() {
        let mut ast = Ast::new();
        // x: Boolean = 5 is nonsense, but that is the type checker's
        // problem; the inliner must leave it in place.
        let five = number(&mut ast, 5.0);
        let x = declaration(&mut ast, "x", DataType::Boolean, five);
        let done = ast.alloc(NodeKind::BooleanLiteral { value: true });
        let y = declaration(&mut ast, "y", DataType::Boolean, done);
        let block = ast.alloc(NodeKind::Block { body: vec![x, y] });
        capsule(&mut ast, vec![block]);

        run(&mut ast);
        assert_eq!(body_of(&ast, block), vec![x, y]);
    }

    #[test]
    fn function_bindings_do_not_collide_across_arities() {
        let mut ast = Ast::new();
        let annotation = type_decl(&mut ast, DataType::Number);
        let parameter = ast.alloc(NodeKind::Identifier {
            name: "n".into(),
            type_decl: Some(annotation),
        });
        let one_body = ast.alloc(NodeKind::Block { body: vec![] });
        let one_arg = ast.alloc(NodeKind::FunctionDeclaration {
            parameters: vec![parameter],
            body: one_body,
        });
        let zero_body = ast.alloc(NodeKind::Block { body: vec![] });
        let zero_arg = ast.alloc(NodeKind::FunctionDeclaration {
            parameters: vec![],
            body: zero_body,
        });

        let first = declaration(&mut ast, "f", DataType::Function, one_arg);
        let second = declaration(&mut ast, "f", DataType::Function, zero_arg);
        let block = ast.alloc(NodeKind::Block {
            body: vec![first, second],
        });
        capsule(&mut ast, vec![block]);

        let diagnostics = run(&mut ast);
        assert!(diagnostics.is_empty());
        assert_eq!(body_of(&ast, block), vec![first, second]);
    }

    #[test]
    fn duplicate_function_signature_collides() {
        let mut ast = Ast::new();
        let body_a = ast.alloc(NodeKind::Block { body: vec![] });
        let func_a = ast.alloc(NodeKind::FunctionDeclaration {
            parameters: vec![],
            body: body_a,
        });
        let body_b = ast.alloc(NodeKind::Block { body: vec![] });
        let func_b = ast.alloc(NodeKind::FunctionDeclaration {
            parameters: vec![],
            body: body_b,
        });

        let first = declaration(&mut ast, "f", DataType::Function, func_a);
        let second = declaration(&mut ast, "f", DataType::Function, func_b);
        let block = ast.alloc(NodeKind::Block {
            body: vec![first, second],
        });
        capsule(&mut ast, vec![block]);

        let diagnostics = run(&mut ast);
        assert_eq!(
            diagnostics.encountered(),
            &[CompileError::illegal_reassignment("f")]
        );
    }

    #[test]
    fn rerun_on_optimized_tree_is_a_noop() {
        let mut ast = Ast::new();
        let colors = enum_decl(&mut ast, "Color", &["red"]);
        let five = number(&mut ast, 5.0);
        let x = declaration(&mut ast, "x", DataType::Number, five);
        let use_site = use_of(&mut ast, "x");
        let block = ast.alloc(NodeKind::Block {
            body: vec![x, use_site],
        });
        capsule(&mut ast, vec![colors, block]);

        let diagnostics = run(&mut ast);
        assert!(diagnostics.is_empty());
        let snapshot = ast.find_all(|_| true);

        let diagnostics = run(&mut ast);
        assert!(diagnostics.is_empty());
        assert_eq!(ast.find_all(|_| true), snapshot);
    }
}
