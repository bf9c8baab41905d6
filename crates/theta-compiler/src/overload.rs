//! Qualified identifiers for overloaded functions.
//!
//! Two function declarations may share a base name as long as their
//! parameter signatures differ. To let them coexist in one scope frame, a
//! function is never bound under its bare name: its scope key is the base
//! name qualified with the serialized parameter signature, e.g.
//! `add(Number,Number)`. Two declarations with the same name *and* the same
//! signature produce the same key and collide, which is exactly the illegal
//! reassignment the inliner reports.
//!
//! The type checker and code generator derive the same keys — sometimes from
//! a declaration node, sometimes from a bare type signature at a call site —
//! so the two entry points here must agree byte for byte.

use theta_ast::{Ast, NodeId, NodeKind};

/// Derive the scope key for a function binding from its declaration node.
///
/// The key is `name(T1,T2,…)` over the declared parameter types in order;
/// arity is implicit in the list. A zero-parameter function is `name()`,
/// which can never collide with the plain variable key `name`.
///
/// # Panics
///
/// Panics if `declaration` is not a function declaration or a parameter is
/// missing its type annotation; the parser never produces either shape.
pub fn qualified_function_identifier(name: &str, declaration: NodeId, ast: &Ast) -> String {
    let NodeKind::FunctionDeclaration { parameters, .. } = ast.kind(declaration) else {
        panic!("qualified_function_identifier on a non-function node");
    };

    let param_types: Vec<NodeId> = parameters
        .iter()
        .map(|param| match ast.kind(*param) {
            NodeKind::Identifier {
                type_decl: Some(type_decl),
                ..
            } => *type_decl,
            _ => panic!("function parameter without a type annotation"),
        })
        .collect();

    qualify(name, &param_types, ast)
}

/// Derive the same key from a standalone function type signature.
///
/// `signature` is a `Function` type declaration whose params list the
/// parameter types followed by the return type; the trailing return type is
/// not part of the key. Used where only the signature is known, e.g. when
/// resolving a call site.
///
/// # Panics
///
/// Panics if `signature` is not a type declaration.
pub fn qualified_function_identifier_from_type_signature(
    name: &str,
    signature: NodeId,
    ast: &Ast,
) -> String {
    let NodeKind::TypeDeclaration { params, .. } = ast.kind(signature) else {
        panic!("qualified_function_identifier_from_type_signature on a non-type node");
    };

    // Everything but the trailing return type.
    let param_types = &params[..params.len().saturating_sub(1)];
    qualify(name, param_types, ast)
}

fn qualify(name: &str, param_types: &[NodeId], ast: &Ast) -> String {
    let mut key = String::from(name);
    key.push('(');
    for (i, type_decl) in param_types.iter().enumerate() {
        if i > 0 {
            key.push(',');
        }
        serialize_type(*type_decl, ast, &mut key);
    }
    key.push(')');
    key
}

/// Append the canonical serialization of a type declaration.
///
/// Primitive and named tags render as their source spelling; a type with
/// nested parameter signatures renders as `Tag<P1,P2,…>`.
fn serialize_type(id: NodeId, ast: &Ast, out: &mut String) {
    let NodeKind::TypeDeclaration { data_type, params } = ast.kind(id) else {
        panic!("serialize_type on a non-type node");
    };

    out.push_str(&data_type.to_string());
    if !params.is_empty() {
        out.push('<');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            serialize_type(*param, ast, out);
        }
        out.push('>');
    }
}
