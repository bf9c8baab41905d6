//! Performance benchmarks for the AST optimization pipeline.
//!
//! Measures the literal inliner over synthetic capsules at several sizes:
//! enum-heavy (unpacking dominates), binding-heavy (hoisting and scope
//! inserts dominate), and use-heavy (identifier substitution dominates).

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use theta::{Ast, CompilationSession, DataType, NodeId, NodeKind};

fn declaration(ast: &mut Ast, name: &str, value: f64) -> NodeId {
    let annotation = ast.alloc(NodeKind::TypeDeclaration {
        data_type: DataType::Number,
        params: vec![],
    });
    let left = ast.alloc(NodeKind::Identifier {
        name: name.into(),
        type_decl: Some(annotation),
    });
    let right = ast.alloc(NodeKind::NumberLiteral {
        value: value.into(),
    });
    ast.alloc(NodeKind::Assignment { left, right })
}

/// A capsule with `enums` top-level enums of eight elements each.
fn enum_heavy(enums: usize) -> Ast {
    let mut ast = Ast::new();
    let mut body = Vec::with_capacity(enums);
    for e in 0..enums {
        let identifier = ast.alloc(NodeKind::Identifier {
            name: format!("Enum{e}"),
            type_decl: None,
        });
        let elements = (0..8)
            .map(|i| {
                ast.alloc(NodeKind::Symbol {
                    name: format!(":el{i}"),
                })
            })
            .collect();
        body.push(ast.alloc(NodeKind::Enum {
            identifier,
            elements,
        }));
    }
    let capsule = ast.alloc(NodeKind::Capsule {
        name: "Bench".into(),
        body,
    });
    ast.set_root(capsule);
    ast
}

/// A capsule whose block declares `bindings` literals and then uses each one.
fn binding_heavy(bindings: usize) -> Ast {
    let mut ast = Ast::new();
    let mut statements = Vec::with_capacity(bindings * 2);
    for b in 0..bindings {
        statements.push(declaration(&mut ast, &format!("v{b}"), b as f64));
    }
    for b in 0..bindings {
        statements.push(ast.alloc(NodeKind::Identifier {
            name: format!("v{b}"),
            type_decl: None,
        }));
    }
    let block = ast.alloc(NodeKind::Block { body: statements });
    let capsule = ast.alloc(NodeKind::Capsule {
        name: "Bench".into(),
        body: vec![block],
    });
    ast.set_root(capsule);
    ast
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");

    for enums in [8usize, 64, 256] {
        let template = enum_heavy(enums);
        group.throughput(Throughput::Elements(enums as u64));
        group.bench_function(format!("enum_heavy_{enums}"), |b| {
            b.iter_batched(
                || template.clone(),
                |mut ast| {
                    let mut session = CompilationSession::new();
                    black_box(session.optimize_ast(&mut ast, true));
                    ast
                },
                BatchSize::SmallInput,
            );
        });
    }

    for bindings in [16usize, 128, 512] {
        let template = binding_heavy(bindings);
        group.throughput(Throughput::Elements(bindings as u64));
        group.bench_function(format!("binding_heavy_{bindings}"), |b| {
            b.iter_batched(
                || template.clone(),
                |mut ast| {
                    let mut session = CompilationSession::new();
                    black_box(session.optimize_ast(&mut ast, true));
                    ast
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_optimize);
criterion_main!(benches);
