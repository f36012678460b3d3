use pretty_assertions::assert_eq;

use mexp_diagnostic::{DiagnosticConfig, DiagnosticQueue, ErrorCode};
use mexp_ir::{Assign, NodeList, Param, Print, Span, Type};

use super::*;

fn function(name: &str, params: &[&str], body: Vec<Assign>, ret: Expr) -> Stmt {
    let params: Vec<Param> = params
        .iter()
        .map(|p| Param::new(Type::Integer, *p))
        .collect();
    Stmt::Function(FunctionDecl::new(name, Type::Integer, params, body, ret))
}

fn codes(queue: &DiagnosticQueue) -> Vec<ErrorCode> {
    queue.peek().map(|d| d.code).collect()
}

fn new_queue() -> DiagnosticQueue {
    DiagnosticQueue::with_config(DiagnosticConfig::unlimited())
}

#[test]
fn registers_every_function() {
    let program = Program::new(
        vec![
            function("f", &["x"], vec![], Expr::ident("x")),
            function("g", &[], vec![], Expr::int(0)),
        ],
        Print::new(Expr::call("f", vec![Expr::call("g", NodeList::new())])),
    );
    let mut queue = new_queue();

    let table = build_function_table(&program, &mut queue);

    assert!(!queue.has_errors());
    assert_eq!(table.len(), 2);
    assert_eq!(table.lookup("f").map(|d| d.params.len()), Some(1));
    assert!(table.contains("g"));
}

#[test]
fn duplicate_function_reported_once_and_body_skipped() {
    let mut second = FunctionDecl::new(
        "f",
        Type::Integer,
        NodeList::new(),
        NodeList::new(),
        // Would be an undefined call if the body were checked.
        Expr::call("nowhere", NodeList::new()),
    );
    second.span = Span::new(20, 30);
    let program = Program::new(
        vec![
            function("f", &["x"], vec![], Expr::ident("x")),
            Stmt::Function(second),
        ],
        Print::new(Expr::call("f", vec![Expr::int(1)])),
    );
    let mut queue = new_queue();

    let table = build_function_table(&program, &mut queue);

    assert_eq!(codes(&queue), vec![ErrorCode::E2001]);
    assert_eq!(
        queue.peek().next().and_then(|d| d.primary_span()),
        Some(Span::new(20, 30))
    );
    // The first declaration is the one kept.
    assert_eq!(table.lookup("f").map(|d| d.params.len()), Some(1));
}

#[test]
fn undefined_call_reported_per_call_site() {
    let program = Program::new(
        vec![Stmt::Assign(Assign::new(
            "a",
            Expr::call("missing", NodeList::new()),
        ))],
        Print::new(Expr::plus(
            Expr::call("missing", NodeList::new()),
            Expr::ident("a"),
        )),
    );
    let mut queue = new_queue();

    build_function_table(&program, &mut queue);

    assert_eq!(codes(&queue), vec![ErrorCode::E2002, ErrorCode::E2002]);
}

#[test]
fn forward_reference_is_allowed() {
    // f calls g, which is declared after f.
    let program = Program::new(
        vec![
            function("f", &[], vec![], Expr::call("g", NodeList::new())),
            function("g", &[], vec![], Expr::int(1)),
        ],
        Print::new(Expr::call("f", NodeList::new())),
    );
    let mut queue = new_queue();

    build_function_table(&program, &mut queue);

    assert!(!queue.has_errors());
}

#[test]
fn mutual_recursion_is_allowed() {
    let program = Program::new(
        vec![
            function(
                "even",
                &["n"],
                vec![],
                Expr::conditional(
                    Expr::less_than(Expr::ident("n"), Expr::int(1)),
                    Expr::int(1),
                    Expr::call("odd", vec![Expr::minus(Expr::ident("n"), Expr::int(1))]),
                ),
            ),
            function(
                "odd",
                &["n"],
                vec![],
                Expr::conditional(
                    Expr::less_than(Expr::ident("n"), Expr::int(1)),
                    Expr::int(0),
                    Expr::call("even", vec![Expr::minus(Expr::ident("n"), Expr::int(1))]),
                ),
            ),
        ],
        Print::new(Expr::call("even", vec![Expr::int(10)])),
    );
    let mut queue = new_queue();

    build_function_table(&program, &mut queue);

    assert!(!queue.has_errors());
}

#[test]
fn calls_inside_bodies_and_arguments_are_checked() {
    let program = Program::new(
        vec![function(
            "f",
            &[],
            vec![Assign::new("t", Expr::call("inner", NodeList::new()))],
            Expr::ident("t"),
        )],
        Print::new(Expr::call(
            "f",
            vec![Expr::call("arg", NodeList::new())],
        )),
    );
    let mut queue = new_queue();

    build_function_table(&program, &mut queue);

    let messages: Vec<String> = queue.peek().map(|d| d.message.clone()).collect();
    assert_eq!(
        messages,
        vec![
            "cannot find `inner` in this scope".to_string(),
            "cannot find `arg` in this scope".to_string(),
        ]
    );
}

#[test]
fn variables_are_not_checked_here() {
    let program = Program::new(NodeList::new(), Print::new(Expr::ident("undefined_var")));
    let mut queue = new_queue();

    let table = build_function_table(&program, &mut queue);

    assert!(!queue.has_errors());
    assert!(table.is_empty());
}
