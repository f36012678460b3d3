use pretty_assertions::assert_eq;

use mexp_diagnostic::{Diagnostic, ErrorCode};
use mexp_ir::{Assign, Expr, FunctionDecl, NodeList, Param, Print, Stmt, Type};

use super::*;

fn sample_program(print: Expr) -> Program {
    Program::new(
        vec![
            Stmt::Assign(Assign::new("a", Expr::int(1))),
            Stmt::Function(FunctionDecl::new(
                "inc",
                Type::Integer,
                vec![Param::new(Type::Integer, "n")],
                NodeList::new(),
                Expr::plus(Expr::ident("n"), Expr::int(1)),
            )),
        ],
        Print::new(print),
    )
}

#[test]
fn clean_program_resolves() {
    let program = sample_program(Expr::call("inc", vec![Expr::ident("a")]));
    let mut queue = DiagnosticQueue::new();

    let Ok(resolved) = resolve_program(&program, &mut queue) else {
        panic!("expected resolution to succeed: {:?}", queue.flush());
    };

    assert!(std::ptr::eq(resolved.program(), &program));
    assert!(resolved.symbols().globals.contains("a"));
    assert!(resolved.functions().contains("inc"));
}

#[test]
fn errors_from_either_pass_block_resolution() {
    let undefined_var = sample_program(Expr::ident("zz"));
    let undefined_fn = sample_program(Expr::call("dec", vec![Expr::ident("a")]));

    for (program, code) in [
        (undefined_var, ErrorCode::E2002),
        (undefined_fn, ErrorCode::E2002),
    ] {
        let mut queue = DiagnosticQueue::new();
        assert!(resolve_program(&program, &mut queue).is_err());
        let codes: Vec<ErrorCode> = queue.flush().iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![code]);
    }
}

#[test]
fn earlier_errors_in_queue_do_not_block() {
    let program = sample_program(Expr::ident("a"));
    let mut queue = DiagnosticQueue::new();
    queue.add(Diagnostic::error(ErrorCode::E2001).with_message("unrelated"));

    assert!(resolve_program(&program, &mut queue).is_ok());
}
