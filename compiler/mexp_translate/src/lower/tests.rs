use pretty_assertions::assert_eq;

use mexp_diagnostic::DiagnosticQueue;
use mexp_ir::{NodeList, Param, Print, Program, Span, Type};
use mexp_resolve::{build_function_table, resolve_program};

use super::*;
use crate::frame::{StackFrame, StackFrameFactory};
use crate::ir::{IrNode, Temp};

// ── Helpers ─────────────────────────────────────────────────────────

fn translate(program: &Program) -> Fragments<StackFrame> {
    let mut queue = DiagnosticQueue::new();
    let resolved = resolve_program(program, &mut queue).expect("program should resolve");
    let mut names = NameGen::new();
    let factory = StackFrameFactory::new(8, &mut names).expect("valid word size");
    translate_program(&resolved, &factory, &mut names).expect("translation should succeed")
}

/// Translate `expr` in an empty top-level context, bypassing resolution.
fn translate_detached(expr: &Expr) -> Result<TrExp, TranslateError> {
    let program = Program::new(NodeList::new(), Print::new(Expr::int(0)));
    let mut queue = DiagnosticQueue::new();
    let functions = build_function_table(&program, &mut queue);
    let mut names = NameGen::new();
    let factory = StackFrameFactory::new(8, &mut names).expect("valid word size");
    let frame = factory.new_frame(Label::named(MAIN_LABEL), 0, &mut names);
    let ctx = FnCtx::program(frame);
    let mut translator = Translator {
        factory: &factory,
        functions: &functions,
        names: &mut names,
        fragments: Fragments::new(),
    };
    translator.translate_expr(&ctx, expr)
}

fn body_of(fragments: &Fragments<StackFrame>, label: &str) -> Vec<String> {
    let procedure = fragments.proc_labeled(label).expect("missing proc");
    procedure
        .body
        .linearize()
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn print_only(exp: Expr) -> Program {
    Program::new(NodeList::new(), Print::new(exp))
}

fn assign(name: &str, value: Expr) -> Stmt {
    Stmt::Assign(Assign::new(name, value))
}

fn function(name: &str, params: &[&str], body: Vec<Assign>, ret: Expr) -> Stmt {
    let params: Vec<Param> = params
        .iter()
        .map(|p| Param::new(Type::Integer, *p))
        .collect();
    Stmt::Function(FunctionDecl::new(name, Type::Integer, params, body, ret))
}

/// The argument passed to `print` in `main`.
fn printed(fragments: &Fragments<StackFrame>) -> IrExp {
    let main = fragments.proc_labeled(MAIN_LABEL).expect("missing main");
    let last = main.body.linearize().pop().expect("empty main");
    match last {
        IrStm::Exp(IrExp::Call { func, args }) if func.as_str() == PRINT_LABEL => args[0].clone(),
        other => panic!("main does not end in print: {other}"),
    }
}

// ── Top-level bindings ──────────────────────────────────────────────

#[test]
fn literal_binding_becomes_data() {
    // x = 5; print x;
    let fragments = translate(&Program::new(
        vec![assign("x", Expr::int(5))],
        Print::new(Expr::ident("x")),
    ));

    assert_eq!(fragments.len(), 2);
    let data: Vec<&DataFragment> = fragments.data().collect();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].values, vec![5]);
    assert_eq!(data[0].label, Label::named("L0"));
    assert_eq!(
        body_of(&fragments, MAIN_LABEL),
        vec!["EXP(CALL(print, MEM(NAME L0)))"]
    );
}

#[test]
fn general_binding_gets_a_local() {
    // a = 1 + 2; print a;
    let fragments = translate(&Program::new(
        vec![assign("a", Expr::plus(Expr::int(1), Expr::int(2)))],
        Print::new(Expr::ident("a")),
    ));

    assert_eq!(fragments.data().count(), 0);
    // t0 and t1 belong to the frame factory.
    assert_eq!(
        body_of(&fragments, MAIN_LABEL),
        vec![
            "MOVE(TEMP t2, BINOP(PLUS, CONST 1, CONST 2))",
            "EXP(CALL(print, TEMP t2))",
        ]
    );
}

#[test]
fn rebinding_reads_previous_value_then_shadows_it() {
    // x = 5; x = x + 1; print x;
    let fragments = translate(&Program::new(
        vec![
            assign("x", Expr::int(5)),
            assign("x", Expr::plus(Expr::ident("x"), Expr::int(1))),
        ],
        Print::new(Expr::ident("x")),
    ));

    assert_eq!(
        body_of(&fragments, MAIN_LABEL),
        vec![
            "MOVE(TEMP t2, BINOP(PLUS, MEM(NAME L0), CONST 1))",
            "EXP(CALL(print, TEMP t2))",
        ]
    );
}

#[test]
fn later_literal_binding_wins() {
    // x = 1 + 1; x = 5; print x;
    let fragments = translate(&Program::new(
        vec![
            assign("x", Expr::plus(Expr::int(1), Expr::int(1))),
            assign("x", Expr::int(5)),
        ],
        Print::new(Expr::ident("x")),
    ));

    assert_eq!(printed(&fragments), IrExp::mem(IrExp::name(Label::named("L0"))));
}

// ── Expressions ─────────────────────────────────────────────────────

#[test]
fn less_than_never_branches() {
    let fragments = translate(&print_only(Expr::less_than(Expr::int(1), Expr::int(2))));

    let value = printed(&fragments);
    let mut branches = 0;
    let mut cmoves = 0;
    value.walk(&mut |node| match node {
        IrNode::Stm(IrStm::Jump(_) | IrStm::CJump { .. } | IrStm::Label(_)) => branches += 1,
        IrNode::Stm(IrStm::CMove { .. }) => cmoves += 1,
        _ => {}
    });

    assert_eq!(branches, 0);
    assert_eq!(cmoves, 1);
    assert_eq!(
        value.to_string(),
        "ESEQ(SEQ(MOVE(TEMP t2, CONST 0), CMOVE(LT, CONST 1, CONST 2, TEMP t2, CONST 1)), TEMP t2)"
    );
}

#[test]
fn conditional_is_a_diamond_on_one_temp() {
    // print (1 < 2) ? 3 : 4;
    let fragments = translate(&print_only(Expr::conditional(
        Expr::less_than(Expr::int(1), Expr::int(2)),
        Expr::int(3),
        Expr::int(4),
    )));

    let IrExp::ESeq { stm, exp } = printed(&fragments) else {
        panic!("conditional should be an ESEQ");
    };
    let result = IrExp::Temp(Temp::new(2));
    assert_eq!(*exp, result);

    let stms: Vec<String> = stm.linearize().iter().map(ToString::to_string).collect();
    assert_eq!(
        stms,
        vec![
            "CJUMP(EQ, ESEQ(SEQ(MOVE(TEMP t3, CONST 0), CMOVE(LT, CONST 1, CONST 2, TEMP t3, CONST 1)), TEMP t3), CONST 1, L0, L1)",
            "LABEL L1",
            "MOVE(TEMP t2, CONST 4)",
            "JUMP L2",
            "LABEL L0",
            "MOVE(TEMP t2, CONST 3)",
            "LABEL L2",
        ]
    );

    let mut labels = 0;
    let mut cjumps = 0;
    let mut moves_to_result = 0;
    stm.walk(&mut |node| match node {
        IrNode::Stm(IrStm::Label(_)) => labels += 1,
        IrNode::Stm(IrStm::CJump { .. }) => cjumps += 1,
        IrNode::Stm(IrStm::Move { dst, .. }) if *dst == result => moves_to_result += 1,
        _ => {}
    });
    assert_eq!((labels, cjumps, moves_to_result), (3, 1, 2));
}

#[test]
fn arithmetic_and_not() {
    let fragments = translate(&print_only(Expr::times(
        Expr::minus(Expr::int(7), Expr::int(2)),
        Expr::not(Expr::int(0)),
    )));

    assert_eq!(
        printed(&fragments).to_string(),
        "BINOP(MUL, BINOP(MINUS, CONST 7, CONST 2), BINOP(MINUS, CONST 1, CONST 0))"
    );
}

// ── Functions ───────────────────────────────────────────────────────

#[test]
fn function_becomes_its_own_procedure() {
    // f(int n) { m = n * 2; return m + 1 }; print f(3);
    let fragments = translate(&Program::new(
        vec![function(
            "f",
            &["n"],
            vec![Assign::new("m", Expr::times(Expr::ident("n"), Expr::int(2)))],
            Expr::plus(Expr::ident("m"), Expr::int(1)),
        )],
        Print::new(Expr::call("f", vec![Expr::int(3)])),
    ));

    let labels: Vec<String> = fragments
        .procs()
        .map(|p| p.frame.label().to_string())
        .collect();
    assert_eq!(labels, vec!["fn.f", MAIN_LABEL]);

    assert_eq!(
        body_of(&fragments, "fn.f"),
        vec![
            "MOVE(TEMP t2, BINOP(MUL, MEM(BINOP(PLUS, TEMP t0, CONST 16)), CONST 2))",
            "MOVE(TEMP t1, BINOP(PLUS, TEMP t2, CONST 1))",
        ]
    );
    assert_eq!(
        body_of(&fragments, MAIN_LABEL),
        vec!["EXP(CALL(print, CALL(fn.f, CONST 3)))"]
    );
}

#[test]
fn literal_inside_function_is_a_local() {
    let fragments = translate(&Program::new(
        vec![function(
            "k",
            &[],
            vec![Assign::new("seven", Expr::int(7))],
            Expr::ident("seven"),
        )],
        Print::new(Expr::call("k", NodeList::new())),
    ));

    assert_eq!(fragments.data().count(), 0);
    assert_eq!(
        body_of(&fragments, "fn.k"),
        vec!["MOVE(TEMP t2, CONST 7)", "MOVE(TEMP t1, TEMP t2)"]
    );
}

#[test]
fn call_arguments_keep_source_order() {
    let fragments = translate(&Program::new(
        vec![function("first", &["a", "b"], vec![], Expr::ident("a"))],
        Print::new(Expr::call("first", vec![Expr::int(1), Expr::int(2)])),
    ));

    assert_eq!(
        printed(&fragments).to_string(),
        "CALL(fn.first, CONST 1, CONST 2)"
    );
    assert_eq!(
        body_of(&fragments, "fn.first"),
        vec!["MOVE(TEMP t1, MEM(BINOP(PLUS, TEMP t0, CONST 16)))"]
    );
}

#[test]
fn declaration_leaves_caller_context_untouched() {
    // a = 1 + 0; [f(int a) { return a }]; b = a + 1; print b;
    let with_decl = Program::new(
        vec![
            assign("a", Expr::plus(Expr::int(1), Expr::int(0))),
            function("f", &["a"], vec![], Expr::ident("a")),
            assign("b", Expr::plus(Expr::ident("a"), Expr::int(1))),
        ],
        Print::new(Expr::ident("b")),
    );
    let without_decl = Program::new(
        vec![
            assign("a", Expr::plus(Expr::int(1), Expr::int(0))),
            assign("b", Expr::plus(Expr::ident("a"), Expr::int(1))),
        ],
        Print::new(Expr::ident("b")),
    );

    let sandwiched = translate(&with_decl);
    let plain = translate(&without_decl);

    assert_eq!(
        body_of(&sandwiched, MAIN_LABEL),
        body_of(&plain, MAIN_LABEL)
    );
    // Inside f, the formal shadows the top-level `a`.
    assert_eq!(
        body_of(&sandwiched, "fn.f"),
        vec!["MOVE(TEMP t1, MEM(BINOP(PLUS, TEMP t0, CONST 16)))"]
    );
}

// ── Whole-program properties ────────────────────────────────────────

#[test]
fn translation_is_deterministic() {
    let program = Program::new(
        vec![
            assign("x", Expr::int(2)),
            function(
                "sq",
                &["v"],
                vec![],
                Expr::times(Expr::ident("v"), Expr::ident("v")),
            ),
            assign("y", Expr::call("sq", vec![Expr::ident("x")])),
        ],
        Print::new(Expr::conditional(
            Expr::less_than(Expr::ident("y"), Expr::int(10)),
            Expr::ident("y"),
            Expr::int(0),
        )),
    );

    assert_eq!(translate(&program), translate(&program));
}

#[test]
fn fragments_display() {
    let fragments = translate(&Program::new(
        vec![assign("x", Expr::int(5))],
        Print::new(Expr::ident("x")),
    ));

    assert_eq!(
        fragments.to_string(),
        "DATA L0: 5\n\nPROC main:\n    EXP(CALL(print, MEM(NAME L0)))\n"
    );
}

#[test]
fn function_labels() {
    assert_eq!(function_label("sq").as_str(), "fn.sq");
    assert!(function_label("L0").as_str().starts_with(FUNCTION_LABEL_PREFIX));
}

// ── Failures ────────────────────────────────────────────────────────

#[test]
fn unbound_identifier_is_an_error() {
    let expr = Expr::ident("ghost").with_span(Span::new(3, 8));

    assert_eq!(
        translate_detached(&expr),
        Err(TranslateError::UnboundIdentifier {
            name: "ghost".into(),
            span: Span::new(3, 8),
        })
    );
}

#[test]
fn call_to_unregistered_function_is_an_error() {
    let expr = Expr::call("nowhere", vec![Expr::int(1)]).with_span(Span::new(0, 11));

    assert_eq!(
        translate_detached(&expr),
        Err(TranslateError::UnknownFunction {
            name: "nowhere".into(),
            span: Span::new(0, 11),
        })
    );
}

#[test]
fn errors_propagate_out_of_nested_expressions() {
    let expr = Expr::plus(Expr::int(1), Expr::not(Expr::ident("ghost")));

    assert!(matches!(
        translate_detached(&expr),
        Err(TranslateError::UnboundIdentifier { .. })
    ));
}
