use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E2002)
        .with_message("test error")
        .with_label(Span::new(0, 5), "here")
        .with_secondary_label(Span::new(8, 9), "context")
        .with_note("some context");

    assert_eq!(diag.code, ErrorCode::E2002);
    assert_eq!(diag.message, "test error");
    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 2);
    assert!(diag.labels[0].is_primary);
    assert!(!diag.labels[1].is_primary);
    assert_eq!(diag.primary_span(), Some(Span::new(0, 5)));
}

#[test]
fn test_duplicate_definition_helper() {
    let diag = duplicate_definition(Span::new(3, 4), &Name::new("f"));

    assert_eq!(diag.code, ErrorCode::E2001);
    assert!(diag.message.contains("`f`"));
    assert_eq!(diag.primary_span(), Some(Span::new(3, 4)));
}

#[test]
fn test_undefined_identifier_helper() {
    let diag = undefined_identifier(Span::new(10, 11), &Name::new("y"));

    assert_eq!(diag.code, ErrorCode::E2002);
    assert_eq!(diag.message, "cannot find `y` in this scope");
}

#[test]
fn test_internal_error_has_no_span() {
    let diag = internal_error("unbound `x`");

    assert_eq!(diag.code, ErrorCode::E9001);
    assert!(diag.message.contains("unbound `x`"));
    assert_eq!(diag.primary_span(), None);
}

#[test]
fn test_warning_is_not_error() {
    let diag = Diagnostic::warning(ErrorCode::E2001).with_message("w");
    assert!(!diag.is_error());
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("test error")
        .with_label(Span::new(0, 5), "here")
        .with_note("n");

    assert_eq!(
        diag.to_string(),
        "error [E2001]: test error\n  --> 0..5: here\n  = note: n"
    );
}
