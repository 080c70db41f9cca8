use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E1002)
        .with_message("can't redefine: com.example.Foo")
        .with_subject("com.example.Foo")
        .with_note("a different type is already registered under this name")
        .with_suggestion("rename one of the declarations");

    assert_eq!(diag.code, ErrorCode::E1002);
    assert_eq!(diag.subject.as_deref(), Some("com.example.Foo"));
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("undefined name: com.example.Bar")
        .with_subject("com.example.Bar")
        .with_suggestion("declare `com.example.Bar` in this document");

    assert_eq!(
        diag.to_string(),
        "error [E2001]: undefined name: com.example.Bar\n  \
         --> com.example.Bar\n  \
         = help: declare `com.example.Bar` in this document"
    );
}

#[test]
fn test_every_code_renders_as_error() {
    for &code in ErrorCode::ALL {
        let diag = Diagnostic::error(code)
            .with_message("bad name")
            .with_note("first");
        assert_eq!(
            diag.to_string(),
            format!("error [{code}]: bad name\n  = note: first")
        );
    }
}
