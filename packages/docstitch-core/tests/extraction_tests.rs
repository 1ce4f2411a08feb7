//! Extraction integration tests across languages

mod common;

use common::*;
use docstitch_core::{
    apply_for_language, extract, DeclarationKind, DocstitchError, EditRequest, Fidelity,
};
use pretty_assertions::assert_eq;

#[test]
fn test_python_module_declarations() {
    let decls = extract("python", PY_MODULE).unwrap();
    assert_names(&decls, &["Store", "__init__", "get", "version", "fetch", "parse", "main"]);
    assert_well_ordered(&decls);

    let lines: Vec<(usize, usize)> = decls.iter().map(|d| (d.start_line, d.end_line)).collect();
    assert_eq!(lines, vec![(4, 19), (10, 11), (13, 15), (18, 19), (22, 26), (24, 25), (29, 31)]);

    let kinds: Vec<DeclarationKind> = decls.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DeclarationKind::Class,
            DeclarationKind::Method,
            DeclarationKind::Method,
            DeclarationKind::Method,
            DeclarationKind::Function,
            DeclarationKind::Function,
            DeclarationKind::Function,
        ]
    );
    assert!(decls.iter().all(|d| d.fidelity == Fidelity::Full));
}

#[test]
fn test_python_existing_docstrings() {
    let decls = extract("py", PY_MODULE).unwrap();
    let docs: Vec<Option<&str>> = decls.iter().map(|d| d.existing_doc.as_deref()).collect();
    assert_eq!(
        docs,
        vec![
            Some("Key-value store.\n\nBacked by a dict."),
            None,
            Some("Return the value for key."),
            None,
            Some("Fetch a url."),
            None,
            None,
        ]
    );
}

#[test]
fn test_reinserting_existing_docs_round_trips() {
    let decls = extract("python", PY_MODULE).unwrap();
    let edits: Vec<EditRequest> = decls
        .iter()
        .filter_map(|d| d.existing_doc.as_ref().map(|doc| EditRequest::for_declaration(d, doc.clone())))
        .collect();
    assert_eq!(edits.len(), 3);

    let patched = apply_for_language("python", PY_MODULE, &edits).unwrap();
    let again = extract("python", &patched).unwrap();

    assert_eq!(again.len(), decls.len());
    for (before, after) in decls.iter().zip(&again) {
        assert_eq!(before.name, after.name);
        assert_eq!(before.existing_doc, after.existing_doc);
    }
}

#[test]
fn test_every_generated_function_found() {
    let source = fixture_in_class("Holder", &fixture_n_functions(5, 2));
    let decls = extract("python", &source).unwrap();

    assert_eq!(decls.len(), 6);
    assert_eq!(decls[0].kind, DeclarationKind::Class);
    assert!(decls[1..].iter().all(|d| d.kind == DeclarationKind::Method));
    assert_well_ordered(&decls);
}

#[test]
fn test_javascript_declarations() {
    let decls = extract("JavaScript", JS_MODULE).unwrap();
    assert_names(&decls, &["add", "mul"]);
    assert_eq!(decls[1].start_line, 5);
    assert_eq!(decls[1].header_end_line, 5);
}

#[test]
fn test_java_is_signature_only() {
    let decls = extract("java", JAVA_CLASS).unwrap();
    assert_names(&decls, &["Greeter", "greet"]);
    for decl in &decls {
        assert_eq!(decl.fidelity, Fidelity::SignatureOnly);
        assert_eq!(decl.start_line, decl.end_line);
    }
}

#[test]
fn test_c_and_cpp_tags_share_a_grammar() {
    let source = "int twice(int x) {\n    return 2 * x;\n}\n";
    for tag in ["c", "cpp", "C++"] {
        let decls = extract(tag, source).unwrap();
        assert_names(&decls, &["twice"]);
    }
}

#[test]
fn test_unsupported_language_yields_nothing() {
    let err = extract("cobol", PY_MODULE).unwrap_err();
    assert!(matches!(err, DocstitchError::UnsupportedLanguage(_)));
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_syntax_error_reports_position() {
    let err = extract("python", "def ok():\n    pass\n\ndef broken(:\n    pass\n").unwrap_err();
    match err {
        DocstitchError::Parse { language, line, .. } => {
            assert_eq!(language, "python");
            assert_eq!(line, 4);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}
