//! End-to-end generation tests with scripted summarizers

mod common;

use common::*;
use docstitch_core::{
    extract, DocFormat, DocstitchConfig, DocstitchError, FailurePolicy, GenerateDocsService,
    GenerateRequest,
};
use pretty_assertions::assert_eq;

fn service() -> GenerateDocsService {
    GenerateDocsService::new(DocstitchConfig::default()).unwrap()
}

fn service_with(policy: FailurePolicy) -> GenerateDocsService {
    GenerateDocsService::new(DocstitchConfig::default().pipeline(|c| c.on_failure(policy))).unwrap()
}

#[test]
fn test_python_module_fully_documented() {
    let summarizer = ScriptedSummarizer::new();
    let response = service()
        .generate(&summarizer, &GenerateRequest::new("python", PY_MODULE))
        .unwrap();

    assert_eq!(response.docs.len(), 7);
    assert_eq!(summarizer.calls().len(), 7);

    let decls = extract("python", &response.modified_code).unwrap();
    assert_eq!(decls.len(), 7);
    for decl in &decls {
        assert_eq!(decl.existing_doc.as_deref(), Some(format!("{} documented.", decl.name).as_str()));
    }
}

#[test]
fn test_summarizer_gets_declaration_source() {
    let summarizer = ScriptedSummarizer::new();
    service()
        .generate(&summarizer, &GenerateRequest::new("python", PY_MODULE))
        .unwrap();

    let calls = summarizer.calls();
    assert_eq!(calls[2].0, "get");
    assert_eq!(
        calls[2].1,
        "    def get(self, key):\n        \"\"\"Return the value for key.\"\"\"\n        return self.data.get(key)\n"
    );
}

#[test]
fn test_failed_declaration_is_skipped() {
    let summarizer = ScriptedSummarizer::failing(&["parse"]);
    let response = service()
        .generate(&summarizer, &GenerateRequest::new("python", PY_MODULE))
        .unwrap();

    let parse = response.docs.iter().find(|d| d.name == "parse").unwrap();
    assert_eq!(parse.generated_doc, None);
    assert_eq!(response.docs.iter().filter(|d| d.generated_doc.is_some()).count(), 6);

    let decls = extract("python", &response.modified_code).unwrap();
    let parse = decls.iter().find(|d| d.name == "parse").unwrap();
    assert_eq!(parse.existing_doc, None);
}

#[test]
fn test_empty_doc_policy_inserts_empty_block() {
    let summarizer = ScriptedSummarizer::failing(&["f"]);
    let response = service_with(FailurePolicy::EmptyDoc)
        .generate(&summarizer, &GenerateRequest::new("python", "def f():\n    return 1\n"))
        .unwrap();

    assert_eq!(response.modified_code, "def f():\n    \"\"\"\"\"\"\n    return 1\n");
    assert_eq!(response.docs[0].generated_doc, None);
}

#[test]
fn test_abort_policy_stops_at_first_failure() {
    let summarizer = ScriptedSummarizer::failing(&["get"]);
    let err = service_with(FailurePolicy::Abort)
        .generate(&summarizer, &GenerateRequest::new("python", PY_MODULE))
        .unwrap_err();

    assert!(matches!(err, DocstitchError::SummarizationFailure { ref name, .. } if name == "get"));
    assert_eq!(summarizer.calls().len(), 3);
}

#[test]
fn test_javascript_blocks_inside_bodies() {
    let response = service()
        .generate(&ScriptedSummarizer::new(), &GenerateRequest::new("js", JS_MODULE))
        .unwrap();

    assert_eq!(
        response.modified_code,
        "function add(a, b) {\n  /** add documented. */\n  return a + b;\n}\n\nconst mul = (a, b) => {\n  /** mul documented. */\n  return a * b;\n};\n"
    );
}

#[test]
fn test_java_uses_header_only() {
    let summarizer = ScriptedSummarizer::new();
    let response = service()
        .generate(&summarizer, &GenerateRequest::new("java", JAVA_CLASS))
        .unwrap();

    assert_eq!(
        response.modified_code,
        "public class Greeter {\n    /** Greeter documented. */\n\n    public String greet(String name) {\n        /** greet documented. */\n        return name;\n    }\n}\n"
    );
    assert_eq!(summarizer.calls()[1].1, "    public String greet(String name) {\n");
}

#[test]
fn test_rerun_replaces_earlier_blocks() {
    let service = service();
    let first = service
        .generate(&ScriptedSummarizer::new(), &GenerateRequest::new("java", JAVA_CLASS))
        .unwrap();
    let second = service
        .generate(&ScriptedSummarizer::new(), &GenerateRequest::new("java", &first.modified_code))
        .unwrap();
    assert_eq!(second.modified_code, first.modified_code);

    let js = "class Box {\n  /** Opens the box. */\n  open() {\n    return 1;\n  }\n}\n";
    let first = service
        .generate(&ScriptedSummarizer::failing(&["open"]), &GenerateRequest::new("js", js))
        .unwrap();
    assert!(first.modified_code.contains("/** Opens the box. */\n  open() {"));
    let second = service
        .generate(&ScriptedSummarizer::failing(&["open"]), &GenerateRequest::new("js", &first.modified_code))
        .unwrap();
    assert_eq!(second.modified_code, first.modified_code);
}

#[test]
fn test_one_line_python_bodies_stay_valid() {
    let response = service()
        .generate(
            &ScriptedSummarizer::new(),
            &GenerateRequest::new("python", "class A:\n    def f(self): return 1\n    x = 2\n"),
        )
        .unwrap();
    assert_eq!(
        response.modified_code,
        "class A:\n    \"\"\"A documented.\"\"\"\n    def f(self):\n        \"\"\"f documented.\"\"\"\n        return 1\n    x = 2\n"
    );
}

#[test]
fn test_crlf_source_keeps_crlf() {
    let response = service()
        .generate(
            &ScriptedSummarizer::new(),
            &GenerateRequest::new("python", "def f():\r\n    return 1\r\n"),
        )
        .unwrap();
    assert_eq!(response.modified_code, "def f():\r\n    \"\"\"f documented.\"\"\"\r\n    return 1\r\n");
}

#[test]
fn test_unsupported_language_calls_nothing() {
    let summarizer = ScriptedSummarizer::new();
    let err = service()
        .generate(&summarizer, &GenerateRequest::new("cobol", "MOVE A TO B."))
        .unwrap_err();

    assert!(matches!(err, DocstitchError::UnsupportedLanguage(_)));
    assert!(summarizer.calls().is_empty());
}

#[test]
fn test_syntax_error_aborts_before_summarizing() {
    let summarizer = ScriptedSummarizer::new();
    let err = service()
        .generate(&summarizer, &GenerateRequest::new("python", "def f(:\n"))
        .unwrap_err();

    assert!(err.is_client_error());
    assert!(summarizer.calls().is_empty());
}

#[test]
fn test_source_without_declarations_is_unchanged() {
    let source = "x = 1\nprint(x)\n";
    let response = service()
        .generate(&ScriptedSummarizer::new(), &GenerateRequest::new("python", source))
        .unwrap();
    assert_eq!(response.modified_code, source);
    assert!(response.docs.is_empty());
}

#[test]
fn test_response_json_shape() {
    let config = DocstitchConfig::default().pipeline(|c| c.format(DocFormat::Pep257));
    let response = GenerateDocsService::new(config)
        .unwrap()
        .generate(&ScriptedSummarizer::new(), &GenerateRequest::new("python", "def f():\n    pass\n"))
        .unwrap();

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["modified_code"], "def f():\n    \"\"\"f documented.\"\"\"\n    pass\n");
    assert_eq!(json["docs"][0]["name"], "f");
    assert_eq!(json["docs"][0]["start_lineno"], 1);
    assert_eq!(json["docs"][0]["end_lineno"], 2);
    assert_eq!(json["docs"][0]["generated_docstring"], "f documented.");
}
