//! Custom assertions

use docstitch_core::Declaration;

/// Assert declaration names in order
pub fn assert_names(decls: &[Declaration], expected: &[&str]) {
    let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, expected, "Unexpected declaration names");
}

/// Assert the sort and nesting invariants of an extraction result
pub fn assert_well_ordered(decls: &[Declaration]) {
    for pair in decls.windows(2) {
        assert!(
            pair[0].start_line <= pair[1].start_line,
            "Declarations out of order: {} (line {}) before {} (line {})",
            pair[0].name,
            pair[0].start_line,
            pair[1].name,
            pair[1].start_line
        );
    }
    for decl in decls {
        assert!(decl.start_line <= decl.header_end_line, "{}: header before start", decl.name);
        assert!(decl.start_line <= decl.end_line, "{}: end before start", decl.name);
        assert!(decl.generated_doc.is_none(), "{}: generated doc set by extractor", decl.name);
    }
}
