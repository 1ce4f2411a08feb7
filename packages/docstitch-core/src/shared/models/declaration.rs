//! Declaration model
//!
//! A `Declaration` is one documentable unit (function, method or class)
//! found by a language plugin. Records are plain values: the extractor
//! builds them, the caller fills in `generated_doc`, and the patcher only
//! ever sees the positions.

use serde::{Deserialize, Serialize};

use super::span::Span;

/// Name used when a declaration has no identifier (e.g. `export default function () {}`)
pub const ANONYMOUS: &str = "<anonymous>";

/// Declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Function,
    Method,
    Class,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Method => "method",
            DeclarationKind::Class => "class",
        }
    }
}

/// How much of a declaration the grammar adapter can locate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fidelity {
    /// Header, body end and existing documentation are all known
    Full,
    /// Only the header is known; `end_line == start_line`, no existing doc
    SignatureOnly,
}

/// Body written on the header line, as in `def f(): return 1`
///
/// Columns are byte offsets into the header end line. The patcher keeps the
/// header up to `header_end`, drops `header_end..body_start` and moves the
/// rest onto its own line below the new block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InlineBody {
    /// Just past the `:` that closes the header
    pub header_end: usize,
    /// Where the kept body text begins
    pub body_start: usize,
}

/// One documentable unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// 1-based line of the declaration keyword
    pub start_line: usize,
    /// 1-based inclusive last line of the body (== start_line for signature-only)
    pub end_line: usize,
    /// 1-based line the header ends on; the doc block goes right after it
    pub header_end_line: usize,
    pub fidelity: Fidelity,
    pub existing_doc: Option<String>,
    /// Lines of the existing block the patcher may replace
    ///
    /// `None` means a new block is inserted, either because there is no
    /// block or because it shares its lines with other code. Signature-only
    /// adapters report this even though they drop the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_span: Option<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_body: Option<InlineBody>,
    /// Filled in by the caller, never by the extractor
    pub generated_doc: Option<String>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            start_line: span.start_line,
            end_line: span.end_line.max(span.start_line),
            header_end_line: span.start_line,
            fidelity: Fidelity::Full,
            existing_doc: None,
            doc_span: None,
            inline_body: None,
            generated_doc: None,
        }
    }

    /// Builder: set the line the header ends on (clamped into the declaration)
    pub fn with_header_end(mut self, line: usize) -> Self {
        self.header_end_line = line.clamp(self.start_line, self.end_line);
        self
    }

    /// Builder: attach documentation that already exists in the source
    pub fn with_existing_doc(mut self, doc: impl Into<String>) -> Self {
        self.existing_doc = Some(doc.into());
        self
    }

    /// Builder: lines of a block that can be replaced in place
    pub fn with_doc_span(mut self, span: Span) -> Self {
        self.doc_span = Some(span);
        self
    }

    pub fn with_inline_body(mut self, inline: InlineBody) -> Self {
        self.inline_body = Some(inline);
        self
    }

    /// Builder: degrade to header-only positions
    ///
    /// The body end collapses onto the start line and any existing doc is
    /// dropped. `header_end_line` and `doc_span` are kept so a block still
    /// lands after a multi-line signature and replaces its earlier copy.
    pub fn signature_only(mut self) -> Self {
        self.fidelity = Fidelity::SignatureOnly;
        self.end_line = self.start_line;
        self.existing_doc = None;
        self
    }
}
