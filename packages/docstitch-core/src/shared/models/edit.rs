//! Edit requests consumed by the patcher

use serde::{Deserialize, Serialize};

use super::declaration::{Declaration, DeclarationKind, InlineBody};

/// What the patcher knows about a block already present after the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingBlock {
    /// Unknown; look for a block opening on the line right after the header
    #[default]
    Scan,
    /// No replaceable block; always insert
    Absent,
    /// Replace these 1-based inclusive lines
    Lines { start: usize, end: usize },
}

impl ExistingBlock {
    pub fn is_scan(&self) -> bool {
        matches!(self, ExistingBlock::Scan)
    }
}

/// One pending documentation insert/replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    pub start_line: usize,
    pub end_line: usize,
    /// Line after which the block is placed; `None` means `start_line`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_end_line: Option<usize>,
    pub doc_text: String,
    #[serde(default, skip_serializing_if = "ExistingBlock::is_scan")]
    pub existing: ExistingBlock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_body: Option<InlineBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DeclarationKind>,
}

impl EditRequest {
    pub fn new(start_line: usize, end_line: usize, doc_text: impl Into<String>) -> Self {
        Self {
            start_line,
            end_line,
            header_end_line: None,
            doc_text: doc_text.into(),
            existing: ExistingBlock::Scan,
            inline_body: None,
            kind: None,
        }
    }

    /// Build an edit that targets `decl`, carrying everything the extractor
    /// located about it
    pub fn for_declaration(decl: &Declaration, doc_text: impl Into<String>) -> Self {
        let header_end_line =
            (decl.header_end_line != decl.start_line).then_some(decl.header_end_line);
        let existing = match decl.doc_span {
            Some(span) => ExistingBlock::Lines {
                start: span.start_line,
                end: span.end_line,
            },
            None => ExistingBlock::Absent,
        };
        Self {
            start_line: decl.start_line,
            end_line: decl.end_line,
            header_end_line,
            doc_text: doc_text.into(),
            existing,
            inline_body: decl.inline_body,
            kind: Some(decl.kind),
        }
    }

    pub fn with_header_end(mut self, line: usize) -> Self {
        self.header_end_line = Some(line);
        self
    }

    pub fn with_existing(mut self, existing: ExistingBlock) -> Self {
        self.existing = existing;
        self
    }

    /// The line after which the documentation block belongs
    pub fn anchor_line(&self) -> usize {
        self.header_end_line.unwrap_or(self.start_line)
    }
}

impl From<(usize, usize, String)> for EditRequest {
    fn from((start_line, end_line, doc_text): (usize, usize, String)) -> Self {
        Self::new(start_line, end_line, doc_text)
    }
}
