//! Documentation block styles
//!
//! A style knows how to recognise an existing block in a line buffer and
//! how to render new text as block lines.

use crate::shared::models::{DocstitchError, Result};
use crate::shared::text::strip_line_ending;

/// Documentation block convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocStyle {
    /// Python docstring: `"""text"""`
    TripleQuote,
    /// Javadoc / JSDoc / Doxygen: `/** text */`
    BlockComment,
}

impl DocStyle {
    /// If `line` opens a documentation block, the delimiter that closes it
    /// and the rest of the line after the opener
    pub fn opener<'a>(&self, line: &'a str) -> Option<(&'static str, &'a str)> {
        let trimmed = line.trim_start();
        match self {
            DocStyle::TripleQuote => {
                // String prefixes (r, u, b, f and two-letter combos) precede the quotes
                let prefix_len = trimmed
                    .chars()
                    .take(2)
                    .take_while(|c| matches!(c, 'r' | 'R' | 'u' | 'U' | 'b' | 'B' | 'f' | 'F'))
                    .count();
                let body = &trimmed[prefix_len..];
                ["\"\"\"", "'''"].into_iter().find_map(|quote| {
                    body.strip_prefix(quote).map(|rest| (quote, rest))
                })
            }
            DocStyle::BlockComment => trimmed.strip_prefix("/**").map(|rest| ("*/", rest)),
        }
    }

    /// Locate an existing block whose opener is `lines[first]`
    ///
    /// Returns the index of the line holding the closing delimiter, `None`
    /// when `lines[first]` does not open a block or code follows the closing
    /// delimiter on its line, and
    /// [`DocstitchError::UnterminatedDocBlock`] when no closing delimiter
    /// appears within `max_lines` lines.
    pub fn find_block(
        &self,
        lines: &[String],
        first: usize,
        max_lines: usize,
    ) -> Result<Option<usize>> {
        let Some(line) = lines.get(first) else {
            return Ok(None);
        };
        let Some((close, rest)) = self.opener(strip_line_ending(line)) else {
            return Ok(None);
        };
        if let Some(pos) = rest.find(close) {
            return Ok(closes_line(&rest[pos + close.len()..]).then_some(first));
        }

        let last = lines.len().min(first.saturating_add(max_lines));
        for (idx, line) in lines.iter().enumerate().take(last).skip(first + 1) {
            let text = strip_line_ending(line);
            if let Some(pos) = text.find(close) {
                return Ok(closes_line(&text[pos + close.len()..]).then_some(idx));
            }
        }
        Err(DocstitchError::UnterminatedDocBlock { line: first + 1 })
    }

    /// Escape delimiter sequences so `text` cannot end the block early
    pub fn sanitize(&self, text: &str) -> String {
        match self {
            DocStyle::TripleQuote => {
                let mut escaped = text.replace("\"\"\"", "\\\"\\\"\\\"");
                let trailing_backslashes = escaped.chars().rev().take_while(|c| *c == '\\').count();
                if trailing_backslashes % 2 == 1 {
                    escaped.push('\\');
                } else if let Some(head) = escaped.strip_suffix('"') {
                    // A bare trailing quote would merge with the closing delimiter
                    let backslashes = head.chars().rev().take_while(|c| *c == '\\').count();
                    if backslashes % 2 == 0 {
                        escaped.pop();
                        escaped.push_str("\\\"");
                    }
                }
                escaped
            }
            DocStyle::BlockComment => text.replace("*/", "*\\/"),
        }
    }

    /// Render `text` as block lines (without terminators), each prefixed by `indent`
    ///
    /// Empty text still renders a block.
    pub fn render(&self, indent: &str, text: &str) -> Vec<String> {
        let sanitized = self.sanitize(text.trim());
        let body: Vec<&str> = sanitized.lines().map(str::trim_end).collect();
        let indented = |line: &str| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        };

        match self {
            DocStyle::TripleQuote => match body.as_slice() {
                [] => vec![format!("{}\"\"\"\"\"\"", indent)],
                [only] => vec![format!("{}\"\"\"{}\"\"\"", indent, only)],
                [first, rest @ ..] => {
                    let mut out = vec![format!("{}\"\"\"{}", indent, first)];
                    out.extend(rest.iter().map(|l| indented(l)));
                    out.push(format!("{}\"\"\"", indent));
                    out
                }
            },
            DocStyle::BlockComment => match body.as_slice() {
                [] => vec![format!("{}/** */", indent)],
                [only] => vec![format!("{}/** {} */", indent, only)],
                lines => {
                    let mut out = vec![format!("{}/**", indent)];
                    out.extend(lines.iter().map(|l| {
                        if l.is_empty() {
                            format!("{} *", indent)
                        } else {
                            format!("{} * {}", indent, l)
                        }
                    }));
                    out.push(format!("{} */", indent));
                    out
                }
            },
        }
    }
}

/// Nothing but whitespace after a closing delimiter
fn closes_line(after: &str) -> bool {
    after.trim().is_empty()
}
