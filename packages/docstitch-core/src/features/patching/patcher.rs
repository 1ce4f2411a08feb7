//! Documentation block patcher
//!
//! Applies a set of [`EditRequest`]s to source text, inserting or replacing
//! one documentation block after each declaration header.
//!
//! # Ordering
//!
//! Edits are applied in descending anchor order. Every edit changes the
//! line count only at or below its own header, so applying from the bottom
//! up keeps all remaining edits' line numbers valid against the original
//! text. Only one edit per anchor line is applied: the outermost, which
//! sorts first.
//!
//! # Locating an existing block
//!
//! Edits built from extracted declarations say where the old block is, or
//! that there is none to replace. Other edits fall back to looking for a
//! block opening on the line right after the header.

use tracing::debug;

use super::style::DocStyle;
use crate::config::PatchConfig;
use crate::features::parsing::ports::LanguageId;
use crate::shared::models::{
    DeclarationKind, DocstitchError, EditRequest, ExistingBlock, InlineBody, Result,
};
use crate::shared::text::{
    detect_line_ending, leading_whitespace, line_ending, split_lines_keep_ends, strip_line_ending,
};

/// Patcher bound to one documentation style and patch configuration
#[derive(Debug, Clone)]
pub struct DocPatcher {
    style: DocStyle,
    config: PatchConfig,
}

impl DocPatcher {
    pub fn new(style: DocStyle) -> Self {
        Self::with_config(style, PatchConfig::default())
    }

    pub fn with_config(style: DocStyle, config: PatchConfig) -> Self {
        Self { style, config }
    }

    /// Patcher for a language tag's documentation style
    pub fn for_language(language: &str, config: PatchConfig) -> Result<Self> {
        let lang = LanguageId::from_tag(language)
            .ok_or_else(|| DocstitchError::unsupported_language(language))?;
        Ok(Self::with_config(lang.doc_style(), config))
    }

    pub fn style(&self) -> DocStyle {
        self.style
    }

    /// Apply `edits` to `original`
    ///
    /// All edits are validated against the original text before any is
    /// applied; an invalid edit fails the whole call.
    pub fn apply(&self, original: &str, edits: &[EditRequest]) -> Result<String> {
        let mut lines = split_lines_keep_ends(original);
        let line_count = lines.len();
        for edit in edits {
            validate_edit(edit, &lines)?;
        }

        let default_eol = detect_line_ending(original);
        let mut order: Vec<&EditRequest> = edits.iter().collect();
        order.sort_by_key(|e| (e.anchor_line(), e.start_line));
        order.dedup_by_key(|e| e.anchor_line());

        for edit in order.into_iter().rev() {
            self.apply_one(&mut lines, edit, default_eol)?;
        }

        debug!(
            "Applied {} edits ({:?}) to {} lines -> {} lines",
            edits.len(),
            self.style,
            line_count,
            lines.len()
        );
        Ok(lines.concat())
    }

    fn apply_one(&self, lines: &mut Vec<String>, edit: &EditRequest, default_eol: &str) -> Result<()> {
        let anchor = edit.anchor_line();
        if let Some(inline) = self.inline_body(lines, edit) {
            self.split_inline_body(lines, edit, inline, default_eol);
            return Ok(());
        }

        let header_eol = line_ending(&lines[anchor - 1]).to_string();
        let eol = if header_eol.is_empty() {
            default_eol
        } else {
            header_eol.as_str()
        };

        // 0-based (first, last) lines of the block being replaced
        let target = match edit.existing {
            ExistingBlock::Scan => self
                .style
                .find_block(lines, anchor, self.config.max_doc_block_lines)?
                .map(|close| (anchor, close)),
            ExistingBlock::Absent => None,
            ExistingBlock::Lines { start, end } => Some((start - 1, end - 1)),
        };

        let reference = target.map_or(anchor, |(first, _)| first);
        let indent = self.block_indent(lines, edit.start_line, reference);
        let rendered = self.style.render(&indent, &edit.doc_text);

        match target {
            Some((first, close)) => {
                let close_eol = line_ending(&lines[close]).to_string();
                let last = rendered.len() - 1;
                let block: Vec<String> = rendered
                    .into_iter()
                    .enumerate()
                    .map(|(i, line)| {
                        let end = if i == last { close_eol.as_str() } else { eol };
                        line + end
                    })
                    .collect();
                lines.splice(first..=close, block);
            }
            None => {
                let header_unterminated = header_eol.is_empty();
                if header_unterminated {
                    // Header was the final line without a newline; keep it that way
                    lines[anchor - 1].push_str(eol);
                }
                let mut block: Vec<String> = rendered.into_iter().map(|line| line + eol).collect();
                if header_unterminated {
                    if let Some(last) = block.last_mut() {
                        let trimmed = strip_line_ending(last).len();
                        last.truncate(trimmed);
                    }
                } else if self.needs_separator(lines, edit, anchor) {
                    block.push(eol.to_string());
                }
                lines.splice(anchor..anchor, block);
            }
        }
        Ok(())
    }

    /// Inline body to split off, from the edit or, for plain Python edits,
    /// from the header line itself
    fn inline_body(&self, lines: &[String], edit: &EditRequest) -> Option<InlineBody> {
        let anchor = edit.anchor_line();
        edit.inline_body.or_else(|| {
            let detect = edit.existing.is_scan()
                && self.style == DocStyle::TripleQuote
                && edit.start_line == anchor;
            detect
                .then(|| detect_inline_body(strip_line_ending(&lines[anchor - 1])))
                .flatten()
        })
    }

    /// Move a body written on the header line below a new block
    fn split_inline_body(
        &self,
        lines: &mut Vec<String>,
        edit: &EditRequest,
        inline: InlineBody,
        default_eol: &str,
    ) {
        let idx = edit.anchor_line() - 1;
        let base = leading_whitespace(strip_line_ending(&lines[edit.start_line - 1]));
        let indent = format!("{}{}", base, self.config.indent_unit);

        let header_eol = line_ending(&lines[idx]).to_string();
        let eol = if header_eol.is_empty() {
            default_eol
        } else {
            header_eol.as_str()
        };
        let text = strip_line_ending(&lines[idx]);
        let head = text[..inline.header_end].trim_end().to_string();
        let rest = text[inline.body_start..]
            .trim_start_matches(|c: char| c == ';' || c.is_whitespace())
            .trim_end();

        let mut parts = vec![head];
        parts.extend(self.style.render(&indent, &edit.doc_text));
        if !rest.is_empty() {
            parts.push(format!("{}{}", indent, rest));
        }
        let last = parts.len() - 1;
        let replaced: Vec<String> = parts
            .into_iter()
            .enumerate()
            .map(|(i, part)| part + if i == last { header_eol.as_str() } else { eol })
            .collect();
        lines.splice(idx..=idx, replaced);
    }

    /// A class block inserted right above a member would read as that
    /// member's doc, so a blank line follows it
    fn needs_separator(&self, lines: &[String], edit: &EditRequest, anchor: usize) -> bool {
        if self.style != DocStyle::BlockComment || edit.kind != Some(DeclarationKind::Class) {
            return false;
        }
        lines.get(anchor).is_some_and(|next| {
            let next = next.trim();
            !next.is_empty() && !next.starts_with('}')
        })
    }

    /// Indentation for the block: start line's indent plus one unit
    ///
    /// With `infer_indent`, a non-blank `lines[reference]` that is indented
    /// deeper than the start line supplies the indentation instead.
    fn block_indent(&self, lines: &[String], start_line: usize, reference: usize) -> String {
        let base = leading_whitespace(strip_line_ending(&lines[start_line - 1]));
        if self.config.infer_indent {
            if let Some(next) = lines.get(reference).map(|l| strip_line_ending(l)) {
                let ws = leading_whitespace(next);
                if !next.trim().is_empty() && ws.len() > base.len() && ws.starts_with(base) {
                    return ws.to_string();
                }
            }
        }
        format!("{}{}", base, self.config.indent_unit)
    }
}

/// Columns of a body written after the `:` of a one-line `def` or `class`
///
/// The colon is the first one outside brackets and string literals.
fn detect_inline_body(line: &str) -> Option<InlineBody> {
    let trimmed = line.trim_start();
    if !["def ", "async def ", "class "]
        .iter()
        .any(|kw| trimmed.starts_with(kw))
    {
        return None;
    }

    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '#' => return None,
            ':' if depth == 0 => {
                let header_end = i + 1;
                let body = line[header_end..].trim_start();
                if body.is_empty() || body.starts_with('#') {
                    return None;
                }
                return Some(InlineBody {
                    header_end,
                    body_start: line.len() - body.len(),
                });
            }
            _ => {}
        }
    }
    None
}

fn validate_edit(edit: &EditRequest, lines: &[String]) -> Result<()> {
    let line_count = lines.len();
    let fail = |reason: &str| {
        Err(DocstitchError::invalid_edit(
            edit.start_line,
            edit.end_line,
            line_count,
            reason,
        ))
    };
    if edit.start_line == 0 {
        return fail("line numbers are 1-based");
    }
    if edit.end_line < edit.start_line {
        return fail("end line precedes start line");
    }
    if edit.end_line > line_count {
        return fail("end line is past the end of the text");
    }
    let anchor = edit.anchor_line();
    if anchor < edit.start_line || anchor > line_count {
        return fail("header end line outside the text");
    }
    if let ExistingBlock::Lines { start, end } = edit.existing {
        if start <= anchor || end < start || end > line_count {
            return fail("existing block must lie between the header and the end of the text");
        }
    }
    if let Some(inline) = edit.inline_body {
        let text = strip_line_ending(&lines[anchor - 1]);
        let fits = inline.header_end <= inline.body_start
            && inline.body_start <= text.len()
            && text.is_char_boundary(inline.header_end)
            && text.is_char_boundary(inline.body_start);
        if !fits {
            return fail("inline body columns fall outside the header line");
        }
    }
    Ok(())
}

/// Apply `edits` to `original` using `style` and `config`
pub fn apply(
    original: &str,
    edits: &[EditRequest],
    style: DocStyle,
    config: &PatchConfig,
) -> Result<String> {
    DocPatcher::with_config(style, config.clone()).apply(original, edits)
}

/// Apply `edits` with the default configuration and the language's style
pub fn apply_for_language(language: &str, original: &str, edits: &[EditRequest]) -> Result<String> {
    DocPatcher::for_language(language, PatchConfig::default())?.apply(original, edits)
}
