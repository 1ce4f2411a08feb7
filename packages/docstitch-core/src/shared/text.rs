//! Line-oriented text helpers
//!
//! Lines keep their terminators so that a buffer can be split, edited and
//! joined back without touching bytes outside the edited range.

/// Split `text` into lines, each keeping its `\n` / `\r\n` terminator.
///
/// The last line has no terminator when the text does not end with one.
/// An empty text has zero lines.
pub fn split_lines_keep_ends(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Number of lines as counted by [`split_lines_keep_ends`]
pub fn line_count(text: &str) -> usize {
    text.split_inclusive('\n').count()
}

/// Line content without its terminator
pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

/// The terminator of `line` (empty for an unterminated last line)
pub fn line_ending(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// Dominant terminator of a whole text, `\n` when it has none
pub fn detect_line_ending(text: &str) -> &'static str {
    let crlf = text.matches("\r\n").count();
    let lf = text.matches('\n').count();
    if crlf > 0 && crlf * 2 >= lf {
        "\r\n"
    } else {
        "\n"
    }
}

/// Leading spaces/tabs of a line
pub fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

/// 1-based inclusive slice of lines, joined with their original terminators
pub fn slice_lines(text: &str, start_line: usize, end_line: usize) -> String {
    if start_line == 0 || end_line < start_line {
        return String::new();
    }
    text.split_inclusive('\n')
        .skip(start_line - 1)
        .take(end_line - start_line + 1)
        .collect::<String>()
}
