//! Line splitting and comment stripping, applied before any parsing.

/// Starts a comment that runs to the end of the line.
pub const COMMENT_MARKER: &str = "#--";

/// Strips a trailing `#--` comment and any trailing whitespace.
pub fn preprocess_line(line: &str) -> &str {
    let code = match line.find(COMMENT_MARKER) {
        Some(at) => &line[..at],
        None => line,
    };
    code.trim_end()
}

/// Splits on `\n`, `\r\n`, or a lone `\r`.
pub fn split_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = source;
    while let Some(at) = rest.find(['\n', '\r']) {
        lines.push(&rest[..at]);
        let skip = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[at + skip..];
    }
    lines.push(rest);
    lines
}

/// Split and preprocess; index `i` holds source line `i + 1`.
pub fn preprocess(source: &str) -> Vec<&str> {
    split_lines(source).into_iter().map(preprocess_line).collect()
}
