//! Source context for error reports

use crate::trellis::error::Error;
use std::ops::Range;

/// Zero-based line and column (in chars) of byte `offset`
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count();
    let column = before
        .rsplit('\n')
        .next()
        .map(|l| l.chars().count())
        .unwrap_or(0);
    (line, column)
}

/// Numbered window around the line holding `span.start`: two lines before, the failing line
/// marked with `>>` and underlined, two lines after.
pub fn format_source_context(source: &str, span: &Range<usize>) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let (error_line, column) = line_col(source, span.start);

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for line_num in start_line..end_line {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, lines[line_num]));

        if line_num == error_line {
            let width = source
                .get(span.clone())
                .map(|s| s.lines().next().unwrap_or("").chars().count())
                .unwrap_or(0)
                .max(1);
            context.push_str(&format!(
                "       | {}{}\n",
                " ".repeat(column),
                "^".repeat(width)
            ));
        }
    }
    context
}

/// Where in the source an error points, when it can tell
pub fn error_span(err: &Error) -> Option<Range<usize>> {
    match err {
        Error::Lex(e) => e.position().map(|p| p..p + 1),
        Error::Parse(e) => e.token().map(|t| t.span.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let source = "ab\ncd\nef";
        assert_eq!(line_col(source, 0), (0, 0));
        assert_eq!(line_col(source, 4), (1, 1));
        assert_eq!(line_col(source, 100), (2, 2));
    }

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";
        let context = format_source_context(source, &(21..26));

        assert!(!context.contains("line 1"));
        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("       | ^^^^^\n"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 7"));
    }

    #[test]
    fn test_context_at_end_of_source() {
        let context = format_source_context("only", &(4..4));
        assert!(context.contains(">>   1 | only"));
        assert!(context.contains("    ^"));
    }
}
