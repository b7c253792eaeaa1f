//! Greedy word-wrap over visible widths.
//!
//! Cell text may contain embedded newlines; each segment wraps
//! independently with the newline kept as a hard break. Tokens are
//! whitespace-delimited and never split, so a single token longer than
//! the target width is emitted alone on its own line. Callers tolerate
//! that one over-wide line rather than seeing a mid-word break.

use crate::ansi::visible_len;

/// Wrap `text` into display lines no wider than `width` visible cells
/// (except for single over-long tokens).
///
/// Empty input yields exactly one empty line.
#[must_use]
pub fn wrap_visible(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);

    if text.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    for segment in text.split('\n') {
        wrap_segment(segment, width, &mut lines);
    }
    lines
}

fn wrap_segment(segment: &str, width: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0;

    for token in segment.split_whitespace() {
        let token_len = visible_len(token);
        let add = if current.is_empty() { 0 } else { 1 } + token_len;
        if current_len + add <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(token);
            current_len += add;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(token);
            current_len = token_len;
        }
    }

    // A whitespace-only segment still produces a line.
    lines.push(current);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_single_empty_line() {
        assert_eq!(wrap_visible("", 10), vec![String::new()]);
    }

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(wrap_visible("hello", 10), vec!["hello"]);
    }

    #[test]
    fn test_greedy_wrap() {
        let lines = wrap_visible("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert!(lines.iter().all(|l| visible_len(l) <= 9));
    }

    #[test]
    fn test_exact_fit_boundary() {
        // "ab cd" is exactly 5 cells: the separator counts.
        assert_eq!(wrap_visible("ab cd", 5), vec!["ab cd"]);
        assert_eq!(wrap_visible("ab cd", 4), vec!["ab", "cd"]);
    }

    #[test]
    fn test_overlong_token_alone() {
        let token = "a_very_long_single_token_without_spaces";
        let lines = wrap_visible(token, 10);
        assert_eq!(lines, vec![token]);
    }

    #[test]
    fn test_overlong_token_flushes_current_line() {
        let lines = wrap_visible("ok reallyreallylong ok", 6);
        assert_eq!(lines, vec!["ok", "reallyreallylong", "ok"]);
    }

    #[test]
    fn test_embedded_newlines_hard_break() {
        let lines = wrap_visible("one\ntwo three", 20);
        assert_eq!(lines, vec!["one", "two three"]);
    }

    #[test]
    fn test_blank_segment_kept() {
        let lines = wrap_visible("a\n\nb", 10);
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_escape_sequences_zero_width() {
        let styled = "\x1b[32mgreen\x1b[0m token";
        let lines = wrap_visible(styled, 5);
        assert_eq!(lines.len(), 2);
        assert_eq!(visible_len(&lines[0]), 5);
    }

    #[test]
    fn test_wrap_idempotent() {
        let text = "the quick brown fox jumps over the lazy dog";
        for width in [5, 8, 12, 80] {
            let once = wrap_visible(text, width);
            let again: Vec<String> = once
                .iter()
                .flat_map(|line| wrap_visible(line, width))
                .collect();
            assert_eq!(once, again, "width {width}");
        }
    }
}
