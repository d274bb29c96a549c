//! Pieces shared by the code and document window builders.

use crate::token_index::TokenIndex;
use crate::types::Chunk;

/// Whether lines `start..=end` fit within a token and line budget
pub(crate) fn fits(
    index: &TokenIndex,
    start: usize,
    end: usize,
    max_tokens: usize,
    max_lines: usize,
) -> bool {
    index.span(start, end) <= max_tokens && end - start + 1 <= max_lines
}

/// Grow a window from `start` until the next line would exceed the budget.
///
/// The start line itself is always included, even when it alone is over
/// budget.
pub(crate) fn extend(
    index: &TokenIndex,
    start: usize,
    last: usize,
    max_tokens: usize,
    max_lines: usize,
) -> usize {
    let mut end = start;
    while end < last && fits(index, start, end + 1, max_tokens, max_lines) {
        end += 1;
    }
    end
}

/// First line of the tail a back-off search may look at: the last `percent`
/// of the window, never less than one line
pub(crate) fn backoff_floor(start: usize, max_end: usize, percent: usize) -> usize {
    let window = max_end - start + 1;
    let tail = (window * percent / 100).max(1);
    (max_end + 1 - tail).max(start)
}

/// Materialize lines `start..=end` (0-based) as a chunk
pub(crate) fn emit(lines: &[&str], index: &TokenIndex, start: usize, end: usize) -> Chunk {
    Chunk::new(
        lines[start..=end].join("\n"),
        start + 1,
        end + 1,
        index.start(start),
        index.end(end),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::EstimatingCounter;

    fn index(lines: &[&str]) -> TokenIndex {
        TokenIndex::build(lines, &EstimatingCounter).unwrap()
    }

    #[test]
    fn test_extend_stops_at_token_budget() {
        let lines = ["abcd"; 10];
        let idx = index(&lines);
        assert_eq!(extend(&idx, 0, 9, 3, 100), 2);
        assert_eq!(extend(&idx, 4, 9, 3, 100), 6);
    }

    #[test]
    fn test_extend_stops_at_line_budget() {
        let lines = ["abcd"; 10];
        let idx = index(&lines);
        assert_eq!(extend(&idx, 0, 9, 100, 4), 3);
        assert_eq!(extend(&idx, 0, 9, 100, 100), 9);
    }

    #[test]
    fn test_extend_keeps_oversized_start_line() {
        let long = "x".repeat(400);
        let lines = [long.as_str(), "a"];
        let idx = index(&lines);
        assert_eq!(extend(&idx, 0, 1, 10, 10), 0);
    }

    #[test]
    fn test_backoff_floor() {
        assert_eq!(backoff_floor(0, 9, 30), 7);
        assert_eq!(backoff_floor(0, 9, 40), 6);
        assert_eq!(backoff_floor(5, 6, 30), 6);
        assert_eq!(backoff_floor(3, 3, 40), 3);
    }

    #[test]
    fn test_emit() {
        let lines = ["abcd", "ef", "ghijklmn"];
        let idx = index(&lines);
        let chunk = emit(&lines, &idx, 1, 2);
        assert_eq!(chunk.content, "ef\nghijklmn");
        assert_eq!((chunk.line_start, chunk.line_end), (2, 3));
        assert_eq!((chunk.token_start, chunk.token_end), (1, 4));
    }
}
