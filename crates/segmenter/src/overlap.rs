//! Where the next window starts after a chunk has been emitted.
//!
//! Every function here returns a line no later than `end + 1`, so consecutive
//! chunks never leave a gap. Forcing forward progress is left to the builders.

use crate::code_boundary::{self, CodeBoundary};
use crate::config::{ChunkLimits, DocumentLimits};
use crate::fence::{block_containing, FencedBlock};
use crate::token_index::TokenIndex;

const CODE_RESTART_RADIUS: usize = 3;

/// Raw overlap start: the first line whose token start reaches
/// `token_end - overlap_tokens`, limited to `max_lines` repeated lines
pub fn overlap_line(
    index: &TokenIndex,
    start: usize,
    end: usize,
    overlap_tokens: usize,
    max_lines: usize,
) -> usize {
    let desired = index
        .end(end)
        .saturating_sub(overlap_tokens)
        .max(index.start(start));
    let line = index.first_line_at_or_after(desired, start, end + 1);
    line.max((end + 1).saturating_sub(max_lines))
}

/// Next start for code: raw overlap, then snapped to just after a nearby
/// blank-line-or-stronger boundary when one exists past the chunk start
pub fn code_next_start(
    lines: &[&str],
    index: &TokenIndex,
    limits: &ChunkLimits,
    start: usize,
    end: usize,
) -> usize {
    let next = overlap_line(
        index,
        start,
        end,
        limits.overlap_tokens,
        limits.max_overlap_lines(),
    );
    if next > end {
        return next;
    }

    let lo = next.saturating_sub(CODE_RESTART_RADIUS).max(start + 1);
    let hi = (next + CODE_RESTART_RADIUS).min(end);
    if lo > hi {
        return next;
    }

    match code_boundary::find_best(lines, lo, hi, CodeBoundary::BlankLine) {
        Some(boundary) => {
            log::trace!("code overlap snapped from line {next} to after boundary {boundary}");
            boundary + 1
        }
        None => next,
    }
}

/// Next start for documents: never restart inside a fenced block, and skip
/// one blank line already covered by the emitted chunk
pub fn document_next_start(
    lines: &[&str],
    index: &TokenIndex,
    blocks: &[FencedBlock],
    limits: &DocumentLimits,
    start: usize,
    end: usize,
) -> usize {
    let mut next = overlap_line(
        index,
        start,
        end,
        limits.overlap_tokens,
        limits.overlap_lines,
    );

    if let Some(block) = block_containing(blocks, next) {
        // A block cut by this chunk continues right after it.
        next = if block.end <= end { block.end + 1 } else { end + 1 };
    }

    if next <= end && lines[next].trim().is_empty() {
        next += 1;
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fence::find_fenced_blocks;
    use crate::tokenizer::EstimatingCounter;
    use crate::SegmenterConfig;

    fn index(lines: &[&str]) -> TokenIndex {
        TokenIndex::build(lines, &EstimatingCounter).unwrap()
    }

    #[test]
    fn test_overlap_line_by_tokens() {
        // One token per line.
        let lines = ["abcd"; 12];
        let idx = index(&lines);
        assert_eq!(overlap_line(&idx, 0, 9, 3, 100), 7);
        assert_eq!(overlap_line(&idx, 0, 9, 0, 100), 10);
        assert_eq!(overlap_line(&idx, 5, 9, 100, 100), 5);
    }

    #[test]
    fn test_overlap_line_capped_by_lines() {
        let lines = ["abcd"; 12];
        let idx = index(&lines);
        assert_eq!(overlap_line(&idx, 0, 9, 8, 2), 8);
        assert_eq!(overlap_line(&idx, 0, 9, 8, 0), 10);
    }

    #[test]
    fn test_code_next_start_snaps_to_blank_line() {
        let mut lines = vec!["let a = 1;"; 20];
        lines[14] = "";
        let idx = index(&lines);
        let limits = ChunkLimits::from_config(&SegmenterConfig::default().with_max_lines(20));
        // Overlap budget of 64 tokens covers the whole chunk; line cap of 5
        // puts the raw start at 15, and the blank line at 14 pulls it to 15.
        assert_eq!(limits.max_overlap_lines(), 5);
        assert_eq!(code_next_start(&lines, &idx, &limits, 0, 19), 15);

        lines[14] = "let a = 1;";
        lines[17] = "";
        let idx = index(&lines);
        assert_eq!(code_next_start(&lines, &idx, &limits, 0, 19), 18);
    }

    #[test]
    fn test_code_next_start_without_overlap() {
        let lines = vec!["let a = 1;"; 20];
        let idx = index(&lines);
        let limits = ChunkLimits::from_config(&SegmenterConfig::default().with_overlap_tokens(0));
        assert_eq!(code_next_start(&lines, &idx, &limits, 0, 9), 10);
    }

    #[test]
    fn test_document_next_start_skips_block_and_blank() {
        let lines = [
            "text one", "```", "code", "```", "text two", "", "text three", "tail",
        ];
        let idx = index(&lines);
        let blocks = find_fenced_blocks(&lines);
        let limits = DocumentLimits::default();

        // Overlap lands on the closing fence; restart after the block.
        assert_eq!(
            document_next_start(&lines, &idx, &blocks, &limits, 0, 4),
            4
        );
        // Overlap lands on the blank line; skip it.
        assert_eq!(
            document_next_start(&lines, &idx, &blocks, &limits, 4, 6),
            6
        );
    }

    #[test]
    fn test_document_next_start_inside_unfinished_block() {
        let mut lines = vec!["code line"; 40];
        lines[0] = "```";
        lines[39] = "```";
        let idx = index(&lines);
        let blocks = find_fenced_blocks(&lines);
        let limits = DocumentLimits::default();
        assert_eq!(
            document_next_start(&lines, &idx, &blocks, &limits, 0, 29),
            30
        );
    }
}
