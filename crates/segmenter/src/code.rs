use crate::code_boundary::{self, CodeBoundary};
use crate::config::ChunkLimits;
use crate::overlap::code_next_start;
use crate::token_index::TokenIndex;
use crate::types::Chunk;
use crate::window::{backoff_floor, emit, extend};

/// Share of the window, from its end, searched for a cut point
const BACKOFF_PERCENT: usize = 30;

/// Sliding-window chunking for program-like text
pub fn chunk_code(lines: &[&str], index: &TokenIndex, limits: &ChunkLimits) -> Vec<Chunk> {
    if lines.is_empty() {
        return Vec::new();
    }
    let last = lines.len() - 1;

    if index.total() <= limits.max_tokens && lines.len() <= limits.max_lines {
        return vec![emit(lines, index, 0, last)];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let max_end = extend(index, start, last, limits.max_tokens, limits.max_lines);
        let end = if max_end == last {
            max_end
        } else {
            let lo = backoff_floor(start, max_end, BACKOFF_PERCENT);
            code_boundary::find_best(lines, lo, max_end, CodeBoundary::Semicolon)
                .unwrap_or(max_end)
        };

        log::trace!(
            "code chunk lines {}-{} (window ended at {})",
            start + 1,
            end + 1,
            max_end + 1
        );
        chunks.push(emit(lines, index, start, end));

        if end >= last {
            break;
        }

        let next = code_next_start(lines, index, limits, start, end);
        start = if next > start { next } else { start + 1 };
    }

    log::debug!(
        "chunked {} lines ({} tokens) into {} code chunks",
        lines.len(),
        index.total(),
        chunks.len()
    );
    chunks
}
