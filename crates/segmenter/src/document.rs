use crate::config::DocumentLimits;
use crate::doc_boundary;
use crate::fence::{block_containing, find_fenced_blocks, FencedBlock};
use crate::overlap::document_next_start;
use crate::token_index::TokenIndex;
use crate::types::Chunk;
use crate::window::{backoff_floor, emit, extend, fits};

/// Share of the window, from its end, searched for a cut point
const BACKOFF_PERCENT: usize = 40;

/// How a prose extension came to a stop
enum Extension {
    /// Hit the prose budget at this line
    Budget(usize),
    /// Stopped on this line because the next one opens a block that does
    /// not fit the remaining budget.
    ///
    /// The cut is final: no back-off and no overlap. The next chunk opens on
    /// the fence line. Backing off or overlapping here re-extends to the same
    /// fence and degenerates into one-line chunks.
    BeforeBlock(usize),
}

/// Sliding-window chunking for prose and markdown.
///
/// Fenced code blocks are kept whole whenever they fit the block budget.
pub fn chunk_document(lines: &[&str], index: &TokenIndex, limits: &DocumentLimits) -> Vec<Chunk> {
    if lines.is_empty() {
        return Vec::new();
    }
    let last = lines.len() - 1;

    if index.total() <= limits.max_tokens && lines.len() <= limits.max_lines {
        return vec![emit(lines, index, 0, last)];
    }

    let blocks = find_fenced_blocks(lines);
    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let mut before_block = false;
        let end = match block_containing(&blocks, start) {
            Some(block)
                if fits(
                    index,
                    start,
                    block.end,
                    limits.block_max_tokens,
                    limits.block_max_lines,
                ) =>
            {
                block.end
            }
            Some(_) => {
                let max_end = extend(
                    index,
                    start,
                    last,
                    limits.block_max_tokens,
                    limits.block_max_lines,
                );
                back_off(lines, &blocks, start, max_end, last)
            }
            None => match extend_prose(index, &blocks, start, last, limits) {
                Extension::BeforeBlock(end) => {
                    before_block = true;
                    end
                }
                Extension::Budget(max_end) => back_off(lines, &blocks, start, max_end, last),
            },
        };

        log::trace!("document chunk lines {}-{}", start + 1, end + 1);
        chunks.push(emit(lines, index, start, end));

        if end >= last {
            break;
        }

        // Overlap into the prose before a block would only rebuild a shorter
        // window that stops at the same fence.
        let next = if before_block {
            end + 1
        } else {
            document_next_start(lines, index, &blocks, limits, start, end)
        };
        start = if next > start { next } else { start + 1 };
    }

    log::debug!(
        "chunked {} lines ({} tokens, {} fenced blocks) into {} document chunks",
        lines.len(),
        index.total(),
        blocks.len(),
        chunks.len()
    );
    chunks
}

fn extend_prose(
    index: &TokenIndex,
    blocks: &[FencedBlock],
    start: usize,
    last: usize,
    limits: &DocumentLimits,
) -> Extension {
    let mut end = start;
    while end < last {
        let candidate = end + 1;
        if let Some(block) = block_containing(blocks, candidate) {
            if block.start == candidate
                && !fits(index, start, block.end, limits.max_tokens, limits.max_lines)
            {
                return Extension::BeforeBlock(end);
            }
        }
        if !fits(index, start, candidate, limits.max_tokens, limits.max_lines) {
            break;
        }
        end = candidate;
    }
    Extension::Budget(end)
}

fn back_off(
    lines: &[&str],
    blocks: &[FencedBlock],
    start: usize,
    max_end: usize,
    last: usize,
) -> usize {
    if max_end == last {
        return max_end;
    }
    let lo = backoff_floor(start, max_end, BACKOFF_PERCENT);
    doc_boundary::find_best(lines, blocks, start, lo, max_end).unwrap_or(max_end)
}
