//! Cut-point ranking for prose and markdown.

use crate::fence::{block_containing, is_fence_line, FencedBlock};
use once_cell::sync::Lazy;
use regex::Regex;

/// How good a line is as a document cut point, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocBoundary {
    None,
    ListItem,
    Paragraph,
    CodeBlockEnd,
    HorizontalRule,
    Heading,
}

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#{1,6}\s").expect("invalid regex"));
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([-*+]|\d+\.)\s").expect("invalid regex"));

fn is_horizontal_rule(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_')
        && trimmed.chars().count() >= 3
        && chars.all(|c| c == first)
}

/// Rank line `idx` of a document
#[must_use]
pub fn classify(lines: &[&str], idx: usize) -> DocBoundary {
    let line = lines[idx];
    let trimmed = line.trim();
    let previous_blank = idx
        .checked_sub(1)
        .is_none_or(|i| lines[i].trim().is_empty());

    if HEADING.is_match(line) {
        return DocBoundary::Heading;
    }
    if is_horizontal_rule(trimmed) {
        return DocBoundary::HorizontalRule;
    }
    if is_fence_line(line) && !previous_blank {
        return DocBoundary::CodeBlockEnd;
    }
    if trimmed.is_empty() && !previous_blank {
        return DocBoundary::Paragraph;
    }
    if LIST_ITEM.is_match(line) {
        return DocBoundary::ListItem;
    }
    DocBoundary::None
}

/// Best cut line in `lo..=hi` for a chunk opened at `start`, scanning backward.
///
/// Lines inside fenced blocks are never proposed. A heading after the chunk
/// start yields the line before it, so the heading opens the next chunk; the
/// chunk's own opening heading is not a candidate.
#[must_use]
pub fn find_best(
    lines: &[&str],
    blocks: &[FencedBlock],
    start: usize,
    lo: usize,
    hi: usize,
) -> Option<usize> {
    let mut best: Option<(usize, DocBoundary)> = None;

    for idx in (lo..=hi).rev() {
        if block_containing(blocks, idx).is_some() {
            continue;
        }
        let strength = classify(lines, idx);
        if strength == DocBoundary::None {
            continue;
        }
        if strength == DocBoundary::Heading {
            if idx > start {
                return Some(idx - 1);
            }
            continue;
        }
        if best.is_none_or(|(_, current)| strength > current) {
            best = Some((idx, strength));
        }
    }

    best.map(|(idx, _)| idx)
}
