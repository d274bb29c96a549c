/// A fenced code block in document text, as inclusive 0-based line indices
/// covering both fence markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock {
    pub start: usize,
    pub end: usize,
}

impl FencedBlock {
    #[must_use]
    pub const fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }

    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Whether a line opens or closes a fenced block
#[must_use]
pub fn is_fence_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// Locate every fenced block in one forward pass.
///
/// Each fence line toggles the open state. A block still open at the end of
/// the text is closed at the last line.
#[must_use]
pub fn find_fenced_blocks(lines: &[&str]) -> Vec<FencedBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate() {
        if !is_fence_line(line) {
            continue;
        }
        match open.take() {
            Some(start) => blocks.push(FencedBlock { start, end: idx }),
            None => open = Some(idx),
        }
    }

    if let Some(start) = open {
        blocks.push(FencedBlock {
            start,
            end: lines.len() - 1,
        });
    }

    blocks
}

/// The block owning `line`, if any
#[must_use]
pub fn block_containing(blocks: &[FencedBlock], line: usize) -> Option<FencedBlock> {
    blocks.iter().copied().find(|block| block.contains(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_fenced_blocks() {
        let lines = [
            "Intro",
            "```rust",
            "fn main() {}",
            "```",
            "Between",
            "~~~",
            "raw",
            "~~~",
        ];
        assert_eq!(
            find_fenced_blocks(&lines),
            vec![
                FencedBlock { start: 1, end: 3 },
                FencedBlock { start: 5, end: 7 },
            ]
        );
    }

    #[test]
    fn test_unterminated_block_closes_at_end() {
        let lines = ["text", "```", "code", "more code"];
        assert_eq!(
            find_fenced_blocks(&lines),
            vec![FencedBlock { start: 1, end: 3 }]
        );
    }

    #[test]
    fn test_indented_fence_is_recognized() {
        let lines = ["- item", "  ```", "  x", "  ```"];
        assert_eq!(
            find_fenced_blocks(&lines),
            vec![FencedBlock { start: 1, end: 3 }]
        );
    }

    #[test]
    fn test_block_containing() {
        let blocks = vec![
            FencedBlock { start: 2, end: 4 },
            FencedBlock { start: 8, end: 9 },
        ];
        assert_eq!(block_containing(&blocks, 1), None);
        assert_eq!(block_containing(&blocks, 2), Some(blocks[0]));
        assert_eq!(block_containing(&blocks, 4), Some(blocks[0]));
        assert_eq!(block_containing(&blocks, 9), Some(blocks[1]));
        assert_eq!(block_containing(&blocks, 10), None);
        assert_eq!(blocks[0].line_count(), 3);
    }

    #[test]
    fn test_no_blocks() {
        assert!(find_fenced_blocks(&["plain", "text"]).is_empty());
        assert!(find_fenced_blocks(&[]).is_empty());
    }
}
