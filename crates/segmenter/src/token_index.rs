use crate::error::Result;
use crate::tokenizer::TokenCounter;

/// Split content into lines on `\n`.
///
/// Empty content has no lines. A trailing `\n` produces a trailing empty
/// line, so joining the result with `\n` always reproduces the input.
#[must_use]
pub fn split_lines(content: &str) -> Vec<&str> {
    if content.is_empty() {
        return Vec::new();
    }
    content.split('\n').collect()
}

/// Prefix sums of per-line token counts.
///
/// Each line is encoded on its own and the counts are summed, so spans read
/// from the index can differ slightly from encoding the joined text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIndex {
    starts: Vec<usize>,
    ends: Vec<usize>,
}

impl TokenIndex {
    /// Count every line once and accumulate
    pub fn build<C: TokenCounter + ?Sized>(lines: &[&str], counter: &C) -> Result<Self> {
        let mut starts = Vec::with_capacity(lines.len());
        let mut ends = Vec::with_capacity(lines.len());
        let mut consumed = 0usize;

        for line in lines {
            starts.push(consumed);
            consumed += counter.count(line)?;
            ends.push(consumed);
        }

        Ok(Self { starts, ends })
    }

    /// Number of indexed lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Tokens consumed by lines `0..line`
    #[must_use]
    pub fn start(&self, line: usize) -> usize {
        self.starts[line]
    }

    /// Tokens consumed by lines `0..=line`
    #[must_use]
    pub fn end(&self, line: usize) -> usize {
        self.ends[line]
    }

    /// Tokens in lines `first..=last`
    #[must_use]
    pub fn span(&self, first: usize, last: usize) -> usize {
        self.ends[last] - self.starts[first]
    }

    /// Tokens in the whole text
    #[must_use]
    pub fn total(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    /// First line in `from..=to` whose token start is at least `token`,
    /// or `to` when none qualifies
    #[must_use]
    pub fn first_line_at_or_after(&self, token: usize, from: usize, to: usize) -> usize {
        (from..=to)
            .find(|&line| line < self.starts.len() && self.starts[line] >= token)
            .unwrap_or(to)
    }
}
