use serde::{Deserialize, Serialize};

/// A contiguous line range of the input together with its token span
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Covered lines joined with `\n`
    pub content: String,

    /// Start line (1-indexed)
    pub line_start: usize,

    /// End line (1-indexed, inclusive)
    pub line_end: usize,

    /// Cumulative token offset of the first covered line (0-indexed)
    pub token_start: usize,

    /// Cumulative token offset just past the last covered line
    pub token_end: usize,
}

impl Chunk {
    /// Create a new chunk
    #[must_use]
    pub const fn new(
        content: String,
        line_start: usize,
        line_end: usize,
        token_start: usize,
        token_end: usize,
    ) -> Self {
        Self {
            content,
            line_start,
            line_end,
            token_start,
            token_end,
        }
    }

    /// Get the number of lines in this chunk
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_end.saturating_sub(self.line_start) + 1
    }

    /// Tokens covered by this chunk, summed per line
    #[must_use]
    pub const fn token_count(&self) -> usize {
        self.token_end.saturating_sub(self.token_start)
    }

    /// Check if chunk contains a specific line (1-indexed)
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.line_start && line <= self.line_end
    }
}

/// Aggregate figures over one chunking result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub total_lines: usize,
    pub total_tokens: usize,
    pub avg_tokens_per_chunk: usize,
    pub min_tokens: usize,
    pub max_tokens: usize,
}

impl ChunkingStats {
    /// Compute statistics for a chunk sequence
    #[must_use]
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        let total_tokens: usize = chunks.iter().map(Chunk::token_count).sum();
        Self {
            total_chunks: chunks.len(),
            total_lines: chunks.iter().map(Chunk::line_count).sum(),
            total_tokens,
            avg_tokens_per_chunk: if chunks.is_empty() {
                0
            } else {
                total_tokens / chunks.len()
            },
            min_tokens: chunks.iter().map(Chunk::token_count).min().unwrap_or(0),
            max_tokens: chunks.iter().map(Chunk::token_count).max().unwrap_or(0),
        }
    }
}

impl std::fmt::Display for ChunkingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunks: {} | Lines: {} | Tokens: {} | Avg: {} | Range: {}-{}",
            self.total_chunks,
            self.total_lines,
            self.total_tokens,
            self.avg_tokens_per_chunk,
            self.min_tokens,
            self.max_tokens
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chunk_line_count() {
        let chunk = Chunk::new("code".to_string(), 10, 15, 0, 40);
        assert_eq!(chunk.line_count(), 6);
        assert_eq!(chunk.token_count(), 40);
    }

    #[test]
    fn test_chunk_contains_line() {
        let chunk = Chunk::new("code".to_string(), 10, 15, 0, 0);
        assert!(chunk.contains_line(10));
        assert!(chunk.contains_line(12));
        assert!(chunk.contains_line(15));
        assert!(!chunk.contains_line(9));
        assert!(!chunk.contains_line(16));
    }

    #[test]
    fn test_chunk_serializes_camel_case() {
        let chunk = Chunk::new("a".to_string(), 1, 1, 0, 1);
        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["lineStart"], 1);
        assert_eq!(json["lineEnd"], 1);
        assert_eq!(json["tokenStart"], 0);
        assert_eq!(json["tokenEnd"], 1);
    }

    #[test]
    fn test_chunking_stats() {
        let chunks = vec![
            Chunk::new("a".to_string(), 1, 4, 0, 10),
            Chunk::new("b".to_string(), 4, 6, 8, 30),
        ];
        let stats = ChunkingStats::from_chunks(&chunks);
        assert_eq!(
            stats,
            ChunkingStats {
                total_chunks: 2,
                total_lines: 7,
                total_tokens: 32,
                avg_tokens_per_chunk: 16,
                min_tokens: 10,
                max_tokens: 22,
            }
        );
        assert_eq!(
            stats.to_string(),
            "Chunks: 2 | Lines: 7 | Tokens: 32 | Avg: 16 | Range: 10-22"
        );
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(ChunkingStats::from_chunks(&[]), ChunkingStats::default());
    }
}
