use crate::error::{Result, SegmenterError};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Default code chunk token ceiling before clamping
pub const DEFAULT_CHUNK_MAX_TOKENS: usize = 512;
/// Default code chunk line ceiling before clamping
pub const DEFAULT_CHUNK_MAX_LINE: usize = 100;
/// Default overlap budget in tokens before clamping
pub const DEFAULT_CHUNK_OVERLAP_TOKENS: usize = 64;

const MIN_CHUNK_TOKENS: usize = 256;
const MAX_CHUNK_TOKENS: usize = 2048;
const MIN_CHUNK_LINES: usize = 10;
const MAX_CHUNK_LINES: usize = 200;

/// Caller-supplied chunking options, as found in editor settings or a JSON file.
///
/// Every field is optional. Values that are missing, `null`, or not numbers
/// are treated as absent so that a corrupt setting never blocks indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmenterConfig {
    /// Code chunk token ceiling
    #[serde(deserialize_with = "lenient_number")]
    pub chunk_max_tokens: Option<i64>,

    /// Code chunk line ceiling
    #[serde(deserialize_with = "lenient_number")]
    pub chunk_max_line: Option<i64>,

    /// Code chunk overlap budget in tokens
    #[serde(deserialize_with = "lenient_number")]
    pub chunk_overlap_tokens: Option<i64>,
}

impl SegmenterConfig {
    /// Parse a JSON object of options
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| SegmenterError::invalid_config(e.to_string()))
    }

    /// Load options from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Builder: override the token ceiling
    #[must_use]
    pub const fn with_max_tokens(mut self, tokens: i64) -> Self {
        self.chunk_max_tokens = Some(tokens);
        self
    }

    /// Builder: override the line ceiling
    #[must_use]
    pub const fn with_max_lines(mut self, lines: i64) -> Self {
        self.chunk_max_line = Some(lines);
        self
    }

    /// Builder: override the overlap budget
    #[must_use]
    pub const fn with_overlap_tokens(mut self, tokens: i64) -> Self {
        self.chunk_overlap_tokens = Some(tokens);
        self
    }
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.floor() as i64)),
        _ => None,
    })
}

/// Normalized code chunking limits, always within safe operating ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimits {
    /// Token ceiling, in `[256, 2048]`
    pub max_tokens: usize,
    /// Line ceiling, in `[10, 200]`
    pub max_lines: usize,
    /// Overlap budget, in `[0, max_tokens - 1]`
    pub overlap_tokens: usize,
}

impl ChunkLimits {
    /// Apply defaults and clamp caller options
    #[must_use]
    pub fn from_config(config: &SegmenterConfig) -> Self {
        let max_tokens = clamp_option(
            config.chunk_max_tokens,
            DEFAULT_CHUNK_MAX_TOKENS,
            MIN_CHUNK_TOKENS,
            MAX_CHUNK_TOKENS,
        );
        let max_lines = clamp_option(
            config.chunk_max_line,
            DEFAULT_CHUNK_MAX_LINE,
            MIN_CHUNK_LINES,
            MAX_CHUNK_LINES,
        );
        let overlap_tokens = clamp_option(
            config.chunk_overlap_tokens,
            DEFAULT_CHUNK_OVERLAP_TOKENS,
            0,
            max_tokens - 1,
        );

        Self {
            max_tokens,
            max_lines,
            overlap_tokens,
        }
    }

    /// Most lines a code overlap may repeat (25% of the line ceiling)
    #[must_use]
    pub const fn max_overlap_lines(&self) -> usize {
        self.max_lines / 4
    }
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self::from_config(&SegmenterConfig::default())
    }
}

fn clamp_option(value: Option<i64>, default: usize, min: usize, max: usize) -> usize {
    let value = value.unwrap_or(default as i64);
    value.clamp(min as i64, max as i64) as usize
}

/// Compiled-in budgets for prose and markdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLimits {
    pub max_tokens: usize,
    pub max_lines: usize,
    pub overlap_tokens: usize,
    pub overlap_lines: usize,
    /// Budget applied when a chunk starts at a fenced block
    pub block_max_tokens: usize,
    pub block_max_lines: usize,
}

impl DocumentLimits {
    pub const DEFAULT: Self = Self {
        max_tokens: 256,
        max_lines: 8,
        overlap_tokens: 64,
        overlap_lines: 2,
        block_max_tokens: 512,
        block_max_lines: 30,
    };
}

impl Default for DocumentLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}
