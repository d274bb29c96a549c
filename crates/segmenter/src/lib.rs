//! # Context Segmenter
//!
//! Token-aware, structure-aware splitting of source files into overlapping
//! chunks for embedding and retrieval.
//!
//! ## Philosophy
//!
//! The segmenter produces chunks that:
//! - Stay within a token and line budget
//! - End on good cut points (declaration ends, blank lines, headings)
//! - Never cut a fenced code block that fits its budget
//! - Are reproducible: line and token offsets are safe to persist as keys
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     │
//!     ├──> Line split + per-line token counts → TokenIndex
//!     │
//!     ├──> Strategy (by extension)
//!     │    ├─> Code: CodeBoundary ranking, 30% back-off tail
//!     │    └─> Document: fenced blocks + DocBoundary ranking, 40% tail
//!     │
//!     └──> Window loop
//!          ├─> Extend to budget
//!          ├─> Back off to strongest nearby boundary
//!          ├─> Emit Chunk { lines, tokens }
//!          └─> Overlap, forcing forward progress
//! ```
//!
//! ## Example
//!
//! ```rust
//! use context_segmenter::{EstimatingCounter, Segmenter, SegmenterConfig};
//!
//! let segmenter = Segmenter::new(&SegmenterConfig::default(), EstimatingCounter);
//!
//! let code = "import a;\n\nfunction f() {\n  return 1;\n}";
//! let chunks = segmenter.chunk_auto(code, "example.js").unwrap();
//!
//! assert_eq!(chunks.len(), 1);
//! assert_eq!((chunks[0].line_start, chunks[0].line_end), (1, 5));
//! ```

mod code;
pub mod code_boundary;
mod config;
pub mod doc_boundary;
mod document;
mod error;
pub mod fence;
mod kind;
mod overlap;
mod segmenter;
mod token_index;
mod tokenizer;
mod types;
mod window;

pub use code_boundary::CodeBoundary;
pub use config::{
    ChunkLimits, DocumentLimits, SegmenterConfig, DEFAULT_CHUNK_MAX_LINE,
    DEFAULT_CHUNK_MAX_TOKENS, DEFAULT_CHUNK_OVERLAP_TOKENS,
};
pub use doc_boundary::DocBoundary;
pub use error::{Result, SegmenterError};
pub use fence::FencedBlock;
pub use kind::ContentKind;
pub use segmenter::Segmenter;
pub use token_index::{split_lines, TokenIndex};
pub use tokenizer::{
    shared_tokenizer, tokenizer_path, EstimatingCounter, HfTokenCounter, TokenCounter,
};
pub use types::{Chunk, ChunkingStats};

use std::path::Path;

/// Code-oriented segmentation with the shared tokenizer
pub fn chunk(content: &str, config: &SegmenterConfig) -> Result<Vec<Chunk>> {
    Segmenter::shared(config)?.chunk(content)
}

/// Document-oriented segmentation with the shared tokenizer
pub fn chunk_document(content: &str, config: &SegmenterConfig) -> Result<Vec<Chunk>> {
    Segmenter::shared(config)?.chunk_document(content)
}

/// Segmentation dispatched on `file_path`'s extension, with the shared tokenizer
pub fn chunk_auto(
    content: &str,
    file_path: impl AsRef<Path>,
    config: &SegmenterConfig,
) -> Result<Vec<Chunk>> {
    Segmenter::shared(config)?.chunk_auto(content, file_path)
}
