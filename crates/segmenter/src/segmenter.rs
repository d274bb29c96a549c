use crate::code::chunk_code;
use crate::config::{ChunkLimits, DocumentLimits, SegmenterConfig};
use crate::document::chunk_document;
use crate::error::Result;
use crate::kind::ContentKind;
use crate::token_index::{split_lines, TokenIndex};
use crate::tokenizer::{shared_tokenizer, HfTokenCounter, TokenCounter};
use crate::types::Chunk;
use std::path::Path;

/// Main segmenter interface: normalized limits plus a token counter
#[derive(Debug, Clone)]
pub struct Segmenter<C> {
    limits: ChunkLimits,
    document_limits: DocumentLimits,
    counter: C,
}

impl<C: TokenCounter> Segmenter<C> {
    /// Create a segmenter, clamping caller options into safe ranges
    pub fn new(config: &SegmenterConfig, counter: C) -> Self {
        Self::with_limits(ChunkLimits::from_config(config), counter)
    }

    /// Create a segmenter from already normalized limits
    pub fn with_limits(limits: ChunkLimits, counter: C) -> Self {
        Self {
            limits,
            document_limits: DocumentLimits::DEFAULT,
            counter,
        }
    }

    /// Code-oriented segmentation
    pub fn chunk(&self, content: &str) -> Result<Vec<Chunk>> {
        let lines = split_lines(content);
        let index = TokenIndex::build(&lines, &self.counter)?;
        Ok(chunk_code(&lines, &index, &self.limits))
    }

    /// Document-oriented segmentation
    pub fn chunk_document(&self, content: &str) -> Result<Vec<Chunk>> {
        let lines = split_lines(content);
        let index = TokenIndex::build(&lines, &self.counter)?;
        Ok(chunk_document(&lines, &index, &self.document_limits))
    }

    /// Segment with an explicit strategy
    pub fn chunk_as(&self, content: &str, kind: ContentKind) -> Result<Vec<Chunk>> {
        match kind {
            ContentKind::Code => self.chunk(content),
            ContentKind::Document => self.chunk_document(content),
        }
    }

    /// Pick the strategy from the file extension
    pub fn chunk_auto(&self, content: &str, file_path: impl AsRef<Path>) -> Result<Vec<Chunk>> {
        let kind = ContentKind::from_path(file_path.as_ref());
        log::debug!("chunking {} as {kind}", file_path.as_ref().display());
        self.chunk_as(content, kind)
    }

    /// Read a file and segment it by extension
    pub fn chunk_file(&self, path: impl AsRef<Path>) -> Result<Vec<Chunk>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        self.chunk_auto(&content, path)
    }

    /// Get the normalized code limits
    #[must_use]
    pub const fn limits(&self) -> &ChunkLimits {
        &self.limits
    }

    /// Get the token counter
    #[must_use]
    pub const fn counter(&self) -> &C {
        &self.counter
    }
}

impl Segmenter<&'static HfTokenCounter> {
    /// Segmenter over the process-wide tokenizer
    pub fn shared(config: &SegmenterConfig) -> Result<Self> {
        Ok(Self::new(config, shared_tokenizer()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SegmenterError;
    use crate::tokenizer::EstimatingCounter;
    use pretty_assertions::assert_eq;

    struct FailingCounter;

    impl TokenCounter for FailingCounter {
        fn count(&self, _text: &str) -> Result<usize> {
            Err(SegmenterError::tokenizer("vocabulary missing"))
        }
    }

    #[test]
    fn test_chunk_auto_dispatches_by_extension() {
        let segmenter = Segmenter::new(&SegmenterConfig::default(), EstimatingCounter);
        // Twelve short lines: one code chunk, but over the 8-line document budget.
        let content = (1..=12)
            .map(|i| format!("line {i};"))
            .collect::<Vec<_>>()
            .join("\n");

        let as_code = segmenter.chunk_auto(&content, "src/lib.rs").unwrap();
        let as_doc = segmenter.chunk_auto(&content, "README.md").unwrap();

        assert_eq!(as_code.len(), 1);
        assert!(as_doc.len() > 1);
        assert_eq!(as_code, segmenter.chunk(&content).unwrap());
        assert_eq!(as_doc, segmenter.chunk_document(&content).unwrap());
    }

    #[test]
    fn test_empty_content_yields_no_chunks() {
        let segmenter = Segmenter::new(&SegmenterConfig::default(), EstimatingCounter);
        assert!(segmenter.chunk("").unwrap().is_empty());
        assert!(segmenter.chunk_document("").unwrap().is_empty());
    }

    #[test]
    fn test_tokenizer_failure_propagates() {
        let segmenter = Segmenter::new(&SegmenterConfig::default(), FailingCounter);
        let err = segmenter.chunk("fn main() {}").unwrap_err();
        assert!(err.is_tokenizer_unavailable());
    }

    #[test]
    fn test_limits_are_normalized() {
        let config = SegmenterConfig::default().with_max_tokens(10);
        let segmenter = Segmenter::new(&config, EstimatingCounter);
        assert_eq!(segmenter.limits().max_tokens, 256);
    }

    #[test]
    fn test_chunk_file_reads_and_dispatches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# Notes\n\nShort.").unwrap();

        let segmenter = Segmenter::new(&SegmenterConfig::default(), EstimatingCounter);
        let chunks = segmenter.chunk_file(&path).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "# Notes\n\nShort.");

        let missing = segmenter.chunk_file(dir.path().join("gone.rs")).unwrap_err();
        assert!(matches!(missing, SegmenterError::Io(_)));
    }
}
