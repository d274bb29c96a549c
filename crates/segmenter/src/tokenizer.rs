use crate::error::{Result, SegmenterError};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

/// Counts the tokens a fixed vocabulary produces for a piece of text.
///
/// Implementations must be deterministic: the same text always yields the
/// same count. Only the count is used, never the token identities.
pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> Result<usize>;
}

impl<T: TokenCounter + ?Sized> TokenCounter for &T {
    fn count(&self, text: &str) -> Result<usize> {
        (**self).count(text)
    }
}

/// Token counter backed by a Hugging Face `tokenizer.json`
pub struct HfTokenCounter {
    tokenizer: Tokenizer,
}

impl HfTokenCounter {
    /// Load a tokenizer definition from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // Per-line encodes are tiny; thread fan-out only adds contention.
        if !tokenizers::utils::parallelism::is_parallelism_configured() {
            tokenizers::utils::parallelism::set_parallelism(false);
        }

        if !path.exists() {
            return Err(SegmenterError::tokenizer(format!(
                "tokenizer file not found at {} (set CONTEXT_TOKENIZER_PATH or CONTEXT_MODEL_DIR)",
                path.display()
            )));
        }

        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            SegmenterError::tokenizer(format!("Tokenizer load failed ({}): {e}", path.display()))
        })?;
        log::debug!("Loaded tokenizer from {}", path.display());

        Ok(Self { tokenizer })
    }
}

impl TokenCounter for HfTokenCounter {
    fn count(&self, text: &str) -> Result<usize> {
        if text.is_empty() {
            return Ok(0);
        }
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| SegmenterError::tokenizer(format!("Tokenizer encode failed: {e}")))?;
        Ok(encoding.get_ids().len())
    }
}

impl std::fmt::Debug for HfTokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfTokenCounter").finish_non_exhaustive()
    }
}

/// Vocabulary-free approximation: about four characters per token
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatingCounter;

impl TokenCounter for EstimatingCounter {
    fn count(&self, text: &str) -> Result<usize> {
        Ok(text.chars().count().div_ceil(4))
    }
}

static SHARED_TOKENIZER: OnceCell<HfTokenCounter> = OnceCell::new();

/// Where the shared tokenizer is loaded from.
///
/// `CONTEXT_TOKENIZER_PATH` wins, then `$CONTEXT_MODEL_DIR/tokenizer.json`,
/// then `models/tokenizer.json` relative to the working directory.
#[must_use]
pub fn tokenizer_path() -> PathBuf {
    if let Some(path) = std::env::var_os("CONTEXT_TOKENIZER_PATH") {
        return PathBuf::from(path);
    }
    std::env::var_os("CONTEXT_MODEL_DIR")
        .map_or_else(|| PathBuf::from("models"), PathBuf::from)
        .join("tokenizer.json")
}

/// Process-wide tokenizer, constructed on first use and read-only afterwards.
///
/// A failed load is returned to the caller and not remembered, so a later
/// call (after the file appears) can still succeed.
pub fn shared_tokenizer() -> Result<&'static HfTokenCounter> {
    SHARED_TOKENIZER.get_or_try_init(|| {
        let path = tokenizer_path();
        log::info!("Initializing shared tokenizer from {}", path.display());
        HfTokenCounter::from_file(path)
    })
}
