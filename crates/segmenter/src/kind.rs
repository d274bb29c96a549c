use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which chunking strategy a file gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Program-like text, cut on statements and declarations
    Code,
    /// Prose and markdown, cut on headings and paragraphs
    Document,
}

/// Extensions routed to document chunking; everything else is code
const DOCUMENT_EXTENSIONS: &[&str] = &[
    "md", "markdown", "mdx", "mdown", "mkd", "mkdn", "txt", "text", "rst", "adoc", "asciidoc",
    "org",
];

impl ContentKind {
    /// Detect kind from file extension
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
            ContentKind::Document
        } else {
            ContentKind::Code
        }
    }

    /// Detect kind from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(ContentKind::Code)
    }

    /// Get kind name as string
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Code => "code",
            ContentKind::Document => "document",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
