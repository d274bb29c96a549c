//! Cut-point ranking for program-like text.

use once_cell::sync::Lazy;
use regex::Regex;

/// How good a line is as the last line of a code chunk, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CodeBoundary {
    None,
    SingleLineComment,
    Semicolon,
    CloseBrace,
    BlankLine,
    MultiLineCommentEnd,
    DoubleBlankLine,
    FunctionEnd,
    ImportBlockEnd,
}

impl CodeBoundary {
    /// Strong enough that a backward search stops looking further
    #[must_use]
    pub fn ends_search(self) -> bool {
        self >= Self::FunctionEnd
    }
}

const IMPORT_PREFIXES: &[&str] = &[
    "import ",
    "import{",
    "use ",
    "using ",
    "extern crate ",
    "#include",
    "require ",
    "require(",
];

const DECLARATION_KEYWORDS: &[&str] = &[
    "function",
    "class",
    "export",
    "const",
    "async",
    "def",
    "fn",
    "pub",
    "public",
    "private",
    "protected",
    "internal",
];

static REQUIRE_BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(const|let|var)\s+.+=\s*require\(").expect("invalid regex")
});

static FROM_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^from\s+[\w.]+\s+import\b").expect("invalid regex"));

fn is_import_line(trimmed: &str) -> bool {
    IMPORT_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
        || FROM_IMPORT.is_match(trimmed)
        || REQUIRE_BINDING.is_match(trimmed)
}

fn starts_with_keyword(trimmed: &str, keyword: &str) -> bool {
    trimmed.strip_prefix(keyword).is_some_and(|rest| {
        rest.chars()
            .next()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
    })
}

fn starts_declaration(trimmed: &str) -> bool {
    trimmed.starts_with('@')
        || trimmed.starts_with("#[")
        || DECLARATION_KEYWORDS
            .iter()
            .any(|keyword| starts_with_keyword(trimmed, keyword))
}

fn is_line_comment(trimmed: &str) -> bool {
    if trimmed.starts_with("//") || trimmed == "--" || trimmed.starts_with("-- ") {
        return true;
    }
    trimmed.starts_with('#')
        && !trimmed.starts_with("#include")
        && !trimmed.starts_with("#[")
        && !trimmed.starts_with("#!")
}

/// Rank line `idx` using its trimmed neighbours
#[must_use]
pub fn classify(lines: &[&str], idx: usize) -> CodeBoundary {
    let current = lines[idx].trim();
    let previous = idx.checked_sub(1).map(|i| lines[i].trim());
    let next = lines.get(idx + 1).map(|line| line.trim());

    if current.is_empty() && previous.is_some_and(str::is_empty) {
        return CodeBoundary::DoubleBlankLine;
    }

    if is_import_line(current) {
        if let Some(next) = next {
            if !next.is_empty() && !is_import_line(next) {
                return CodeBoundary::ImportBlockEnd;
            }
        }
    }

    if current == "}" || current == "};" {
        return match next {
            None => CodeBoundary::FunctionEnd,
            Some(next) if next.is_empty() || starts_declaration(next) => {
                CodeBoundary::FunctionEnd
            }
            Some(_) => CodeBoundary::CloseBrace,
        };
    }

    if current.is_empty() {
        return CodeBoundary::BlankLine;
    }

    if current.ends_with("*/") || current.ends_with("-->") {
        return CodeBoundary::MultiLineCommentEnd;
    }

    if is_line_comment(current) {
        return CodeBoundary::SingleLineComment;
    }

    if current.ends_with(';') {
        return CodeBoundary::Semicolon;
    }

    CodeBoundary::None
}

/// Best boundary in `lo..=hi` at or above `min`, scanning backward.
///
/// Later lines win ties. Anything at `FunctionEnd` or stronger is taken on
/// sight; weaker candidates only replace the best so far when strictly
/// stronger.
#[must_use]
pub fn find_best(lines: &[&str], lo: usize, hi: usize, min: CodeBoundary) -> Option<usize> {
    let mut best: Option<(usize, CodeBoundary)> = None;

    for idx in (lo..=hi).rev() {
        let strength = classify(lines, idx);
        if strength < min || strength == CodeBoundary::None {
            continue;
        }
        if strength.ends_search() {
            return Some(idx);
        }
        if best.is_none_or(|(_, current)| strength > current) {
            best = Some((idx, strength));
        }
    }

    best.map(|(idx, _)| idx)
}
