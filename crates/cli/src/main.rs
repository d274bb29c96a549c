use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use context_segmenter::{
    Chunk, ChunkingStats, ContentKind, EstimatingCounter, HfTokenCounter, Segmenter,
    SegmenterConfig, TokenCounter,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "context-segment")]
#[command(about = "Split source and documentation files into token-bounded chunks", long_about = None)]
#[command(version)]
struct Cli {
    /// Files to chunk
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Chunking strategy (auto picks by file extension)
    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// JSON file with chunkMaxTokens / chunkMaxLine / chunkOverlapTokens
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the code chunk token ceiling
    #[arg(long, allow_negative_numbers = true)]
    max_tokens: Option<i64>,

    /// Override the code chunk line ceiling
    #[arg(long, allow_negative_numbers = true)]
    max_lines: Option<i64>,

    /// Override the code chunk overlap budget in tokens
    #[arg(long, allow_negative_numbers = true)]
    overlap_tokens: Option<i64>,

    /// Path to a tokenizer.json (overrides CONTEXT_TOKENIZER_PATH)
    #[arg(long, conflicts_with = "estimate")]
    tokenizer: Option<PathBuf>,

    /// Count tokens with the ~4 chars/token estimate instead of a tokenizer
    #[arg(long)]
    estimate: bool,

    /// Include per-file statistics
    #[arg(long)]
    stats: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Auto,
    Code,
    Document,
}

#[derive(Serialize)]
struct FileOutput<'a> {
    path: &'a str,
    kind: ContentKind,
    chunks: Vec<Chunk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<ChunkingStats>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // tokenizers logs every load at info
    if !cli.verbose {
        builder.filter_module("tokenizers", log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(&cli)?;

    if cli.estimate {
        run(&cli, &Segmenter::new(&config, EstimatingCounter))
    } else if let Some(path) = &cli.tokenizer {
        let counter = HfTokenCounter::from_file(path)
            .with_context(|| format!("Failed to load tokenizer {}", path.display()))?;
        run(&cli, &Segmenter::new(&config, counter))
    } else {
        let segmenter = Segmenter::shared(&config)
            .context("No tokenizer available (pass --tokenizer or --estimate)")?;
        run(&cli, &segmenter)
    }
}

fn load_config(cli: &Cli) -> Result<SegmenterConfig> {
    let mut config = match &cli.config {
        Some(path) => SegmenterConfig::from_path(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => SegmenterConfig::default(),
    };
    if let Some(tokens) = cli.max_tokens {
        config = config.with_max_tokens(tokens);
    }
    if let Some(lines) = cli.max_lines {
        config = config.with_max_lines(lines);
    }
    if let Some(tokens) = cli.overlap_tokens {
        config = config.with_overlap_tokens(tokens);
    }
    Ok(config)
}

fn run<C: TokenCounter>(cli: &Cli, segmenter: &Segmenter<C>) -> Result<()> {
    let limits = segmenter.limits();
    log::debug!(
        "limits: {} tokens, {} lines, {} overlap tokens",
        limits.max_tokens,
        limits.max_lines,
        limits.overlap_tokens
    );

    for path in &cli.files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let kind = resolve_kind(cli.mode, path);
        let chunks = segmenter
            .chunk_as(&content, kind)
            .with_context(|| format!("Failed to chunk {}", path.display()))?;

        let stats = ChunkingStats::from_chunks(&chunks);
        log::info!("{}: {stats}", path.display());

        let display = path.display().to_string();
        let output = FileOutput {
            path: &display,
            kind,
            chunks,
            stats: cli.stats.then_some(stats),
        };
        let rendered = if cli.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        println!("{rendered}");
    }

    Ok(())
}

fn resolve_kind(mode: Mode, path: &Path) -> ContentKind {
    match mode {
        Mode::Auto => ContentKind::from_path(path),
        Mode::Code => ContentKind::Code,
        Mode::Document => ContentKind::Document,
    }
}
