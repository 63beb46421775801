use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use boardlex_cli::{render_json, render_tables, ReportLimits, RunSummary};
use boardlex_core::config::{Config, Settings};
use boardlex_core::traits::ThreadSource;
use boardlex_core::types::{validate_board, DocumentUnit};
use boardlex_fetch::{collect_documents, ChanClient, SnapshotSource};
use boardlex_text::{AnalysisConfig, Analyzer, StopWords};

/// Word frequency, n-gram and TF-IDF statistics for the threads of a board
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board to analyze, e.g. `g`
    board: String,

    /// Analyze the first N threads of the index
    #[arg(long)]
    max_threads: Option<usize>,

    /// Analyze every listed thread
    #[arg(long, conflicts_with = "max_threads")]
    all_threads: bool,

    /// Document granularity: thread or post
    #[arg(long)]
    unit: Option<DocumentUnit>,

    /// Read threads from a snapshot directory instead of the live API
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Stop-word file, one word per line
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Extra TOML file layered over the loaded configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows in the top-words table
    #[arg(long)]
    top: Option<usize>,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(n) = self.max_threads {
            settings.source.max_threads = n;
        }
        if self.all_threads {
            settings.source.max_threads = 0;
        }
        if let Some(unit) = self.unit {
            settings.analysis.unit = unit;
        }
        if let Some(path) = &self.stopwords {
            settings.text.stopwords_path = path.display().to_string();
        }
        if let Some(n) = self.top {
            settings.analysis.top_words = n;
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "boardlex=warn",
        (false, 0) => "boardlex=info",
        (false, 1) => "boardlex=debug",
        (false, _) => "boardlex=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn progress_bar(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} threads {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);
    validate_board(&args.board)?;

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(path) = &args.config {
        config = config.merge_file(path)?;
    }
    let mut settings = config.settings()?;
    args.apply(&mut settings);
    settings.validate()?;
    debug!(?settings, "effective settings");

    let stopwords = Arc::new(StopWords::load(&settings.text.stopwords_path()));
    let source: Box<dyn ThreadSource> = match &args.snapshot {
        Some(dir) => {
            info!(snapshot = %dir.display(), "reading threads from snapshot");
            Box::new(SnapshotSource::new(dir))
        }
        None => Box::new(ChanClient::new(&settings.source)?),
    };

    let unit = settings.analysis.unit;
    let progress = progress_bar(args.json || args.quiet)?;
    let mut collection =
        collect_documents(source.as_ref(), &args.board, settings.source.thread_limit(), unit, &progress)?;

    let analyzer = Analyzer::new(AnalysisConfig::from_settings(&settings), stopwords);
    let analysis = analyzer.analyze(std::mem::take(&mut collection.documents));
    let summary = RunSummary::new(&args.board, unit, &collection, &analysis, Utc::now());
    let titles: &[String] = if args.verbose > 0 { &collection.titles } else { &[] };

    if args.json {
        println!("{}", render_json(&summary, &analysis)?);
    } else {
        let limits = ReportLimits {
            top_words: settings.analysis.top_words,
            top_ngrams: settings.analysis.top_ngrams,
            relevance_top_k: settings.analysis.relevance_top_k,
        };
        print!("{}", render_tables(&summary, &analysis, titles, limits));
    }
    Ok(())
}
