//! Table and JSON rendering of an analysis run.
use chrono::{DateTime, Utc};
use prettytable::{row, Table};
use serde::Serialize;
use std::fmt;

use boardlex_core::types::DocumentUnit;
use boardlex_fetch::Collection;
use boardlex_text::{Analysis, CorpusMetrics, DocumentAnalysis, FrequencyTable};

/// How many rows each section shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    pub top_words: usize,
    pub top_ngrams: usize,
    pub relevance_top_k: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub date: String,
    pub board: String,
    pub unit: DocumentUnit,
    pub threads_listed: usize,
    pub threads_requested: usize,
    pub threads_fetched: usize,
    pub threads_failed: usize,
    pub posts: usize,
    /// Posts without a body, analyzed as empty text
    pub missing_bodies: usize,
    /// Post bodies dropped by a cleanup cap
    pub posts_dropped: usize,
    pub documents_analyzed: usize,
    pub documents_discarded: usize,
    pub words_retrieved: usize,
}

impl RunSummary {
    pub fn new(
        board: &str,
        unit: DocumentUnit,
        collection: &Collection,
        analysis: &Analysis,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            date: at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            board: board.to_string(),
            unit,
            threads_listed: collection.threads_listed,
            threads_requested: collection.threads_requested,
            threads_fetched: collection.threads_fetched,
            threads_failed: collection.threads_failed,
            posts: collection.posts,
            missing_bodies: collection.missing_bodies,
            posts_dropped: analysis.stats.bodies_discarded(),
            documents_analyzed: analysis.stats.documents_analyzed,
            documents_discarded: analysis.stats.documents_discarded,
            words_retrieved: analysis.stats.words_retrieved,
        }
    }
}

pub fn word_table(table: &FrequencyTable, k: usize, heading: &str) -> Table {
    let mut out = Table::new();
    out.set_titles(row!["#", heading, "Count"]);
    for (rank, entry) in table.top(k).into_iter().enumerate() {
        out.add_row(row![rank + 1, entry.term, entry.count]);
    }
    out
}

pub fn metrics_table(metrics: &CorpusMetrics) -> Table {
    let mut out = Table::new();
    out.set_titles(row!["Metric", "Value"]);
    for (name, value) in metrics.report() {
        out.add_row(row![name, value]);
    }
    out
}

pub fn relevance_table(documents: &[DocumentAnalysis], k: usize) -> Table {
    let mut out = Table::new();
    out.set_titles(row!["Document", "Tokens", "Most relevant terms"]);
    for doc in documents {
        let terms = doc
            .relevance
            .top(k)
            .into_iter()
            .map(|t| format!("{} ({:.3})", t.term, t.score))
            .collect::<Vec<_>>()
            .join(", ");
        out.add_row(row![doc.id, doc.token_count, terms]);
    }
    out
}

pub fn summary_table(summary: &RunSummary) -> Table {
    let mut out = Table::new();
    out.add_row(row!["Date", summary.date]);
    out.add_row(row!["Board", format!("/{}/", summary.board)]);
    out.add_row(row!["Document unit", summary.unit]);
    out.add_row(row!["Threads listed", summary.threads_listed]);
    out.add_row(row![
        "Threads fetched",
        format!("{} of {} ({} failed)", summary.threads_fetched, summary.threads_requested, summary.threads_failed)
    ]);
    out.add_row(row![
        "Posts",
        format!("{} ({} without a body, {} dropped)", summary.posts, summary.missing_bodies, summary.posts_dropped)
    ]);
    out.add_row(row!["Documents analyzed", summary.documents_analyzed]);
    out.add_row(row!["Documents discarded", summary.documents_discarded]);
    out.add_row(row!["Words retrieved", summary.words_retrieved]);
    out
}

/// The full plain-text report. Thread titles are listed first when given.
pub struct TableReport<'a> {
    pub summary: &'a RunSummary,
    pub analysis: &'a Analysis,
    pub titles: &'a [String],
    pub limits: ReportLimits,
}

impl fmt::Display for TableReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (analysis, limits) = (self.analysis, self.limits);
        if !self.titles.is_empty() {
            writeln!(f, "Threads:")?;
            for title in self.titles {
                writeln!(f, "  {title}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Top {} Words", limits.top_words)?;
        write!(f, "{}", word_table(&analysis.unigrams, limits.top_words, "Word"))?;
        for gram in &analysis.ngrams {
            writeln!(f, "\nTop {} {}-grams", limits.top_ngrams, gram.n)?;
            write!(f, "{}", word_table(&gram.table, limits.top_ngrams, &format!("{}-gram", gram.n)))?;
        }
        writeln!(f, "\nCorpus metrics")?;
        write!(f, "{}", metrics_table(&analysis.metrics))?;
        if !analysis.documents.is_empty() {
            writeln!(f, "\nRelevance (TF-IDF)")?;
            write!(f, "{}", relevance_table(&analysis.documents, limits.relevance_top_k))?;
        }
        writeln!(f, "\nSummary")?;
        write!(f, "{}", summary_table(self.summary))
    }
}

pub fn render_tables(summary: &RunSummary, analysis: &Analysis, titles: &[String], limits: ReportLimits) -> String {
    TableReport { summary, analysis, titles, limits }.to_string()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a RunSummary,
    analysis: &'a Analysis,
}

pub fn render_json(summary: &RunSummary, analysis: &Analysis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { summary, analysis })
}
