//! One batch run over a snapshot of documents.
//!
//! Every body is sanitized on its own, so a malformed post costs only
//! itself. The surviving bodies of a document are joined and tokenized, and
//! the unigram and n-gram tables are merged per document, so n-gram windows
//! never cross a document boundary. Relevance and metrics are computed once all documents
//! are in.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use boardlex_core::config::Settings;
use boardlex_core::types::{DocumentId, RawDocument};

use crate::frequency::{frequency, ngrams, FrequencyTable};
use crate::metrics::CorpusMetrics;
use crate::relevance::{relevance, RelevanceScore};
use crate::sanitize::{MalformedInput, Sanitizer, DEFAULT_REPLY_MARKER_CAP, DEFAULT_WHITESPACE_CAP};
use crate::stopwords::StopWords;
use crate::tokenize::tokenize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub reply_marker_cap: usize,
    pub whitespace_cap: usize,
    pub ngram_sizes: Vec<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reply_marker_cap: DEFAULT_REPLY_MARKER_CAP,
            whitespace_cap: DEFAULT_WHITESPACE_CAP,
            ngram_sizes: vec![2, 3],
        }
    }
}

impl AnalysisConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            reply_marker_cap: settings.text.reply_marker_cap,
            whitespace_cap: settings.text.whitespace_cap,
            ngram_sizes: settings.analysis.ngram_sizes.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub documents_seen: usize,
    pub documents_analyzed: usize,
    /// Documents whose every body was dropped
    pub documents_discarded: usize,
    pub bodies_seen: usize,
    /// Bodies dropped by the reply-marker cap
    pub discarded_reply_markers: usize,
    /// Bodies dropped by the whitespace cap
    pub discarded_whitespace: usize,
    /// Analyzed documents that produced no tokens
    pub empty_documents: usize,
    /// Whitespace-separated words over all clean documents
    pub words_retrieved: usize,
}

impl PipelineStats {
    pub fn bodies_discarded(&self) -> usize {
        self.discarded_reply_markers + self.discarded_whitespace
    }
}

/// One document after cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedDocument {
    /// The surviving clean bodies joined by a space. `None` when the document
    /// had bodies and all of them were dropped.
    pub clean: Option<String>,
    pub tokens: Vec<String>,
    /// Why each dropped body was dropped
    pub dropped: Vec<MalformedInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentAnalysis {
    pub id: DocumentId,
    pub token_count: usize,
    pub relevance: RelevanceScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NgramTable {
    pub n: usize,
    pub table: FrequencyTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub unigrams: FrequencyTable,
    pub ngrams: Vec<NgramTable>,
    pub documents: Vec<DocumentAnalysis>,
    pub metrics: CorpusMetrics,
    pub stats: PipelineStats,
}

impl Analysis {
    pub fn ngram(&self, n: usize) -> Option<&FrequencyTable> {
        self.ngrams.iter().find(|t| t.n == n).map(|t| &t.table)
    }
}

pub struct Analyzer {
    sanitizer: Sanitizer,
    stopwords: Arc<StopWords>,
    ngram_sizes: Vec<usize>,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig, stopwords: Arc<StopWords>) -> Self {
        let mut ngram_sizes = config.ngram_sizes;
        ngram_sizes.retain(|&n| n > 0);
        ngram_sizes.sort_unstable();
        ngram_sizes.dedup();
        Self {
            sanitizer: Sanitizer::new(config.reply_marker_cap, config.whitespace_cap),
            stopwords,
            ngram_sizes,
        }
    }

    /// Sanitize every body of `document` under the caps, drop the malformed
    /// ones and tokenize what is left.
    pub fn prepare(&self, document: &RawDocument) -> PreparedDocument {
        let mut dropped = Vec::new();
        let mut kept = Vec::with_capacity(document.bodies.len());
        for body in &document.bodies {
            match self.sanitizer.sanitize(body) {
                Ok(clean) if clean.is_empty() => {}
                Ok(clean) => kept.push(clean),
                Err(reason) => dropped.push(reason),
            }
        }
        if !document.bodies.is_empty() && dropped.len() == document.bodies.len() {
            return PreparedDocument { clean: None, tokens: Vec::new(), dropped };
        }
        let clean = kept.join(" ");
        let tokens = tokenize(&clean, &self.stopwords);
        PreparedDocument { clean: Some(clean), tokens, dropped }
    }

    pub fn analyze<I>(&self, documents: I) -> Analysis
    where
        I: IntoIterator<Item = RawDocument>,
    {
        let mut stats = PipelineStats::default();
        let mut unigrams = FrequencyTable::new();
        let mut ngram_tables: Vec<NgramTable> =
            self.ngram_sizes.iter().map(|&n| NgramTable { n, table: FrequencyTable::new() }).collect();
        let mut ids = Vec::new();
        let mut corpus: Vec<Vec<String>> = Vec::new();

        for document in documents {
            stats.documents_seen += 1;
            stats.bodies_seen += document.bodies.len();
            let prepared = self.prepare(&document);
            for reason in &prepared.dropped {
                debug!(document = %document.id, %reason, "dropping body");
                match reason {
                    MalformedInput::ReplyMarkerCap { .. } => stats.discarded_reply_markers += 1,
                    MalformedInput::WhitespaceCap { .. } => stats.discarded_whitespace += 1,
                }
            }
            let Some(clean) = prepared.clean else {
                debug!(document = %document.id, "discarding document, no body survived");
                stats.documents_discarded += 1;
                continue;
            };
            stats.documents_analyzed += 1;
            stats.words_retrieved += clean.split_whitespace().count();

            let tokens = prepared.tokens;
            if tokens.is_empty() {
                stats.empty_documents += 1;
            }
            unigrams.merge(&frequency(&tokens));
            for gram in &mut ngram_tables {
                gram.table.merge(&ngrams(&tokens, gram.n));
            }
            ids.push(document.id);
            corpus.push(tokens);
        }

        let scores = relevance(&corpus);
        let metrics = CorpusMetrics::compute(corpus.iter().flatten().map(String::as_str), &unigrams);
        let documents = ids
            .into_iter()
            .zip(corpus.iter().zip(scores))
            .map(|(id, (tokens, relevance))| DocumentAnalysis { id, token_count: tokens.len(), relevance })
            .collect();

        info!(
            seen = stats.documents_seen,
            analyzed = stats.documents_analyzed,
            discarded = stats.documents_discarded,
            bodies_dropped = stats.bodies_discarded(),
            tokens = metrics.total_tokens,
            "analysis complete"
        );
        Analysis { unigrams, ngrams: ngram_tables, documents, metrics, stats }
    }
}
