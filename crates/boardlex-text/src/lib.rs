//! boardlex-text
//!
//! Text normalization and corpus statistics: `sanitize` turns markup into
//! clean lowercase words, `tokenize` applies the token shape and stop words,
//! `frequency`, `relevance` and `metrics` compute the statistics, and
//! `pipeline` runs them all over one batch of documents.
pub mod frequency;
pub mod metrics;
pub mod pipeline;
pub mod relevance;
pub mod sanitize;
pub mod stopwords;
pub mod tokenize;

pub use frequency::{frequency, ngrams, FrequencyEntry, FrequencyTable};
pub use metrics::CorpusMetrics;
pub use pipeline::{
    Analysis, AnalysisConfig, Analyzer, DocumentAnalysis, NgramTable, PipelineStats,
    PreparedDocument,
};
pub use relevance::{relevance, RelevanceScore, TermScore};
pub use sanitize::{sanitize, MalformedInput, Sanitizer};
pub use stopwords::StopWords;
pub use tokenize::tokenize;
