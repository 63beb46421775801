use serde::Serialize;

use crate::frequency::FrequencyTable;

/// Corpus-level statistics over a flattened token stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CorpusMetrics {
    pub total_tokens: usize,
    pub unique_tokens: usize,
    /// `unique / total`, 0 for an empty stream
    pub lexical_diversity: f64,
    pub mean_token_length: f64,
    /// Tokens that occur exactly once
    pub hapax_legomena: usize,
}

impl CorpusMetrics {
    /// `table` must be the frequency table of `tokens`.
    pub fn compute<'a, I>(tokens: I, table: &FrequencyTable) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (total_tokens, total_length) = tokens
            .into_iter()
            .fold((0usize, 0usize), |(count, length), token| (count + 1, length + token.len()));
        let unique_tokens = table.len();
        let hapax_legomena = table.iter().filter(|e| e.count == 1).count();
        let (lexical_diversity, mean_token_length) = if total_tokens == 0 {
            (0.0, 0.0)
        } else {
            (
                unique_tokens as f64 / total_tokens as f64,
                total_length as f64 / total_tokens as f64,
            )
        };
        Self { total_tokens, unique_tokens, lexical_diversity, mean_token_length, hapax_legomena }
    }

    /// Flat `(name, formatted value)` pairs for reporting.
    pub fn report(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total tokens", self.total_tokens.to_string()),
            ("Unique tokens", self.unique_tokens.to_string()),
            ("Lexical diversity", format!("{:.4}", self.lexical_diversity)),
            ("Mean token length", format!("{:.2}", self.mean_token_length)),
            ("Hapax legomena", self.hapax_legomena.to_string()),
        ]
    }
}
