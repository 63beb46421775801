//! Word extraction for sanitized text
//!
//! Pipeline: split into maximal ASCII-letter runs → keep runs of 3..=15
//!           letters → lowercase → remove stop words

use crate::stopwords::StopWords;

pub const MIN_TOKEN_LEN: usize = 3;
pub const MAX_TOKEN_LEN: usize = 15;

/// Tokenize clean text into an ordered token sequence.
///
/// A run outside the length window is skipped entirely; a 16-letter run does
/// not yield its 15-letter prefix.
///
/// # Example
///
/// ```
/// use boardlex_text::stopwords::StopWords;
/// use boardlex_text::tokenize::tokenize;
///
/// let stopwords = StopWords::from_words(["now", "the"]);
/// let tokens = tokenize("hello welcome check now", &stopwords);
/// assert_eq!(tokens, vec!["hello", "welcome", "check"]);
/// ```
pub fn tokenize(clean: &str, stopwords: &StopWords) -> Vec<String> {
    clean
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|run| (MIN_TOKEN_LEN..=MAX_TOKEN_LEN).contains(&run.len()))
        .map(str::to_ascii_lowercase)
        .filter(|token| !stopwords.contains(token))
        .collect()
}
