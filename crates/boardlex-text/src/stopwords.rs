//! Stop-word filtering
//!
//! The list is a plain-text file, one word per line. It is read once at
//! startup; when it cannot be read the built-in English set is used instead.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

/// Minimal English function words, used when no list file is available.
const BUILTIN_STOPWORDS: &[&str] = &[
    "about", "after", "all", "also", "and", "any", "are", "because", "been", "but", "can", "could",
    "did", "does", "for", "from", "get", "had", "has", "have", "her", "him", "his", "how", "into",
    "its", "just", "like", "more", "not", "now", "one", "only", "other", "our", "out", "she",
    "some", "than", "that", "the", "their", "them", "then", "there", "these", "they", "this",
    "was", "were", "what", "when", "where", "which", "who", "why", "will", "with", "would", "you",
    "your",
];

/// An immutable set of lowercase stop words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The built-in fallback set
    pub fn builtin() -> Self {
        Self::from_words(BUILTIN_STOPWORDS)
    }

    /// No filtering at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from any list of words; entries are trimmed and lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parse list-file contents. Blank lines and `#` comments are skipped.
    pub fn parse(contents: &str) -> Self {
        Self::from_words(contents.lines().filter(|line| !line.trim_start().starts_with('#')))
    }

    pub fn from_file(path: &Path) -> io::Result<Self> {
        fs::read_to_string(path).map(|contents| Self::parse(&contents))
    }

    /// Read the list at `path`, falling back to [`StopWords::builtin`] with a
    /// warning when the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(stopwords) => {
                info!(path = %path.display(), count = stopwords.len(), "loaded stop words");
                stopwords
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "stop-word list unavailable, using built-in set");
                Self::builtin()
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
