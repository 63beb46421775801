//! Domain types shared by the fetch collaborator, the text pipeline and reporting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub type ThreadId = u64;

/// A thread as listed on a board's index. `title` is the optional subject line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: ThreadId,
    pub title: Option<String>,
}

/// One post of a thread. `comment` is the raw markup body, absent for
/// image-only posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub no: u64,
    pub comment: Option<String>,
}

impl Post {
    /// The body, or the empty string when the record has none.
    pub fn body(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }
}

/// Granularity of the documents handed to the analyzer.
///
/// - `Thread`: every post body of a thread joined by a space
/// - `Post`: one document per post body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentUnit {
    #[default]
    Thread,
    Post,
}

impl fmt::Display for DocumentUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thread => f.write_str("thread"),
            Self::Post => f.write_str("post"),
        }
    }
}

impl FromStr for DocumentUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thread" | "threads" => Ok(Self::Thread),
            "post" | "posts" => Ok(Self::Post),
            _ => Err(Error::UnknownUnit(s.to_string())),
        }
    }
}

/// Stable label of a document: `board/thread` or `board/thread/post`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn thread(board: &str, thread: ThreadId) -> Self {
        Self(format!("{board}/{thread}"))
    }

    pub fn post(board: &str, thread: ThreadId, post: u64) -> Self {
        Self(format!("{board}/{thread}/{post}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unprocessed text of one document, as produced by collection.
///
/// A post document has a single body. A thread document keeps one body per
/// post so that each is cleaned, and if malformed dropped, on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: DocumentId,
    pub bodies: Vec<String>,
}

impl RawDocument {
    pub fn new(id: DocumentId, text: impl Into<String>) -> Self {
        Self { id, bodies: vec![text.into()] }
    }

    pub fn from_bodies<I, S>(id: DocumentId, bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { id, bodies: bodies.into_iter().map(Into::into).collect() }
    }
}

/// Board names are short ASCII alphanumerics (`g`, `sci`, `3`). Anything else
/// is rejected before it reaches a URL or a filesystem path.
pub fn validate_board(board: &str) -> Result<()> {
    let ok = !board.is_empty() && board.len() <= 16 && board.bytes().all(|b| b.is_ascii_alphanumeric());
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidBoard(board.to_string()))
    }
}
