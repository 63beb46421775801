use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing::{info, warn};

use boardlex_core::traits::ThreadSource;
use boardlex_core::types::{DocumentId, DocumentUnit, Post, RawDocument};

/// Raw documents gathered from one board, plus what happened on the way.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub documents: Vec<RawDocument>,
    /// Subjects of the listed threads that have one
    pub titles: Vec<String>,
    pub threads_listed: usize,
    pub threads_requested: usize,
    pub threads_fetched: usize,
    pub threads_failed: usize,
    pub posts: usize,
    /// Posts without a body, kept as empty text
    pub missing_bodies: usize,
}

/// List `board`, fetch its first `limit` threads (all when `None`) and turn
/// them into documents of the given `unit`.
///
/// A thread that fails to fetch is logged and skipped; only a failed listing
/// is an error.
pub fn collect_documents<S>(
    source: &S,
    board: &str,
    limit: Option<usize>,
    unit: DocumentUnit,
    progress: &ProgressBar,
) -> Result<Collection>
where
    S: ThreadSource + ?Sized,
{
    let threads = source
        .list_threads(board)
        .with_context(|| format!("Failed to list threads of /{board}/"))?;
    let mut collection = Collection {
        threads_listed: threads.len(),
        titles: threads.iter().filter_map(|t| t.title.clone()).collect(),
        ..Collection::default()
    };
    let selected = match limit {
        Some(n) => &threads[..threads.len().min(n)],
        None => &threads[..],
    };
    collection.threads_requested = selected.len();
    info!(board, listed = threads.len(), requested = selected.len(), "collecting threads");

    progress.set_length(selected.len() as u64);
    for thread in selected {
        progress.set_message(format!("thread {}", thread.id));
        match source.fetch_thread(board, thread.id) {
            Ok(posts) => {
                collection.threads_fetched += 1;
                collection.posts += posts.len();
                collection.missing_bodies += posts.iter().filter(|p| p.comment.is_none()).count();
                match unit {
                    DocumentUnit::Thread => {
                        collection.documents.push(RawDocument::from_bodies(
                            DocumentId::thread(board, thread.id),
                            posts.iter().map(Post::body),
                        ));
                    }
                    DocumentUnit::Post => {
                        collection.documents.extend(posts.iter().map(|p| {
                            RawDocument::new(DocumentId::post(board, thread.id, p.no), p.body())
                        }));
                    }
                }
            }
            Err(err) => {
                collection.threads_failed += 1;
                warn!(board, thread = thread.id, error = %format!("{err:#}"), "skipping thread");
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();
    Ok(collection)
}
