use crate::types::{Post, ThreadId, ThreadSummary};

/// Read-only access to a board's threads.
///
/// Implementations own transport, retries and pacing; callers only see
/// ordered records. A post without a body carries `comment: None`.
pub trait ThreadSource: Send + Sync {
    fn list_threads(&self, board: &str) -> anyhow::Result<Vec<ThreadSummary>>;
    fn fetch_thread(&self, board: &str, id: ThreadId) -> anyhow::Result<Vec<Post>>;
}
