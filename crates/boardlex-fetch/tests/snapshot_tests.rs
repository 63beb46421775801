use std::fs;
use std::path::Path;

use anyhow::Result;
use indicatif::ProgressBar;
use tempfile::TempDir;

use boardlex_core::traits::ThreadSource;
use boardlex_core::types::{DocumentUnit, Post, ThreadId, ThreadSummary};
use boardlex_fetch::{collect_documents, SnapshotSource};

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn snapshot_with_index() -> TempDir {
    let dir = TempDir::new().unwrap();
    let board = dir.path().join("g");
    write(
        &board.join("threads.json"),
        r#"[{"page": 1, "threads": [{"no": 20, "sub": "Desktop thread"}, {"no": 10}]},
            {"page": 2, "threads": [{"no": 30}]}]"#,
    );
    write(
        &board.join("thread/20.json"),
        r#"{"posts": [{"no": 20, "com": "Post your desktops"}, {"no": 21, "com": "tiling window managers"}]}"#,
    );
    write(&board.join("thread/10.json"), r#"{"posts": [{"no": 10, "com": "hello"}, {"no": 11}]}"#);
    write(&board.join("thread/30.json"), r#"{"posts": [{"no": 30, "com": "third"}]}"#);
    dir
}

#[test]
fn test_lists_threads_in_index_order() {
    let dir = snapshot_with_index();
    let source = SnapshotSource::new(dir.path());
    let threads = source.list_threads("g").unwrap();
    let ids: Vec<ThreadId> = threads.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![20, 10, 30]);
    assert_eq!(threads[0].title.as_deref(), Some("Desktop thread"));
}

#[test]
fn test_lists_thread_files_without_index() {
    let dir = TempDir::new().unwrap();
    let board = dir.path().join("sci");
    write(&board.join("thread/200.json"), r#"{"posts": []}"#);
    write(&board.join("thread/3.json"), r#"{"posts": []}"#);
    write(&board.join("thread/notes.txt"), "ignored");
    write(&board.join("thread/draft.json"), "ignored");

    let threads = SnapshotSource::new(dir.path()).list_threads("sci").unwrap();
    let ids: Vec<ThreadId> = threads.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 200]);
}

#[test]
fn test_missing_board_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = SnapshotSource::new(dir.path()).list_threads("g").unwrap_err();
    assert!(err.to_string().contains("Not found"), "unexpected error: {err}");
}

#[test]
fn test_board_name_cannot_escape_root() {
    let dir = snapshot_with_index();
    let source = SnapshotSource::new(dir.path().join("g"));
    assert!(source.list_threads("..").is_err());
    assert!(source.fetch_thread("../g", 20).is_err());
}

#[test]
fn test_collect_thread_documents() {
    let dir = snapshot_with_index();
    let source = SnapshotSource::new(dir.path());
    let collection = collect_documents(&source, "g", None, DocumentUnit::Thread, &ProgressBar::hidden()).unwrap();

    assert_eq!(collection.threads_listed, 3);
    assert_eq!(collection.threads_fetched, 3);
    assert_eq!(collection.threads_failed, 0);
    assert_eq!(collection.posts, 5);
    assert_eq!(collection.missing_bodies, 1);
    assert_eq!(collection.titles, vec!["Desktop thread".to_string()]);

    let ids: Vec<&str> = collection.documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["g/20", "g/10", "g/30"]);
    assert_eq!(collection.documents[0].bodies, vec!["Post your desktops", "tiling window managers"]);
    assert_eq!(collection.documents[1].bodies, vec!["hello", ""]);
}

#[test]
fn test_collect_respects_thread_limit() {
    let dir = snapshot_with_index();
    let source = SnapshotSource::new(dir.path());
    let collection = collect_documents(&source, "g", Some(2), DocumentUnit::Thread, &ProgressBar::hidden()).unwrap();
    assert_eq!(collection.threads_listed, 3);
    assert_eq!(collection.threads_requested, 2);
    assert_eq!(collection.documents.len(), 2);

    let all = collect_documents(&source, "g", Some(100), DocumentUnit::Thread, &ProgressBar::hidden()).unwrap();
    assert_eq!(all.threads_requested, 3);
}

#[test]
fn test_collect_post_documents() {
    let dir = snapshot_with_index();
    let source = SnapshotSource::new(dir.path());
    let collection = collect_documents(&source, "g", Some(1), DocumentUnit::Post, &ProgressBar::hidden()).unwrap();
    let ids: Vec<&str> = collection.documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["g/20/20", "g/20/21"]);
    assert_eq!(collection.documents[1].bodies, vec!["tiling window managers"]);
}

struct FlakySource;

impl ThreadSource for FlakySource {
    fn list_threads(&self, _board: &str) -> Result<Vec<ThreadSummary>> {
        Ok((1..=3).map(|id| ThreadSummary { id, title: None }).collect())
    }

    fn fetch_thread(&self, _board: &str, id: ThreadId) -> Result<Vec<Post>> {
        if id == 2 {
            anyhow::bail!("connection reset");
        }
        Ok(vec![Post { no: id, comment: Some(format!("body of {id}")) }])
    }
}

#[test]
fn test_failed_thread_is_skipped() {
    let source: Box<dyn ThreadSource> = Box::new(FlakySource);
    let collection =
        collect_documents(source.as_ref(), "g", None, DocumentUnit::Thread, &ProgressBar::hidden()).unwrap();
    assert_eq!(collection.threads_fetched, 2);
    assert_eq!(collection.threads_failed, 1);
    let ids: Vec<&str> = collection.documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["g/1", "g/3"]);
}

struct DownSource;

impl ThreadSource for DownSource {
    fn list_threads(&self, _board: &str) -> Result<Vec<ThreadSummary>> {
        anyhow::bail!("service unavailable")
    }

    fn fetch_thread(&self, _board: &str, _id: ThreadId) -> Result<Vec<Post>> {
        unreachable!("listing failed")
    }
}

#[test]
fn test_failed_listing_is_fatal() {
    let err = collect_documents(&DownSource, "g", None, DocumentUnit::Thread, &ProgressBar::hidden()).unwrap_err();
    assert!(format!("{err:#}").contains("service unavailable"));
}
