//! Offline [`ThreadSource`] over a directory laid out like the API:
//!
//! ```text
//! <root>/<board>/threads.json
//! <root>/<board>/thread/<no>.json
//! ```
//!
//! `threads.json` is optional; without it every `thread/*.json` is listed in
//! ascending thread order.
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use boardlex_core::error::Error;
use boardlex_core::traits::ThreadSource;
use boardlex_core::types::{validate_board, Post, ThreadId, ThreadSummary};

use crate::wire::{parse_thread, parse_thread_list};

pub struct SnapshotSource {
    root: PathBuf,
}

impl SnapshotSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn board_dir(&self, board: &str) -> Result<PathBuf> {
        validate_board(board)?;
        let dir = self.root.join(board);
        if !dir.is_dir() {
            return Err(Error::NotFound(dir.display().to_string()).into());
        }
        Ok(dir)
    }

    fn read(path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn scan_thread_files(thread_dir: &Path) -> Vec<ThreadSummary> {
        let mut ids: Vec<ThreadId> = walkdir::WalkDir::new(thread_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
            .filter_map(|e| e.path().file_stem().and_then(|s| s.to_str()).and_then(|s| s.parse().ok()))
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|id| ThreadSummary { id, title: None }).collect()
    }
}

impl ThreadSource for SnapshotSource {
    fn list_threads(&self, board: &str) -> Result<Vec<ThreadSummary>> {
        let dir = self.board_dir(board)?;
        let index = dir.join("threads.json");
        if index.is_file() {
            parse_thread_list(&Self::read(&index)?).with_context(|| index.display().to_string())
        } else {
            Ok(Self::scan_thread_files(&dir.join("thread")))
        }
    }

    fn fetch_thread(&self, board: &str, id: ThreadId) -> Result<Vec<Post>> {
        let path = self.board_dir(board)?.join("thread").join(format!("{id}.json"));
        parse_thread(&Self::read(&path)?).with_context(|| path.display().to_string())
    }
}
