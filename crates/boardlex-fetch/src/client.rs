use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

use boardlex_core::config::SourceSettings;
use boardlex_core::traits::ThreadSource;
use boardlex_core::types::{validate_board, Post, ThreadId, ThreadSummary};

use crate::wire::{parse_thread, parse_thread_list};

/// Blocking client for the board's read-only JSON API.
///
/// Requests are spaced at least `request_delay_ms` apart; the API asks
/// clients to stay at or below one request per second.
pub struct ChanClient {
    http: Client,
    base_url: String,
    request_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl ChanClient {
    pub fn new(settings: &SourceSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            request_delay: Duration::from_millis(settings.request_delay_ms),
            last_request: Mutex::new(None),
        })
    }

    pub fn threads_url(&self, board: &str) -> String {
        format!("{}/{}/threads.json", self.base_url, board)
    }

    pub fn thread_url(&self, board: &str, id: ThreadId) -> String {
        format!("{}/{}/thread/{}.json", self.base_url, board, id)
    }

    fn get_text(&self, url: &str) -> Result<String> {
        self.pace();
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("Bad status from {url}"))?;
        response.text().with_context(|| format!("Failed to read body from {url}"))
    }

    fn pace(&self) {
        let mut last = self.last_request.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.request_delay {
                thread::sleep(self.request_delay - elapsed);
            }
        }
        *last = Some(Instant::now());
    }
}

impl ThreadSource for ChanClient {
    fn list_threads(&self, board: &str) -> Result<Vec<ThreadSummary>> {
        validate_board(board)?;
        parse_thread_list(&self.get_text(&self.threads_url(board))?)
    }

    fn fetch_thread(&self, board: &str, id: ThreadId) -> Result<Vec<Post>> {
        validate_board(board)?;
        parse_thread(&self.get_text(&self.thread_url(board, id))?)
    }
}
