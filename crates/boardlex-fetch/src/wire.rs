//! JSON shapes of the board API.
//!
//! `threads.json` is an array of index pages, each listing thread numbers and
//! optional subjects. `thread/<no>.json` holds the posts, whose `com` field is
//! the HTML body; image-only posts omit it.

use anyhow::{Context, Result};
use serde::Deserialize;

use boardlex_core::types::{Post, ThreadSummary};

#[derive(Debug, Deserialize)]
struct IndexPage {
    threads: Vec<IndexThread>,
}

#[derive(Debug, Deserialize)]
struct IndexThread {
    no: u64,
    #[serde(default)]
    sub: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ThreadBody {
    posts: Vec<PostEntry>,
}

#[derive(Debug, Deserialize)]
struct PostEntry {
    no: u64,
    #[serde(default)]
    com: Option<String>,
}

pub fn parse_thread_list(json: &str) -> Result<Vec<ThreadSummary>> {
    let pages: Vec<IndexPage> = serde_json::from_str(json).context("Malformed thread index")?;
    Ok(pages
        .into_iter()
        .flat_map(|page| page.threads)
        .map(|t| ThreadSummary { id: t.no, title: t.sub.filter(|s| !s.trim().is_empty()) })
        .collect())
}

pub fn parse_thread(json: &str) -> Result<Vec<Post>> {
    let body: ThreadBody = serde_json::from_str(json).context("Malformed thread body")?;
    Ok(body.posts.into_iter().map(|p| Post { no: p.no, comment: p.com }).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_thread_list_flattens_pages() {
        let json = r#"[
            {"page": 1, "threads": [{"no": 100, "last_modified": 1, "replies": 3}, {"no": 101, "sub": "General"}]},
            {"page": 2, "threads": [{"no": 102, "sub": "  "}]}
        ]"#;
        let threads = parse_thread_list(json).unwrap();
        assert_eq!(
            threads,
            vec![
                ThreadSummary { id: 100, title: None },
                ThreadSummary { id: 101, title: Some("General".to_string()) },
                ThreadSummary { id: 102, title: None },
            ]
        );
    }

    #[test]
    fn test_parse_thread_keeps_missing_bodies() {
        let json = r#"{"posts": [
            {"no": 1, "com": "first <br> post", "time": 0},
            {"no": 2, "filename": "image"}
        ]}"#;
        let posts = parse_thread(json).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].body(), "first <br> post");
        assert_eq!(posts[1].comment, None);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_thread_list("{not json").is_err());
        assert!(parse_thread(r#"{"threads": []}"#).is_err());
    }
}
