//! Layered configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults, `boardlex.toml`,
//! `boardlex.<env>.toml` and `BOARDLEX_*` env vars (nested keys are split on
//! `__`, e.g. `BOARDLEX_SOURCE__MAX_THREADS=10`).
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::DocumentUnit;

pub const ENV_PREFIX: &str = "BOARDLEX_";

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        let mut figment =
            Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("boardlex.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("boardlex.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("boardlex.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("boardlex.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config = Self { figment };
        config.settings()?.validate()?;
        Ok(config)
    }

    /// Layer an explicit file (e.g. `--config path`) over everything loaded
    /// so far, including the environment.
    pub fn merge_file(self, path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            return Err(Error::NotFound(path.display().to_string()).into());
        }
        let config = Self { figment: self.figment.merge(Toml::file(path)) };
        config.settings()?.validate()?;
        Ok(config)
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub text: TextSettings,
    pub analysis: AnalysisSettings,
}

/// Where and how threads are fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub base_url: String,
    /// First N threads of the index; `0` means all of them.
    pub max_threads: usize,
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl SourceSettings {
    pub fn thread_limit(&self) -> Option<usize> {
        (self.max_threads > 0).then_some(self.max_threads)
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://a.4cdn.org".to_string(),
            max_threads: 50,
            request_delay_ms: 1000,
            timeout_secs: 10,
            user_agent: concat!("boardlex/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    pub stopwords_path: String,
    pub reply_marker_cap: usize,
    pub whitespace_cap: usize,
}

impl TextSettings {
    pub fn stopwords_path(&self) -> PathBuf {
        expand_path(&self.stopwords_path)
    }
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            stopwords_path: "data/words_to_ignore.txt".to_string(),
            reply_marker_cap: 10,
            whitespace_cap: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub unit: DocumentUnit,
    pub top_words: usize,
    pub top_ngrams: usize,
    pub ngram_sizes: Vec<usize>,
    pub relevance_top_k: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            unit: DocumentUnit::Thread,
            top_words: 50,
            top_ngrams: 20,
            ngram_sizes: vec![2, 3],
            relevance_top_k: 3,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.source.base_url.trim().is_empty() {
            return Err(Error::InvalidConfig("source.base_url is empty".to_string()));
        }
        if self.source.timeout_secs == 0 {
            return Err(Error::InvalidConfig("source.timeout_secs must be > 0".to_string()));
        }
        if self.text.reply_marker_cap == 0 {
            return Err(Error::InvalidConfig("text.reply_marker_cap must be > 0".to_string()));
        }
        if self.text.whitespace_cap == 0 {
            return Err(Error::InvalidConfig("text.whitespace_cap must be > 0".to_string()));
        }
        if self.analysis.top_words == 0 || self.analysis.top_ngrams == 0 || self.analysis.relevance_top_k == 0 {
            return Err(Error::InvalidConfig(
                "analysis.top_words, top_ngrams and relevance_top_k must be > 0".to_string(),
            ));
        }
        if self.analysis.ngram_sizes.contains(&0) {
            return Err(Error::InvalidConfig("analysis.ngram_sizes must not contain 0".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
