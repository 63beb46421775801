//! Markup-to-plain-text normalization.
//!
//! Turns one raw post body into lowercase ASCII words separated by single
//! spaces. Reply-marker removal and space collapsing are bounded loops; a
//! document that exhausts either cap is rejected whole with [`MalformedInput`]
//! instead of being returned half cleaned.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const DEFAULT_REPLY_MARKER_CAP: usize = 10;
pub const DEFAULT_WHITESPACE_CAP: usize = 10;

static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>|[\r\n\t\x0B\x0C]").expect("line break pattern is valid"));

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<.*?>").expect("tag pattern is valid"));

// `>>123`, and cross-board `>>>/g/` or `>>>/g/123`.
static REPLY_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">>(?:>/[A-Za-z0-9]+/\d*|\d+)").expect("reply marker pattern is valid"));

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+").expect("url pattern is valid")
});

/// Why a document was dropped by the sanitizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error("more than {cap} reply markers")]
    ReplyMarkerCap { cap: usize },

    #[error("space runs did not collapse within {cap} passes")]
    WhitespaceCap { cap: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sanitizer {
    reply_marker_cap: usize,
    whitespace_cap: usize,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_MARKER_CAP, DEFAULT_WHITESPACE_CAP)
    }
}

impl Sanitizer {
    pub fn new(reply_marker_cap: usize, whitespace_cap: usize) -> Self {
        Self { reply_marker_cap, whitespace_cap }
    }

    /// Clean one raw document.
    ///
    /// Stages run in a fixed order; each assumes the previous ones ran:
    /// line breaks, tags, entities, reply markers, URLs, non-letters,
    /// space runs, then lowercase and trim.
    ///
    /// # Example
    ///
    /// ```
    /// use boardlex_text::sanitize::Sanitizer;
    ///
    /// let clean = Sanitizer::default()
    ///     .sanitize("<b>Hello &amp; welcome!</b> >>123 check http://x.com NOW")
    ///     .unwrap();
    /// assert_eq!(clean, "hello welcome check now");
    /// ```
    pub fn sanitize(&self, raw: &str) -> Result<String, MalformedInput> {
        let text = LINE_BREAK_RE.replace_all(raw, " ");
        let text = TAG_RE.replace_all(&text, "");
        let text = html_escape::decode_html_entities(&text);
        let text = self.strip_reply_markers(&text)?;
        let text = URL_RE.replace_all(&text, "");
        let text: String = text
            .chars()
            .filter_map(|c| {
                if c.is_ascii_alphabetic() {
                    Some(c)
                } else if c.is_whitespace() {
                    Some(' ')
                } else {
                    None
                }
            })
            .collect();
        let text = self.collapse_spaces(text)?;
        Ok(text.to_ascii_lowercase().trim().to_string())
    }

    fn strip_reply_markers(&self, text: &str) -> Result<String, MalformedInput> {
        let mut text = text.to_string();
        let mut removed = 0;
        while let Some(marker) = REPLY_MARKER_RE.find(&text) {
            if removed == self.reply_marker_cap {
                return Err(MalformedInput::ReplyMarkerCap { cap: self.reply_marker_cap });
            }
            let range = marker.range();
            text.replace_range(range, " ");
            removed += 1;
        }
        Ok(text)
    }

    // Each pass halves every run, so the cap bounds the longest run accepted
    // at 2^cap spaces.
    fn collapse_spaces(&self, mut text: String) -> Result<String, MalformedInput> {
        let mut passes = 0;
        while text.contains("  ") {
            if passes == self.whitespace_cap {
                return Err(MalformedInput::WhitespaceCap { cap: self.whitespace_cap });
            }
            text = text.replace("  ", " ");
            passes += 1;
        }
        Ok(text)
    }
}

/// [`Sanitizer::sanitize`] with the default caps.
pub fn sanitize(raw: &str) -> Result<String, MalformedInput> {
    Sanitizer::default().sanitize(raw)
}
