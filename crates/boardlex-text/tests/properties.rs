use proptest::prelude::*;

use boardlex_text::frequency::ngrams;
use boardlex_text::relevance::relevance;
use boardlex_text::sanitize::sanitize;
use boardlex_text::stopwords::StopWords;
use boardlex_text::tokenize::tokenize;

// Markup-flavoured noise: tags, entities, markers, URLs, punctuation, unicode.
fn noisy_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[A-Za-z]{1,20}",
        Just(" ".to_string()),
        Just("<br>".to_string()),
        Just("<span class=\"quote\">".to_string()),
        Just("</a>".to_string()),
        Just("&amp;".to_string()),
        Just("&#39;".to_string()),
        Just("&gt;&gt;".to_string()),
        ">>[0-9]{1,8}",
        "https?://[a-z]{1,10}\\.com/[a-z0-9?=&]{0,10}",
        "[0-9!?.,;:'\"()\\[\\]{}<>/\\\\-]{1,5}",
        "\\PC{1,4}",
        "[ \t\n]{1,6}",
    ];
    prop::collection::vec(piece, 0..40).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn sanitized_output_is_clean(raw in noisy_text()) {
        if let Ok(clean) = sanitize(&raw) {
            prop_assert!(clean.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
            prop_assert!(!clean.contains("  "));
            prop_assert_eq!(clean.trim(), clean.as_str());
        }
    }

    #[test]
    fn sanitize_is_idempotent(raw in noisy_text()) {
        if let Ok(clean) = sanitize(&raw) {
            prop_assert_eq!(sanitize(&clean), Ok(clean.clone()));
        }
    }

    #[test]
    fn tokens_respect_shape_and_stopwords(raw in noisy_text()) {
        let stopwords = StopWords::builtin();
        if let Ok(clean) = sanitize(&raw) {
            for token in tokenize(&clean, &stopwords) {
                prop_assert!((3..=15).contains(&token.len()));
                prop_assert!(token.chars().all(|c| c.is_ascii_lowercase()));
                prop_assert!(!stopwords.contains(&token));
            }
        }
    }

    #[test]
    fn ngram_window_count(words in prop::collection::vec("[a-z]{3,6}", 0..30), n in 1usize..5) {
        let table = ngrams(&words, n);
        if words.len() < n {
            prop_assert!(table.is_empty());
        } else {
            prop_assert_eq!(table.total(), (words.len() - n + 1) as u64);
        }
    }

    #[test]
    fn term_in_every_document_scores_negative(
        docs in prop::collection::vec(prop::collection::vec("[a-z]{3,6}", 0..8), 1..6)
    ) {
        let corpus: Vec<Vec<String>> = docs
            .into_iter()
            .map(|mut doc| { doc.push("everywhere".to_string()); doc })
            .collect();
        let n = corpus.len() as f64;
        for (doc, score) in corpus.iter().zip(relevance(&corpus)) {
            let count = doc.iter().filter(|t| *t == "everywhere").count() as f64;
            let tf = count / doc.len() as f64;
            let value = score.get("everywhere").unwrap();
            prop_assert!(value < 0.0);
            prop_assert!((value - tf * (n / (n + 1.0)).ln()).abs() < 1e-9);
        }
    }
}
