/*!
 * Sentence segmentation of free-form translation text.
 *
 * Sentences are found with punctuation heuristics only: a sentence ends at
 * `.`, `!`, `?` or their full-width forms `。`, `！`, `？`. Abbreviations
 * ("Dr."), decimal numbers ("3.5") and quoted speech are split wherever such a
 * mark appears; this is a known limitation of the heuristic.
 *
 * Two policies exist:
 * - `WordAccumulation` walks whitespace-delimited words and closes a sentence
 *   on a word that ends with a terminal mark. Used by round-robin slot fill.
 * - `PunctuationSplit` cuts the raw text after every terminal mark and trims
 *   the pieces. Used by the character-timing policies.
 */

use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::debug;
use serde::{Deserialize, Serialize};

// @const: Sentence-ending marks, half-width and full-width
pub const TERMINAL_MARKS: [char; 6] = ['.', '!', '?', '。', '！', '？'];

static TERMINAL_MARK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?。！？]").unwrap()
});

/// One sentence of translated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceUnit {
    text: String,
    length: usize,
}

impl SentenceUnit {
    /// Returns `None` for text that is empty after trimming
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(SentenceUnit {
            text: text.to_string(),
            length: text.chars().count(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in Unicode code points
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl fmt::Display for SentenceUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// How raw text is cut into sentences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationPolicy {
    /// Accumulate words until one ends with a terminal mark
    WordAccumulation,
    /// Split after each terminal mark and trim the fragments
    PunctuationSplit,
}

/// Split text into sentences using the given policy
pub fn segment(text: &str, policy: SegmentationPolicy) -> Vec<SentenceUnit> {
    let sentences = match policy {
        SegmentationPolicy::WordAccumulation => split_by_words(text),
        SegmentationPolicy::PunctuationSplit => split_by_punctuation(text),
    };

    debug!("Segmented translation into {} sentences ({:?})", sentences.len(), policy);
    sentences
}

/// Whether a word closes a sentence
pub fn ends_sentence(word: &str) -> bool {
    word.ends_with(TERMINAL_MARKS)
}

/// Word accumulation: newlines count as spaces, words are re-joined with a
/// single space, and a trailing unpunctuated run becomes the last sentence.
pub fn split_by_words(text: &str) -> Vec<SentenceUnit> {
    let mut sentences = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        current.push(word);
        if ends_sentence(word) {
            sentences.extend(SentenceUnit::new(&current.join(" ")));
            current.clear();
        }
    }

    if !current.is_empty() {
        sentences.extend(SentenceUnit::new(&current.join(" ")));
    }

    sentences
}

/// Punctuation split: every terminal mark stays attached to the fragment
/// before it. Internal whitespace, newlines included, is left untouched.
pub fn split_by_punctuation(text: &str) -> Vec<SentenceUnit> {
    let mut sentences = Vec::new();
    let mut fragment_start = 0;

    for mark in TERMINAL_MARK_REGEX.find_iter(text) {
        sentences.extend(SentenceUnit::new(&text[fragment_start..mark.end()]));
        fragment_start = mark.end();
    }

    sentences.extend(SentenceUnit::new(&text[fragment_start..]));
    sentences
}
