/*!
 * Tests for sentence segmentation
 */

use subtime::segmentation::{segment, split_by_punctuation, split_by_words, SegmentationPolicy, TERMINAL_MARKS};
use crate::common;

const SAMPLES: [&str; 5] = [
    "Hello world. Goodbye now.",
    "Bonjour à tous ! Comment allez-vous ? Très bien.",
    "今日は晴れです。明日は雨でしょう！本当？",
    "Line one continues\non line two. Then a question?   And an exclamation!",
    "Mixed。 widths！ here? done.",
];

/// Test that punctuation split yields one sentence per terminal mark
#[test]
fn test_split_by_punctuation_withOneMarkPerSentence_shouldMatchMarkCount() {
    for sample in SAMPLES {
        let marks = sample.chars().filter(|c| TERMINAL_MARKS.contains(c)).count();
        assert_eq!(split_by_punctuation(sample).len(), marks, "sample: {}", sample);
    }
}

/// Test that both policies keep every non-whitespace character exactly once
#[test]
fn test_segment_withAnyPolicy_shouldCoverAllCharactersOnce() {
    for policy in [SegmentationPolicy::WordAccumulation, SegmentationPolicy::PunctuationSplit] {
        for sample in SAMPLES.iter().chain(["no punctuation at all", "trailing part. without mark"].iter()) {
            let joined: String = segment(sample, policy).iter().map(|s| s.text()).collect();
            assert_eq!(
                common::non_whitespace(&joined),
                common::non_whitespace(sample),
                "policy {:?}, sample {}",
                policy,
                sample
            );
        }
    }
}

/// Test that emitted sentences are never blank
#[test]
fn test_segment_withExtraWhitespace_shouldNotEmitBlankSentences() {
    let units = split_by_punctuation("  First.   \n\n  Second!  \n ");
    let texts: Vec<&str> = units.iter().map(|s| s.text()).collect();
    assert_eq!(texts, vec!["First.", "Second!"]);
}

/// Test that word accumulation collapses newlines to spaces
#[test]
fn test_split_by_words_withNewlines_shouldCollapseToSpaces() {
    let units = split_by_words("Line one continues\non line two. Then");
    assert_eq!(units[0].text(), "Line one continues on line two.");
    assert_eq!(units[1].text(), "Then");
}

/// Test that word accumulation only splits on a word-final mark
#[test]
fn test_split_by_words_withCjkRunOn_shouldKeepOneWord() {
    // No whitespace means a single word; it ends with a mark, so one sentence
    let units = split_by_words("今日は晴れです。明日は雨でしょう！");
    assert_eq!(units.len(), 1);
}

/// Test that the punctuation split splits consecutive marks apart
#[test]
fn test_split_by_punctuation_withConsecutiveMarks_shouldSplitEach() {
    let units = split_by_punctuation("Really?! Yes.");
    let texts: Vec<&str> = units.iter().map(|s| s.text()).collect();
    assert_eq!(texts, vec!["Really?", "!", "Yes."]);
}

/// Test lengths are counted in characters rather than bytes
#[test]
fn test_sentence_length_withMultibyteText_shouldCountCharacters() {
    let units = split_by_punctuation("Très bien. 今日は。");
    assert_eq!(units[0].len(), 10);
    assert_eq!(units[1].len(), 4);
}
