/*!
 * Integration tests for the generation pipeline, from raw text to SRT and CSV
 */

use subtime::app_config::AllocationMode;
use subtime::errors::{GenerationError, SubtitleError};
use subtime::output::{OutputFormat, CSV_HEADER};
use subtime::{generate, GenerationRequest};
use crate::common;

/// Test the two-block proportional example end to end
#[test]
fn test_proportional_withTwoBlocks_shouldFillFourSeconds() {
    let request = GenerationRequest::new("Hello world. Goodbye now.", AllocationMode::Proportional)
        .with_timing_srt(common::TWO_BLOCK_SRT);

    let result = generate(&request).unwrap();

    assert_eq!(result.segments.len(), 2);
    assert_eq!(result.segments[0].text(), "Hello world.");
    assert_eq!(result.segments[1].text(), "Goodbye now.");

    let total: f64 = result.segments.iter().map(|s| s.duration()).sum();
    assert!((total - 4.0).abs() < 1e-9);
    assert_eq!(result.segments[1].end, 4.0);

    // Both sentences hold twelve characters
    assert!((result.segments[0].duration() - 2.0).abs() < 1e-9);
    assert!((result.segments[1].duration() - 2.0).abs() < 1e-9);
}

/// Test the fixed-rate example through both renderers
#[test]
fn test_fixedRate_withTenCps_shouldRenderSrtAndCsv() {
    let request = GenerationRequest::new("Hi there. Bye now.", AllocationMode::FixedRate).with_reading_rate(10.0);

    let result = generate(&request).unwrap();

    assert_eq!(
        result.srt.as_deref(),
        Some("1\n00:00:00,000 --> 00:00:00,900\nHi there.\n\n2\n00:00:00,900 --> 00:00:01,700\nBye now.\n\n")
    );
    assert_eq!(
        result.csv.as_deref(),
        Some(
            "speaker,transcription,translation,start_time,end_time\n\
             Speaker 1,Hi there.,Hi there.,0.000,0.900\n\
             Speaker 1,Bye now.,Bye now.,0.900,1.700\n"
        )
    );
    assert!(result.timeline.is_clean());
}

/// Test round-robin fill against the timing file's slots
#[test]
fn test_roundRobin_withMoreSentencesThanSlots_shouldReuseSlotRanges() {
    let request = GenerationRequest::new("One two. Three! Four? Five.", AllocationMode::RoundRobin)
        .with_timing_srt(common::TWO_BLOCK_SRT);

    let result = generate(&request).unwrap();

    assert_eq!(result.segments.len(), 2);
    assert_eq!(result.segments[0].text(), "One two. Four?");
    assert_eq!(result.segments[1].text(), "Three! Five.");

    let srt = result.srt.unwrap();
    assert!(srt.contains("1\n00:00:01,000 --> 00:00:03,000\nOne two. Four?\n"));
    assert!(srt.contains("2\n00:00:04,000 --> 00:00:06,000\nThree! Five.\n"));
}

/// Test round-robin with fewer sentences than slots keeps empty slots
#[test]
fn test_roundRobin_withFewerSentencesThanSlots_shouldEmitEmptySegments() {
    let request = GenerationRequest::new("Only one sentence.", AllocationMode::RoundRobin)
        .with_timing_srt(common::TWO_BLOCK_SRT);

    let result = generate(&request).unwrap();

    assert_eq!(result.segments.len(), 2);
    assert_eq!(result.segments[1].text(), "");
    assert!(result.csv.unwrap().ends_with("Speaker 1,,,4.000,6.000\n"));
}

/// Test that no characters are lost or added by segmentation
#[test]
fn test_fixedRate_withMixedPunctuation_shouldKeepEveryCharacter() {
    let text = "今日は晴れ。明日は？ Yes! Trailing words without a mark";
    let request = GenerationRequest::new(text, AllocationMode::FixedRate);

    let result = generate(&request).unwrap();

    let joined: String = result.segments.iter().map(|s| s.text()).collect();
    assert_eq!(common::non_whitespace(&joined), common::non_whitespace(text));
    assert_eq!(result.segments.len(), 4);
}

/// Test that blank translations fail for every mode
#[test]
fn test_generate_withEmptyTranslation_shouldFailForAllModes() {
    for mode in [AllocationMode::RoundRobin, AllocationMode::Proportional, AllocationMode::FixedRate] {
        let request = GenerationRequest::new("", mode).with_timing_srt(common::TWO_BLOCK_SRT);
        assert!(
            matches!(generate(&request), Err(GenerationError::EmptyInput(_))),
            "mode {}",
            mode
        );
    }
}

/// Test that a malformed timestamp aborts the whole generation
#[test]
fn test_generate_withMalformedTimestamp_shouldFailWithParseError() {
    let srt = "1\n00:00:01,000 --> 00:0x:03,000\nHello\n";
    let request = GenerationRequest::new("Hello.", AllocationMode::Proportional).with_timing_srt(srt);

    match generate(&request) {
        Err(GenerationError::Parse(SubtitleError::InvalidTimestamp(ts))) => assert_eq!(ts, "00:0x:03,000"),
        other => panic!("unexpected result: {:?}", other),
    }
}

/// Test that an hours field overflowing the seconds count fails as a parse error
#[test]
fn test_generate_withOverflowingHours_shouldFailWithParseError() {
    let srt = "1\n99999999999999999:00:00,000 --> 99999999999999999:00:01,000\nHello\n";
    let request = GenerationRequest::new("Hello.", AllocationMode::Proportional).with_timing_srt(srt);

    assert!(matches!(
        generate(&request),
        Err(GenerationError::Parse(SubtitleError::InvalidTimestamp(_)))
    ));
}

/// Test that only the requested formats are rendered
#[test]
fn test_generate_withSrtOnly_shouldSkipCsv() {
    let request = GenerationRequest::new("Short.", AllocationMode::FixedRate).with_formats(vec![OutputFormat::Srt]);

    let result = generate(&request).unwrap();

    assert!(result.srt.is_some());
    assert!(result.csv.is_none());
}

/// Test that a fast reading rate is reported by the timeline check
#[test]
fn test_generate_withFastRate_shouldFlagReadingSpeed() {
    let mut request = GenerationRequest::new("A long sentence that takes a while to read.", AllocationMode::FixedRate)
        .with_reading_rate(30.0);
    request.timeline.max_cps = 20.0;

    let result = generate(&request).unwrap();

    assert!(!result.timeline.is_clean());
    assert_eq!(result.timeline.total_issues(), 1);
    assert!(result.csv.unwrap().starts_with(CSV_HEADER));
}
