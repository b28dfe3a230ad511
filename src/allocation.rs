/*!
 * Time allocation for segmented translation text.
 *
 * A `TimeAllocationPolicy` decides how sentences receive start and end times:
 * - `RoundRobin` deals sentences into the slots of an existing timing file
 *   and reuses each slot's time range verbatim.
 * - `ProportionalScale` sizes each sentence by its character count at the
 *   default reading rate and stretches the result to a known total duration.
 * - `FixedRate` sizes each sentence by its character count at a caller-chosen
 *   rate and chains the segments from zero.
 */

use log::debug;
use crate::errors::GenerationError;
use crate::segmentation::{SegmentationPolicy, SentenceUnit};
use crate::subtitle_processor::TimeRange;

/// Characters per second assumed when no rate is chosen
pub const DEFAULT_READING_RATE: f64 = 15.26;

/// A pre-existing time slot taken from a timing file
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlot {
    /// Time range line exactly as it appeared in the file
    pub label: String,
    /// Parsed form of `label`
    pub range: TimeRange,
}

/// How sentences are placed on the timeline
#[derive(Debug, Clone, PartialEq)]
pub enum TimeAllocationPolicy {
    /// Sentence `i` goes to slot `i mod N`
    RoundRobin { slots: Vec<TimeSlot> },
    /// Character-weighted durations stretched to `total_duration` seconds
    ProportionalScale { total_duration: f64 },
    /// Character count divided by `rate` characters per second
    FixedRate { rate: f64 },
}

impl TimeAllocationPolicy {
    /// Sentence segmentation paired with this policy
    pub fn segmentation(&self) -> SegmentationPolicy {
        match self {
            Self::RoundRobin { .. } => SegmentationPolicy::WordAccumulation,
            Self::ProportionalScale { .. } | Self::FixedRate { .. } => {
                SegmentationPolicy::PunctuationSplit
            }
        }
    }

    /// Place sentences on the timeline
    pub fn allocate(
        &self,
        sentences: &[SentenceUnit],
        speaker: &str,
    ) -> Result<Vec<TimedSegment>, GenerationError> {
        match self {
            Self::RoundRobin { slots } => fill_slots(sentences, slots, speaker),
            Self::ProportionalScale { total_duration } => {
                scale_to_duration(sentences, *total_duration, speaker)
            }
            Self::FixedRate { rate } => accumulate_at_rate(sentences, *rate, speaker),
        }
    }
}

/// One output unit: a sentence (or merged bucket) with its time range
#[derive(Debug, Clone, PartialEq)]
pub struct TimedSegment {
    pub speaker: String,
    pub transcription: String,
    /// Same text as `transcription`; there is no separate translation step
    pub translation: String,
    pub start: f64,
    pub end: f64,
    /// Original time range line for slot-filled segments
    pub time_range_label: Option<String>,
}

impl TimedSegment {
    pub fn new(speaker: &str, text: &str, start: f64, end: f64) -> Self {
        TimedSegment {
            speaker: speaker.to_string(),
            transcription: text.to_string(),
            translation: text.to_string(),
            start,
            end,
            time_range_label: None,
        }
    }

    /// Segment text
    pub fn text(&self) -> &str {
        &self.transcription
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Deal sentences into `slot_count` buckets by `i mod slot_count`.
///
/// Each bucket's sentences are joined with a single space; buckets that
/// receive nothing hold an empty string.
pub fn distribute_round_robin(
    sentences: &[SentenceUnit],
    slot_count: usize,
) -> Result<Vec<String>, GenerationError> {
    if slot_count == 0 {
        return Err(GenerationError::InvalidParameter(
            "round-robin fill needs at least one slot".to_string(),
        ));
    }

    let mut buckets: Vec<Vec<&str>> = vec![Vec::new(); slot_count];
    for (i, sentence) in sentences.iter().enumerate() {
        buckets[i % slot_count].push(sentence.text());
    }

    Ok(buckets.into_iter().map(|bucket| bucket.join(" ")).collect())
}

fn fill_slots(
    sentences: &[SentenceUnit],
    slots: &[TimeSlot],
    speaker: &str,
) -> Result<Vec<TimedSegment>, GenerationError> {
    let buckets = distribute_round_robin(sentences, slots.len())?;

    debug!("Distributed {} sentences over {} slots", sentences.len(), slots.len());

    Ok(slots
        .iter()
        .zip(buckets)
        .map(|(slot, text)| TimedSegment {
            time_range_label: Some(slot.label.clone()),
            ..TimedSegment::new(speaker, &text, slot.range.start, slot.range.end)
        })
        .collect())
}

/// Running character totals: element `i` is the number of characters in
/// sentences `0..i`, with one extra element for the grand total.
fn cumulative_lengths(sentences: &[SentenceUnit]) -> Vec<usize> {
    let mut totals = Vec::with_capacity(sentences.len() + 1);
    let mut running = 0;
    totals.push(running);
    for sentence in sentences {
        running += sentence.len();
        totals.push(running);
    }
    totals
}

fn scale_to_duration(
    sentences: &[SentenceUnit],
    total_duration: f64,
    speaker: &str,
) -> Result<Vec<TimedSegment>, GenerationError> {
    if !total_duration.is_finite() || total_duration < 0.0 {
        return Err(GenerationError::InvalidParameter(format!(
            "total duration must be a non-negative number of seconds, got {}",
            total_duration
        )));
    }

    let totals = cumulative_lengths(sentences);
    let ideal_total = totals[sentences.len()] as f64 / DEFAULT_READING_RATE;
    if ideal_total == 0.0 {
        return Err(GenerationError::DivideByZero);
    }

    let scale = total_duration / ideal_total;
    debug!(
        "Scaling {:.3}s of ideal reading time to {:.3}s (factor {:.4})",
        ideal_total, total_duration, scale
    );

    let at = |chars: usize| chars as f64 / DEFAULT_READING_RATE * scale;
    let last = sentences.len() - 1;

    Ok(sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            // Pin the final end so the durations add up to the target exactly
            let end = if i == last { total_duration } else { at(totals[i + 1]) };
            TimedSegment::new(speaker, sentence.text(), at(totals[i]), end)
        })
        .collect())
}

fn accumulate_at_rate(
    sentences: &[SentenceUnit],
    rate: f64,
    speaker: &str,
) -> Result<Vec<TimedSegment>, GenerationError> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(GenerationError::InvalidParameter(format!(
            "reading rate must be a positive number of characters per second, got {}",
            rate
        )));
    }

    let totals = cumulative_lengths(sentences);
    debug!(
        "Laying out {} characters at {} cps ({:.3}s)",
        totals[sentences.len()],
        rate,
        totals[sentences.len()] as f64 / rate
    );

    Ok(sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            TimedSegment::new(
                speaker,
                sentence.text(),
                totals[i] as f64 / rate,
                totals[i + 1] as f64 / rate,
            )
        })
        .collect())
}
