use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};
use crate::errors::SubtitleError;

// @module: SRT timing parsing and timestamp conversion

// @const: Separator between the two halves of an SRT time range
pub const TIME_RANGE_SEPARATOR: &str = " --> ";

// @const: Loose shape of an SRT time range line, used for file sniffing
pub static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+:\d{2}:\d{2},\d{1,3} --> \d+:\d{2}:\d{2},\d{1,3}").unwrap()
});

// @struct: Start/end pair in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    // @field: Start in seconds
    pub start: f64,

    // @field: End in seconds, never before start
    pub end: f64,
}

impl TimeRange {
    /// Parse an SRT time range such as `00:00:01,000 --> 00:00:03,500`
    pub fn parse(range: &str) -> Result<Self, SubtitleError> {
        let parts: Vec<&str> = range.trim().split(TIME_RANGE_SEPARATOR).collect();
        if parts.len() != 2 {
            return Err(SubtitleError::InvalidTimeRange(range.to_string()));
        }

        let start = parse_timestamp(parts[0])?;
        let end = parse_timestamp(parts[1])?;
        if end < start {
            return Err(SubtitleError::ReversedTimeRange(range.to_string()));
        }

        Ok(TimeRange { start, end })
    }

    /// Length of the range in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            format_timestamp(self.start),
            TIME_RANGE_SEPARATOR,
            format_timestamp(self.end)
        )
    }
}

/// Convert an SRT timestamp (`HH:MM:SS,mmm`) to seconds.
///
/// The comma is the decimal separator of the seconds field. Hours and minutes
/// must be whole numbers; the seconds field may carry any fraction.
pub fn parse_timestamp(timestamp: &str) -> Result<f64, SubtitleError> {
    let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());
    let trimmed = timestamp.trim();

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let hours: u64 = parts[0].parse().map_err(|_| invalid())?;
    let minutes: u64 = parts[1].parse().map_err(|_| invalid())?;
    let seconds_field = parts[2].replace(',', ".");
    // Reject signs, exponents and "inf"/"nan", which f64 parsing would accept
    if seconds_field.is_empty() || !seconds_field.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid());
    }
    let seconds: f64 = seconds_field.parse().map_err(|_| invalid())?;

    let whole_seconds = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .ok_or_else(invalid)?;

    Ok(whole_seconds as f64 + seconds)
}

/// Format seconds as an SRT timestamp (HH:MM:SS,mmm), rounded to the millisecond
pub fn format_timestamp(seconds: f64) -> String {
    let ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

// @struct: One parsed block of an SRT timing file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimingBlock {
    // @field: Index line as it appeared in the file
    pub index: String,

    // @field: Raw time range line
    pub time_range: String,

    // @field: Original subtitle lines, unused downstream
    pub text: Vec<String>,
}

impl TimingBlock {
    /// Creates a block from its raw parts - used by tests and external consumers
    pub fn new(index: &str, time_range: &str, text: &[&str]) -> Self {
        TimingBlock {
            index: index.to_string(),
            time_range: time_range.to_string(),
            text: text.iter().map(|line| line.to_string()).collect(),
        }
    }

    /// Parse this block's time range
    pub fn parse_time_range(&self) -> Result<TimeRange, SubtitleError> {
        TimeRange::parse(&self.time_range)
    }
}

/// Ordered timing blocks of one SRT file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingTrack {
    /// Blocks in file order
    pub blocks: Vec<TimingBlock>,
}

impl TimingTrack {
    /// Create a track from already parsed blocks
    pub fn new(blocks: Vec<TimingBlock>) -> Self {
        TimingTrack { blocks }
    }

    /// Parse SRT content into a track; an empty track is not an error here
    pub fn parse(content: &str) -> Self {
        TimingTrack {
            blocks: parse_srt_string(content),
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Parse every block's time range, failing on the first unusable one
    pub fn time_ranges(&self) -> Result<Vec<TimeRange>, SubtitleError> {
        if self.blocks.is_empty() {
            return Err(SubtitleError::NoBlocks);
        }

        self.blocks
            .iter()
            .enumerate()
            .map(|(i, block)| {
                if block.time_range.trim().is_empty() {
                    return Err(SubtitleError::MissingTimeRange(i + 1));
                }
                block.parse_time_range()
            })
            .collect()
    }

    /// Sum of every block's duration
    pub fn total_duration(&self) -> Result<f64, SubtitleError> {
        Ok(self.time_ranges()?.iter().map(TimeRange::duration).sum())
    }
}

/// Parse SRT format string into timing blocks.
///
/// A blank line closes the current block only once it holds text, so a
/// trailing index and time range with no text lines is dropped. Indices are
/// kept verbatim; callers renumber on output.
pub fn parse_srt_string(content: &str) -> Vec<TimingBlock> {
    let mut blocks = Vec::new();
    let mut current = TimingBlock::default();

    for line in content.trim().split('\n') {
        let line = line.trim();

        if line.is_empty() {
            if !current.text.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else if current.index.is_empty() {
            current.index = line.to_string();
        } else if current.time_range.is_empty() {
            current.time_range = line.to_string();
        } else {
            current.text.push(line.to_string());
        }
    }

    if !current.text.is_empty() {
        blocks.push(current);
    } else if !current.index.is_empty() {
        warn!("Dropping trailing timing block '{}' with no text", current.index);
    }

    debug!("Parsed {} timing blocks", blocks.len());
    blocks
}
