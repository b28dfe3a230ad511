use serde::{Deserialize, Serialize};
use crate::allocation::TimedSegment;
use crate::subtitle_processor::{format_timestamp, TIME_RANGE_SEPARATOR};

// @module: SRT and CSV rendering of timed segments

// @const: CSV header row
pub const CSV_HEADER: &str = "speaker,transcription,translation,start_time,end_time";

pub const SRT_MIME_TYPE: &str = "text/plain";
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Output formats a request can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Srt,
    Csv,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Srt => SRT_MIME_TYPE,
            Self::Csv => CSV_MIME_TYPE,
        }
    }
}

/// A generated text blob ready to be saved or offered for download
#[derive(Debug, Clone, PartialEq)]
pub struct OutputArtifact {
    pub format: OutputFormat,
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl OutputArtifact {
    pub fn new(format: OutputFormat, file_name: &str, content: String) -> Self {
        OutputArtifact {
            format,
            file_name: file_name.to_string(),
            mime_type: format.mime_type(),
            content,
        }
    }
}

/// Seconds with exactly three decimals
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.3}", seconds)
}

/// Time range line for a segment: the slot's original line when there is one
pub fn srt_time_range(segment: &TimedSegment) -> String {
    match &segment.time_range_label {
        Some(label) => label.clone(),
        None => format!(
            "{}{}{}",
            format_timestamp(segment.start),
            TIME_RANGE_SEPARATOR,
            format_timestamp(segment.end)
        ),
    }
}

/// Render segments as SRT, numbered from 1
pub fn render_srt(segments: &[TimedSegment]) -> String {
    let mut srt = String::new();
    for (i, segment) in segments.iter().enumerate() {
        srt.push_str(&format!("{}\n{}\n{}\n\n", i + 1, srt_time_range(segment), segment.text()));
    }
    srt
}

/// Quote a CSV field when it holds a delimiter, quote or line break
pub fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render segments as CSV with a fixed header row
pub fn render_csv(segments: &[TimedSegment]) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + segments.len() * 64);
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for segment in segments {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            escape_csv_field(&segment.speaker),
            escape_csv_field(&segment.transcription),
            escape_csv_field(&segment.translation),
            format_seconds(segment.start),
            format_seconds(segment.end)
        ));
    }
    csv
}
