/*!
 * Timecode validation for generated segments.
 *
 * This module checks that a timeline is:
 * - Logically consistent (start <= end)
 * - Non-overlapping between neighbours
 * - Within a readable characters-per-second limit
 */

use log::{debug, warn};

use crate::allocation::TimedSegment;

/// Maximum characters per second for readable subtitles
/// Research suggests 15-25 CPS is readable
pub const DEFAULT_MAX_CPS: f64 = 25.0;

/// Slack for floating-point comparisons between neighbouring times
const TIME_EPSILON: f64 = 1e-9;

/// Types of timeline issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineIssue {
    /// End time is before start time
    InvalidTimeRange {
        start: f64,
        end: f64,
    },
    /// Starts before the previous segment ends
    OverlapsWithPrevious {
        overlap: f64,
    },
    /// Reading speed exceeds limit
    ReadingSpeedTooHigh {
        cps: f64,
        max_cps: f64,
    },
    /// Segment has no text
    EmptyText,
}

impl std::fmt::Display for TimelineIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineIssue::InvalidTimeRange { start, end } => {
                write!(f, "Invalid time range: start {:.3}s > end {:.3}s", start, end)
            }
            TimelineIssue::OverlapsWithPrevious { overlap } => {
                write!(f, "Overlaps previous segment by {:.3}s", overlap)
            }
            TimelineIssue::ReadingSpeedTooHigh { cps, max_cps } => {
                write!(f, "Reading speed too high: {:.1} CPS (max: {:.1})", cps, max_cps)
            }
            TimelineIssue::EmptyText => write!(f, "No text assigned"),
        }
    }
}

/// Issues found for one segment, numbered from 1
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentReport {
    pub seq_num: usize,
    pub issues: Vec<TimelineIssue>,
}

/// Result of validating a whole timeline
#[derive(Debug, Clone, Default)]
pub struct TimelineReport {
    /// Only segments with at least one issue
    pub flagged: Vec<SegmentReport>,
    /// Number of overlapping neighbours
    pub overlap_count: usize,
}

impl TimelineReport {
    pub fn is_clean(&self) -> bool {
        self.flagged.is_empty()
    }

    pub fn total_issues(&self) -> usize {
        self.flagged.iter().map(|r| r.issues.len()).sum()
    }

    /// Emit every issue as a warning
    pub fn log(&self) {
        for report in &self.flagged {
            for issue in &report.issues {
                warn!("Segment {}: {}", report.seq_num, issue);
            }
        }
    }
}

/// Configuration for timeline validation
#[derive(Debug, Clone)]
pub struct TimelineValidatorConfig {
    /// Maximum characters per second
    pub max_cps: f64,
    /// Whether to check for overlaps
    pub check_overlaps: bool,
}

impl Default for TimelineValidatorConfig {
    fn default() -> Self {
        Self {
            max_cps: DEFAULT_MAX_CPS,
            check_overlaps: true,
        }
    }
}

/// Timeline validator for generated segments
pub struct TimelineValidator {
    config: TimelineValidatorConfig,
}

impl TimelineValidator {
    /// Create a new validator with default configuration
    pub fn new() -> Self {
        Self {
            config: TimelineValidatorConfig::default(),
        }
    }

    /// Create a new validator with custom configuration
    pub fn with_config(config: TimelineValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a single segment in isolation
    pub fn validate_segment(&self, segment: &TimedSegment) -> Vec<TimelineIssue> {
        let mut issues = Vec::new();

        if segment.text().trim().is_empty() {
            issues.push(TimelineIssue::EmptyText);
            return issues;
        }

        if segment.end < segment.start {
            issues.push(TimelineIssue::InvalidTimeRange {
                start: segment.start,
                end: segment.end,
            });
            // Can't do further validation with invalid times
            return issues;
        }

        let cps = Self::calculate_cps(segment);
        if cps > self.config.max_cps {
            issues.push(TimelineIssue::ReadingSpeedTooHigh {
                cps,
                max_cps: self.config.max_cps,
            });
        }

        issues
    }

    /// Validate segments in timeline order
    pub fn validate(&self, segments: &[TimedSegment]) -> TimelineReport {
        let mut report = TimelineReport::default();

        for (i, segment) in segments.iter().enumerate() {
            let mut issues = self.validate_segment(segment);

            if self.config.check_overlaps && i > 0 {
                let previous_end = segments[i - 1].end;
                if segment.start + TIME_EPSILON < previous_end {
                    report.overlap_count += 1;
                    issues.push(TimelineIssue::OverlapsWithPrevious {
                        overlap: previous_end - segment.start,
                    });
                }
            }

            if !issues.is_empty() {
                report.flagged.push(SegmentReport { seq_num: i + 1, issues });
            }
        }

        debug!(
            "Timeline validation: {} segments, {} issues, {} overlaps",
            segments.len(),
            report.total_issues(),
            report.overlap_count
        );

        report
    }

    /// Calculate reading speed (characters per second) for a segment
    pub fn calculate_cps(segment: &TimedSegment) -> f64 {
        let char_count = segment.text().chars().count() as f64;
        let duration = segment.duration();

        if duration > 0.0 {
            char_count / duration
        } else if char_count == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    }
}

impl Default for TimelineValidator {
    fn default() -> Self {
        Self::new()
    }
}
