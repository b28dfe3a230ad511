/*!
 * Validation of generated timelines.
 *
 * The checks here never change or reject output; they report issues so the
 * caller can log them:
 * - Time ranges that end before they start
 * - Segments overlapping their predecessor
 * - Reading speed above a configured limit
 * - Segments that received no text
 *
 * # Architecture
 *
 * - `timecodes`: Per-segment and whole-timeline checks
 */

pub mod timecodes;

// Re-export main types
pub use timecodes::{TimelineValidator, TimelineValidatorConfig, TimelineIssue};
