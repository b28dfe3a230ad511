/*!
 * Error types for the subtime application.
 *
 * This module contains custom error types for the parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while reading SRT timing data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A timestamp that is not `HH:MM:SS,mmm`
    #[error("Invalid timestamp '{0}': expected HH:MM:SS,mmm")]
    InvalidTimestamp(String),

    /// A time range line without exactly one ` --> ` separator
    #[error("Invalid time range '{0}': expected 'START --> END'")]
    InvalidTimeRange(String),

    /// A time range whose end lies before its start
    #[error("Time range '{0}' ends before it starts")]
    ReversedTimeRange(String),

    /// A block that carries text but no time range
    #[error("Timing block {0} has no time range")]
    MissingTimeRange(usize),

    /// Nothing usable in the timing file
    #[error("No valid timing blocks were found in the SRT content")]
    NoBlocks,
}

/// Errors that can occur while generating timed output
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The timing input could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] SubtitleError),

    /// The translation is blank or yields no sentences
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Proportional scaling over sentences with no characters
    #[error("Cannot scale durations: the ideal total duration is zero")]
    DivideByZero,

    /// The selected mode needs timing data that was not supplied
    #[error("Mode '{0}' requires a timing file")]
    MissingTiming(String),

    /// Reading rate or slot count outside its usable range
    #[error("Invalid allocation parameter: {0}")]
    InvalidParameter(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the generation pipeline
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<SubtitleError> for AppError {
    fn from(error: SubtitleError) -> Self {
        Self::Generation(GenerationError::Parse(error))
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
