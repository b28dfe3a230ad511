/*!
 * The generation pipeline.
 *
 * `generate` turns one immutable `GenerationRequest` into a
 * `GenerationResult`: segment the translation, resolve the allocation policy
 * from the timing data, place the sentences on the timeline, check the
 * timeline and render the requested formats. Nothing is kept between calls.
 */

use log::{debug, info};

use crate::allocation::{TimeAllocationPolicy, TimeSlot, TimedSegment};
use crate::app_config::{AllocationMode, Config, OutputConfig};
use crate::errors::GenerationError;
use crate::output::{self, OutputArtifact, OutputFormat};
use crate::segmentation;
use crate::subtitle_processor::TimingTrack;
use crate::validation::{TimelineValidator, TimelineValidatorConfig};
use crate::validation::timecodes::TimelineReport;

/// Everything one generation needs
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Free-form translated text
    pub translation: String,
    /// Parsed timing file, if one was supplied
    pub timing: Option<TimingTrack>,
    /// Total duration for proportional mode, overriding the timing file
    pub total_duration: Option<f64>,
    pub mode: AllocationMode,
    /// Characters per second for fixed-rate mode
    pub reading_rate: f64,
    pub speaker: String,
    pub formats: Vec<OutputFormat>,
    pub timeline: TimelineValidatorConfig,
}

impl GenerationRequest {
    /// Request with default settings for the given mode
    pub fn new(translation: &str, mode: AllocationMode) -> Self {
        Self::from_config(&Config { mode, ..Config::default() }, translation)
    }

    /// Request carrying the configured mode, rate, speaker and formats
    pub fn from_config(config: &Config, translation: &str) -> Self {
        GenerationRequest {
            translation: translation.to_string(),
            timing: None,
            total_duration: None,
            mode: config.mode,
            reading_rate: config.reading_rate,
            speaker: config.speaker.clone(),
            formats: config.output.formats(),
            timeline: config.timeline.validator_config(),
        }
    }

    pub fn with_timing(mut self, timing: TimingTrack) -> Self {
        self.timing = Some(timing);
        self
    }

    pub fn with_timing_srt(self, srt: &str) -> Self {
        self.with_timing(TimingTrack::parse(srt))
    }

    pub fn with_total_duration(mut self, seconds: f64) -> Self {
        self.total_duration = Some(seconds);
        self
    }

    pub fn with_reading_rate(mut self, rate: f64) -> Self {
        self.reading_rate = rate;
        self
    }

    pub fn with_formats(mut self, formats: Vec<OutputFormat>) -> Self {
        self.formats = formats;
        self
    }

    /// Turn the mode and timing data into a concrete allocation policy
    pub fn resolve_policy(&self) -> Result<TimeAllocationPolicy, GenerationError> {
        match self.mode {
            AllocationMode::RoundRobin => {
                let track = self.required_timing()?;
                let ranges = track.time_ranges()?;
                let slots = track
                    .blocks
                    .iter()
                    .zip(ranges)
                    .map(|(block, range)| TimeSlot {
                        label: block.time_range.clone(),
                        range,
                    })
                    .collect();
                Ok(TimeAllocationPolicy::RoundRobin { slots })
            }
            AllocationMode::Proportional => {
                let total_duration = match self.total_duration {
                    Some(seconds) => {
                        debug!("Using explicit total duration of {:.3}s", seconds);
                        seconds
                    }
                    None => self.required_timing()?.total_duration()?,
                };
                Ok(TimeAllocationPolicy::ProportionalScale { total_duration })
            }
            AllocationMode::FixedRate => Ok(TimeAllocationPolicy::FixedRate {
                rate: self.reading_rate,
            }),
        }
    }

    fn required_timing(&self) -> Result<&TimingTrack, GenerationError> {
        self.timing
            .as_ref()
            .ok_or_else(|| GenerationError::MissingTiming(self.mode.to_string()))
    }
}

/// Output of one generation
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub segments: Vec<TimedSegment>,
    pub srt: Option<String>,
    pub csv: Option<String>,
    pub timeline: TimelineReport,
}

impl GenerationResult {
    /// Generated blobs with their file names and mime types, SRT first
    pub fn artifacts(&self, output: &OutputConfig) -> Vec<OutputArtifact> {
        let mut artifacts = Vec::with_capacity(2);
        if let Some(srt) = &self.srt {
            artifacts.push(OutputArtifact::new(
                OutputFormat::Srt,
                output.file_name(OutputFormat::Srt),
                srt.clone(),
            ));
        }
        if let Some(csv) = &self.csv {
            artifacts.push(OutputArtifact::new(
                OutputFormat::Csv,
                output.file_name(OutputFormat::Csv),
                csv.clone(),
            ));
        }
        artifacts
    }
}

/// Run the whole pipeline for one request
pub fn generate(request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
    if request.translation.trim().is_empty() {
        return Err(GenerationError::EmptyInput("translation text is empty".to_string()));
    }

    let policy = request.resolve_policy()?;
    let sentences = segmentation::segment(&request.translation, policy.segmentation());
    if sentences.is_empty() {
        return Err(GenerationError::EmptyInput(
            "translation text produced no sentences".to_string(),
        ));
    }

    let segments = policy.allocate(&sentences, &request.speaker)?;
    info!(
        "{}: {} sentences into {} segments",
        request.mode.display_name(),
        sentences.len(),
        segments.len()
    );

    let timeline = TimelineValidator::with_config(request.timeline.clone()).validate(&segments);
    timeline.log();

    let wants = |format: OutputFormat| request.formats.contains(&format);
    Ok(GenerationResult {
        srt: wants(OutputFormat::Srt).then(|| output::render_srt(&segments)),
        csv: wants(OutputFormat::Csv).then(|| output::render_csv(&segments)),
        segments,
        timeline,
    })
}
