use anyhow::{Result, Context, anyhow};
use log::{warn, info, debug};
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::app_config::{AllocationMode, Config};
use crate::file_utils::{FileManager, FileType};
use crate::generation::{self, GenerationRequest};
use crate::output::OutputArtifact;
use crate::subtitle_processor::TimingTrack;

// @module: Application controller wiring files to the generation pipeline

/// Inputs and destinations for one generation run
#[derive(Debug, Clone)]
pub struct GenerationJob {
    /// Translation text file, or `-` for standard input
    pub translation_path: PathBuf,
    /// SRT timing file
    pub timing_path: Option<PathBuf>,
    /// Total duration for proportional mode without a timing file
    pub total_duration: Option<f64>,
    /// Directory receiving the artifacts
    pub output_dir: PathBuf,
    /// Print artifacts instead of writing files
    pub to_stdout: bool,
    pub force_overwrite: bool,
}

impl GenerationJob {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(translation_path: P, output_dir: Q) -> Self {
        GenerationJob {
            translation_path: translation_path.as_ref().to_path_buf(),
            timing_path: None,
            total_duration: None,
            output_dir: output_dir.as_ref().to_path_buf(),
            to_stdout: false,
            force_overwrite: false,
        }
    }
}

/// What a run ended up doing
#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    /// Files written, in artifact order
    Written(Vec<PathBuf>),
    /// Artifacts printed to the given writer
    Printed(usize),
    /// Nothing produced; the reason has been logged as a warning
    Skipped(String),
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reason the job cannot run, when a required input is absent
    fn missing_input(&self, job: &GenerationJob, translation: &str) -> Option<String> {
        if translation.trim().is_empty() {
            return Some("Please provide the translated text".to_string());
        }

        let mode = self.config.mode;
        if job.timing_path.is_some() || !mode.requires_timing(job.total_duration.is_some()) {
            return None;
        }

        match mode {
            AllocationMode::Proportional => Some(
                "Please provide an SRT timing file or a total duration for proportional mode"
                    .to_string(),
            ),
            _ => Some(format!("Please provide an SRT timing file for {} mode", mode)),
        }
    }

    fn load_timing(path: &Path) -> Result<TimingTrack> {
        if !FileManager::file_exists(path) {
            return Err(anyhow!("Timing file does not exist: {:?}", path));
        }

        if FileManager::detect_file_type(path)? != FileType::Subtitle {
            warn!("Timing file {:?} does not look like SRT, parsing anyway", path);
        }

        let content = FileManager::read_to_string(path)?;
        Ok(TimingTrack::parse(&content))
    }

    /// Build the pipeline request for a job with already loaded text
    pub fn build_request(&self, job: &GenerationJob, translation: &str, timing: Option<TimingTrack>) -> GenerationRequest {
        let mut request = GenerationRequest::from_config(&self.config, translation);
        request.timing = timing;
        request.total_duration = job.total_duration;
        request
    }

    /// Run the workflow: read inputs, generate, then write or print artifacts
    pub fn run<W: Write>(&self, job: &GenerationJob, out: &mut W) -> Result<RunOutcome> {
        let start_time = std::time::Instant::now();

        let translation = FileManager::read_input(&job.translation_path)?;
        if let Some(reason) = self.missing_input(job, &translation) {
            warn!("{}", reason);
            return Ok(RunOutcome::Skipped(reason));
        }

        let timing = match &job.timing_path {
            Some(path) => Some(Self::load_timing(path)?),
            None => None,
        };

        let request = self.build_request(job, &translation, timing);
        debug!(
            "Generating with mode {} (rate {} cps, formats {:?})",
            request.mode, request.reading_rate, request.formats
        );

        let result = generation::generate(&request).context("Generation failed")?;
        let artifacts = result.artifacts(&self.config.output);

        let outcome = if job.to_stdout {
            Self::print_artifacts(&artifacts, out)?
        } else {
            Self::write_artifacts(&artifacts, &job.output_dir, job.force_overwrite)?
        };

        debug!("Run finished in {:.2?}", start_time.elapsed());
        Ok(outcome)
    }

    fn print_artifacts<W: Write>(artifacts: &[OutputArtifact], out: &mut W) -> Result<RunOutcome> {
        for artifact in artifacts {
            out.write_all(artifact.content.as_bytes())
                .with_context(|| format!("Failed to print {}", artifact.file_name))?;
        }
        out.flush()?;
        Ok(RunOutcome::Printed(artifacts.len()))
    }

    /// Write every artifact, or none of them when one would overwrite a file
    fn write_artifacts(artifacts: &[OutputArtifact], output_dir: &Path, force_overwrite: bool) -> Result<RunOutcome> {
        let paths: Vec<PathBuf> = artifacts
            .iter()
            .map(|artifact| FileManager::generate_output_path(output_dir, &artifact.file_name))
            .collect();

        if !force_overwrite {
            if let Some(existing) = paths.iter().find(|path| path.exists()) {
                let reason = format!(
                    "Output file already exists: {:?}. Use -f to force overwrite.",
                    existing
                );
                warn!("{}", reason);
                return Ok(RunOutcome::Skipped(reason));
            }
        }

        FileManager::ensure_dir(output_dir)?;
        for (artifact, path) in artifacts.iter().zip(&paths) {
            FileManager::write_to_file(path, &artifact.content)?;
            info!("Success: {:?} ({})", path, artifact.mime_type);
        }

        Ok(RunOutcome::Written(paths))
    }
}
