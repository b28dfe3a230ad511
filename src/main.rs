// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{error, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subtime::app_config::{self, AllocationMode, Config};
use subtime::app_controller::{Controller, GenerationJob, RunOutcome};

/// CLI Wrapper for AllocationMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliAllocationMode {
    RoundRobin,
    Proportional,
    FixedRate,
}

impl From<CliAllocationMode> for AllocationMode {
    fn from(cli_mode: CliAllocationMode) -> Self {
        match cli_mode {
            CliAllocationMode::RoundRobin => AllocationMode::RoundRobin,
            CliAllocationMode::Proportional => AllocationMode::Proportional,
            CliAllocationMode::FixedRate => AllocationMode::FixedRate,
        }
    }
}

/// Which artifacts to produce
#[derive(Debug, Clone, ValueEnum)]
enum CliOutputFormat {
    Srt,
    Csv,
    Both,
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate timed SRT and/or CSV output from a translation
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Generate shell completions for subtime
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Translated text file, or '-' to read standard input
    #[arg(value_name = "TRANSLATION")]
    translation_path: PathBuf,

    /// SRT file whose timing is reused
    #[arg(short, long, value_name = "FILE")]
    timing: Option<PathBuf>,

    /// Time allocation mode
    #[arg(short, long, value_enum)]
    mode: Option<CliAllocationMode>,

    /// Reading rate in characters per second (fixed-rate mode, 1.0-30.0)
    #[arg(short, long, value_name = "CPS")]
    rate: Option<f64>,

    /// Total duration in seconds for proportional mode
    #[arg(short, long, value_name = "SECONDS")]
    duration: Option<f64>,

    /// Directory receiving the generated files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Output formats to produce
    #[arg(long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Print the generated output instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subtime - re-time translated subtitles
///
/// Splits a translation into sentences and gives each one a start and end
/// time, taken from an existing SRT file or estimated from a reading speed.
#[derive(Parser, Debug)]
#[command(name = "subtime")]
#[command(version = "1.0.0")]
#[command(about = "Re-attach subtitle timing to a translated text")]
#[command(long_about = "subtime splits a translated text into sentences and assigns each one a time range, producing SRT and CSV output.

EXAMPLES:
    subtime generate -t movie.en.srt movie.fr.txt          # Fill the English timing slots
    subtime generate -m proportional -t movie.en.srt fr.txt # Stretch to the file's total duration
    subtime generate -m proportional -d 95.5 fr.txt         # Stretch to 95.5 seconds
    subtime generate -m fixed-rate -r 12 fr.txt             # 12 characters per second
    cat fr.txt | subtime generate -m fixed-rate --stdout -   # Read stdin, print output
    subtime completions bash > subtime.bash                 # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

MODES:
    round-robin  - sentence i goes to timing slot i mod N (needs --timing)
    proportional - durations by character count, scaled to the total duration
    fixed-rate   - durations by character count at --rate characters per second")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger lets everything through; log::set_max_level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subtime", &mut std::io::stdout());
            Ok(())
        }
        Commands::Generate(args) => run_generate(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load the configuration file, creating a default one when it is missing
fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        return Ok(config);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);

    let config = Config::default();
    let config_json = serde_json::to_string_pretty(&config)
        .context("Failed to serialize default config to JSON")?;

    std::fs::write(config_path, config_json)
        .context(format!("Failed to write default config to file: {}", config_path))?;

    Ok(config)
}

/// Override config values with CLI options if provided
fn apply_overrides(config: &mut Config, options: &GenerateArgs) {
    if let Some(mode) = &options.mode {
        config.mode = mode.clone().into();
    }

    if let Some(rate) = options.rate {
        config.reading_rate = rate;
    }

    if let Some(format) = &options.format {
        let (srt, csv) = match format {
            CliOutputFormat::Srt => (true, false),
            CliOutputFormat::Csv => (false, true),
            CliOutputFormat::Both => (true, true),
        };
        config.output.srt = srt;
        config.output.csv = csv;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = load_config(&options.config_path)?;
    apply_overrides(&mut config, &options);

    // Just update the max level without reinitializing the logger
    log::set_max_level(config.log_level.to_level_filter());

    if options.duration.is_some() && config.mode != AllocationMode::Proportional {
        warn!("--duration only applies to proportional mode and will be ignored");
    }

    // Validates the configuration after loading and overriding
    let controller = Controller::with_config(config)?;

    let job = GenerationJob {
        translation_path: options.translation_path,
        timing_path: options.timing,
        total_duration: options.duration,
        output_dir: options.output_dir,
        to_stdout: options.stdout,
        force_overwrite: options.force_overwrite,
    };

    let mut stdout = std::io::stdout();
    match controller.run(&job, &mut stdout)? {
        RunOutcome::Written(paths) => log::debug!("Wrote {} file(s)", paths.len()),
        RunOutcome::Printed(count) => log::debug!("Printed {} artifact(s)", count),
        RunOutcome::Skipped(_) => {}
    }

    Ok(())
}
