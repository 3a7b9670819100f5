// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::Config;
use crate::app_controller::Controller;

mod alignment;
mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod providers;
mod subtitle_processor;
mod translation;

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
    /// Translate a subtitle file block by block using the Gemini API
    Translate(TranslateArgs),

    /// Find where two subtitle files' timecodes start to drift apart
    Check(CheckArgs),

    /// Repair a damaged subtitle file by strict pattern extraction
    Repair(RepairArgs),

    /// Convert a subtitle file to the strict web-player format
    Finalize(FinalizeArgs),

    /// Generate shell completions for srtsmith
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input subtitle file
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,

    /// Output file path (default: <input>_<language>_WebReady.srt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Title of the work, used as translation context
    #[arg(long)]
    title: Option<String>,

    /// Target language, free text (e.g. 'Japanese', 'French')
    #[arg(short, long)]
    target_language: Option<String>,

    /// API key for the translation endpoint
    #[arg(short, long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Original subtitle file
    #[arg(value_name = "ORIGINAL_FILE")]
    original: PathBuf,

    /// Translated subtitle file
    #[arg(value_name = "TRANSLATED_FILE")]
    translated: PathBuf,
}

#[derive(Parser, Debug)]
struct RepairArgs {
    /// Subtitle file to repair
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,

    /// Output file path (default: <input>_Fixed.srt)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FinalizeArgs {
    /// Subtitle file to convert
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,

    /// Output file path (default: <input>_WebReady.srt)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// srtsmith - SRT subtitle toolkit with AI translation
///
/// Small tools for manipulating SRT subtitle files: AI translation,
/// timecode drift detection, repair and web-player conversion.
#[derive(Parser, Debug)]
#[command(name = "srtsmith")]
#[command(version = "1.0.0")]
#[command(about = "SRT subtitle toolkit with AI translation")]
#[command(long_about = "srtsmith splits SRT files into timed blocks, translates them with the \
Gemini API, and repairs the formatting problems that break web-based players.

EXAMPLES:
    srtsmith translate movie.srt -t French --title \"The Great Escaper\"
    srtsmith check movie.srt movie_French_WebReady.srt
    srtsmith repair broken.srt
    srtsmith finalize movie.srt
    srtsmith completions bash > srtsmith.bash

CONFIGURATION:
    Configuration is read from conf.json by default; every value has a
    default, so the file is optional. The API key comes from --api-key or
    the GEMINI_API_KEY environment variable and is never persisted.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse first so --help works without touching the logger or config
    let cli = CommandLineOptions::parse();

    let mut config = Config::from_file_or_default(&cli.config_path)?;
    if let Some(cmd_log_level) = &cli.log_level {
        config.log_level = cmd_log_level.clone().into();
    }
    CustomLogger::init(config.log_level.to_level_filter())?;

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srtsmith", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => {
            if let Some(title) = args.title {
                config.work_title = title;
            }
            if let Some(language) = args.target_language {
                config.target_language = language;
            }
            let controller = Controller::with_config(config);
            controller
                .run_translate(&args.input, args.output, &args.api_key)
                .await?;
            Ok(())
        }
        Commands::Check(args) => {
            let controller = Controller::with_config(config);
            controller.run_check(&args.original, &args.translated)?;
            Ok(())
        }
        Commands::Repair(args) => {
            let controller = Controller::with_config(config);
            controller.run_repair(&args.input, args.output)?;
            Ok(())
        }
        Commands::Finalize(args) => {
            let controller = Controller::with_config(config);
            controller.run_finalize(&args.input, args.output)?;
            Ok(())
        }
    }
}
