// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use bijoy_docx::app_config::{self, Config};
use bijoy_docx::app_controller::FileOutcome;
use bijoy_docx::{ConversionDirection, Controller};

/// CLI Wrapper for ConversionDirection to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliDirection {
    /// SutonnyMJ/Bijoy to Unicode
    #[value(aliases = ["l2u", "bijoy-to-unicode"])]
    LegacyToUnicode,
    /// Unicode to SutonnyMJ/Bijoy
    #[value(aliases = ["u2l", "unicode-to-bijoy"])]
    UnicodeToLegacy,
}

impl From<CliDirection> for ConversionDirection {
    fn from(cli_direction: CliDirection) -> Self {
        match cli_direction {
            CliDirection::LegacyToUnicode => ConversionDirection::LegacyToUnicode,
            CliDirection::UnicodeToLegacy => ConversionDirection::UnicodeToLegacy,
        }
    }
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

/// Options shared by every subcommand that loads the configuration
#[derive(Args, Debug)]
struct CommonArgs {
    /// Conversion direction (overrides the config file)
    #[arg(short, long, value_enum)]
    direction: Option<CliDirection>,

    /// Convert runs that look like legacy text even without a legacy font
    #[arg(long)]
    force_convert: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input .docx file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Directory for converted files (defaults to next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a .docx file or every .docx file in a directory
    Convert(ConvertArgs),

    /// Convert a string, or standard input when no text is given
    Text {
        /// Text to convert
        text: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Print the footnotes of a .docx file as JSON
    Footnotes {
        /// Input .docx file
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Generate shell completions for bijoy-docx
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// bijoy-docx - Bijoy/SutonnyMJ ↔ Unicode Bengali converter for Word documents
#[derive(Parser, Debug)]
#[command(name = "bijoy-docx")]
#[command(version)]
#[command(about = "Convert Bengali text in .docx files between Bijoy/SutonnyMJ and Unicode")]
#[command(long_about = "bijoy-docx rewrites the Bengali text of Word documents between the legacy
SutonnyMJ/Bijoy glyph encoding and Unicode, keeping layout and formatting.

EXAMPLES:
    bijoy-docx convert report.docx                  # Bijoy to Unicode using default config
    bijoy-docx convert -d u2l report.docx           # Unicode to Bijoy
    bijoy-docx convert -f -o out/ letters/          # Whole directory, overwrite outputs
    bijoy-docx convert --force-convert report.docx  # Also convert legacy text in unknown fonts
    bijoy-docx text 'Avwg evsjvq Mvb MvB|'          # Convert a string
    echo 'আমি' | bijoy-docx text -d u2l             # Convert standard input
    bijoy-docx footnotes report.docx                # List footnotes
    bijoy-docx completions bash > bijoy-docx.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
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
        // Records are filtered by `log::max_level`, which is raised or lowered later
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }

    // @returns: Short tag for log level
    fn get_tag_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_tag_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "bijoy-docx", &mut std::io::stdout());
            Ok(())
        }
        Commands::Convert(args) => run_convert(args).await,
        Commands::Text { text, common } => run_text(text, &common),
        Commands::Footnotes { input_path } => run_footnotes(&input_path),
    }
}

/// Load the config file and apply command line overrides
fn load_config(common: &CommonArgs) -> Result<Config> {
    // A command line level applies before the config is read
    if let Some(cmd_log_level) = &common.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&common.config_path)?;

    if let Some(direction) = &common.direction {
        config.direction = direction.clone().into();
    }
    if common.force_convert {
        config.force_convert = true;
    }
    if let Some(log_level) = &common.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

async fn run_convert(options: ConvertArgs) -> Result<()> {
    let config = load_config(&options.common)?;
    info!("{}", config.direction.display_name());
    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        let output_dir = options.output_dir.clone().unwrap_or_else(|| {
            options
                .input_path
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });
        let outcome = controller
            .run(options.input_path.clone(), output_dir, options.force_overwrite)
            .await?;
        if let FileOutcome::Converted { totals, failed_parts, .. } = outcome {
            info!(
                "{} runs converted, {} split, {} skipped",
                totals.runs_converted, totals.runs_split, totals.runs_skipped
            );
            if failed_parts > 0 {
                warn!("{} part(s) could not be converted and were left unchanged", failed_parts);
            }
        }
    } else if options.input_path.is_dir() {
        let summary = controller
            .run_folder(options.input_path.clone(), options.output_dir.clone(), options.force_overwrite)
            .await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed to convert", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

fn run_text(text: Option<String>, common: &CommonArgs) -> Result<()> {
    let config = load_config(common)?;
    let controller = Controller::with_config(config)?;

    let input = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read standard input")?;
            buffer
        }
    };

    let mut stdout = std::io::stdout();
    write!(stdout, "{}", controller.convert_text(&input))?;
    if !input.ends_with('\n') {
        writeln!(stdout)?;
    }
    Ok(())
}

fn run_footnotes(input_path: &Path) -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let footnotes = controller.footnotes(input_path)?;
    if footnotes.is_empty() {
        warn!("No footnotes found in {:?}", input_path);
    }
    let json = serde_json::to_string_pretty(&footnotes).context("Failed to serialize footnotes")?;
    println!("{}", json);
    Ok(())
}
