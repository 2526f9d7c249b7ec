//! Talent Log Reader CLI Application
//!
//! This is the command-line interface for the talent log parser.
//! It uses the talent-log-parser library and adds:
//! - Loading logs from files or stdin (several files in parallel)
//! - TOML configuration
//! - Report generation (text table, JSON, NEW-format log)

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use talent_log_parser::{BraceCapture, LogParser, UserTalentRecord};

mod config;
mod report;

use config::{AppConfig, OutputFormat};

/// Talent Log Reader - Parse and tabulate talent logs
#[derive(Parser, Debug)]
#[command(name = "talent-log-cli")]
#[command(about = "Parse talent logs (multi-user and legacy formats)", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a log file (can be repeated, "-" reads stdin)
    #[arg(short, long, value_name = "FILE")]
    log: Vec<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// User name for legacy logs without a name marker
    #[arg(long, value_name = "NAME")]
    fallback_name: Option<String>,

    /// Capture the first balanced JSON object instead of first '{' to last '}'
    #[arg(long)]
    balanced_braces: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Talent Log Reader CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using parser library v{}", talent_log_parser::VERSION);

    let config = resolve_config(&args)?;

    if config.input.files.is_empty() {
        // No input - show help
        println!("Talent Log Reader - No input specified");
        println!("\nQuick Start:");
        println!("  talent-log-cli --log talent.log");
        println!("  talent-log-cli --log a.log --log b.log --format json");
        println!("  cat talent.log | talent-log-cli --log -");
        println!("\nWith a configuration file:");
        println!("  talent-log-cli --config config.toml");
        println!("\nUse --help for more options");
        return Ok(());
    }

    let parser = LogParser::with_config(config.parser.clone());
    let records = parse_inputs(&parser, &config.input.files)?;
    log::info!("Parsed {} record(s) from {} input(s)", records.len(), config.input.files.len());

    let rendered = report::render(&records, &config.attributes, config.output.format)?;

    match &config.output.path {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            log::info!("Report written to {:?}", path);
        }
        None => {
            io::stdout().write_all(rendered.as_bytes())?;
        }
    }

    Ok(())
}

/// Merge the optional config file with command-line overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if !args.log.is_empty() {
        config.input.files = args.log.clone();
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(path) = &args.output {
        config.output.path = Some(path.clone());
    }
    if let Some(name) = &args.fallback_name {
        config.parser.fallback_user_name = name.clone();
    }
    if args.balanced_braces {
        config.parser.brace_capture = BraceCapture::Balanced;
    }

    log::debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Parse every input in parallel, keeping input order in the result
///
/// stdin ("-") may appear at most once.
fn parse_inputs(parser: &LogParser, inputs: &[PathBuf]) -> Result<Vec<UserTalentRecord>> {
    if inputs.iter().filter(|path| is_stdin(path)).count() > 1 {
        anyhow::bail!("stdin (\"-\") can only be given once as an input");
    }

    let per_input: Vec<Vec<UserTalentRecord>> = inputs
        .par_iter()
        .map(|path| -> Result<Vec<UserTalentRecord>> {
            let text = read_input(path)?;
            let records = parser.parse_str(&text);
            log::debug!("{:?}: {} record(s)", path, records.len());
            Ok(records)
        })
        .collect::<Result<_>>()?;

    Ok(per_input.into_iter().flatten().collect())
}

/// Read a log file, or stdin for "-"
fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read log from stdin")?;
        return Ok(text);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read log file: {:?}", path))
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
