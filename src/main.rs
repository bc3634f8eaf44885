use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{debug, error};
use serde::Serialize;

use passport_intake::{
    models::{ValidationIssueType, ValidationResult},
    processing::{default_recognizer, ocr::DEFAULT_MAX_IMAGE_BYTES},
    PassportError, PassportParser, PassportScanner, PassportValidator,
};

mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "passport-intake")]
#[command(about = "Extract and check passport fields from OCR text or images")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Wrap `parse` output in the `{success, raw_text, parsed}` envelope
    #[arg(long, global = true)]
    pub raw: bool,

    /// Print `check` results as a readable report instead of JSON
    #[arg(long, global = true)]
    pub report: bool,

    /// Reference date (YYYY-MM-DD) for expiry checks, defaults to today
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Tesseract language
    #[arg(long, env = "TESSERACT_LANG", default_value = "eng", global = true)]
    pub lang: String,

    /// Path to tessdata directory
    #[arg(long, env = "TESSDATA_PREFIX", global = true)]
    pub tessdata_path: Option<String>,

    /// Largest accepted decoded image, in bytes
    #[arg(long, env = "PASSPORT_MAX_IMAGE_BYTES", default_value_t = DEFAULT_MAX_IMAGE_BYTES, global = true)]
    pub max_image_bytes: usize,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse recognized passport text
    Parse {
        /// Text file, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Recognize and parse a base64-encoded passport image
    Scan {
        /// File holding the base64 payload, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Parse recognized text and run format, MRZ and expiry checks
    Check {
        /// Text file, stdin when omitted
        file: Option<PathBuf>,
    },
}

fn read_input(file: Option<&Path>) -> Result<String, PassportError> {
    let input = match file {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };
    debug!("Read {} bytes of input", input.len());
    Ok(input)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), PassportError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn status(passed: bool) -> &'static str {
    if passed {
        "PASSED"
    } else {
        "FAILED"
    }
}

fn print_report(result: &ValidationResult) {
    let parsed = &result.parsed;

    println!("\n===============================================");
    println!("         PASSPORT INTAKE CHECK REPORT");
    println!("===============================================\n");

    println!("PASSPORT INFORMATION:");
    println!("  Name: {}", parsed.full_name);
    println!("  Passport Number: {}", parsed.passport_number);
    println!("  Nationality: {}", parsed.nationality);
    println!("  Date of Birth: {}", parsed.date_of_birth);
    println!("  Gender: {}", parsed.gender);
    println!("  Date of Expiry: {}", parsed.passport_expiry);
    println!("  Place of Issue: {}", parsed.place_of_issue);

    println!("\nCHECKS:");
    println!("  1. Format: {}", status(result.format_validation.is_valid));
    match &result.mrz_validation {
        Some(mrz) => println!("  2. MRZ check digits: {}", status(mrz.is_valid)),
        None => println!("  2. MRZ check digits: SKIPPED (no MRZ)"),
    }
    println!("  3. Expiry: {}", status(result.expiry_validation.is_valid));
    if let Some(days) = result.expiry_validation.days_left {
        println!("     {} day(s) left", days);
    }
    if result.expiry_validation.reminder_due {
        println!("     Renewal reminder due");
    }

    if !result.issues.is_empty() {
        println!("\nISSUES FOUND:");
        for issue in &result.issues {
            let kind = match issue.issue_type {
                ValidationIssueType::Format => "FORMAT",
                ValidationIssueType::Mrz => "MRZ",
                ValidationIssueType::Expiry => "EXPIRY",
            };
            println!("  - [{}] {}", kind, issue.message);
        }
    }

    println!(
        "\nResult: {}",
        if result.is_valid { "VALID" } else { "INVALID" }
    );
}

fn run(command: Command, config: &Config) -> Result<(), PassportError> {
    match command {
        Command::Parse { file } => {
            let text = read_input(file.as_deref())?;
            if config.raw {
                print_json(&PassportScanner::scan_text(&text), config.pretty)
            } else {
                print_json(&PassportParser::parse(&text), config.pretty)
            }
        }
        Command::Scan { file } => {
            let payload = read_input(file.as_deref())?;
            let recognizer = default_recognizer(&config.language, config.tessdata_path.as_deref())?;
            let scanner = PassportScanner::new(recognizer).with_max_image_bytes(config.max_image_bytes);
            print_json(&scanner.scan(&payload)?, config.pretty)
        }
        Command::Check { file } => {
            let text = read_input(file.as_deref())?;
            let result = PassportValidator::validate(&text, config.today);
            if config.report {
                print_report(&result);
                Ok(())
            } else {
                print_json(&result, config.pretty)
            }
        }
    }
}

fn main() {
    let args = Args::parse();
    let command = args.command.clone();
    let config = Config::from(args);

    let level = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    debug!("{:?}", config);

    if let Err(err) = run(command, &config) {
        error!("{:?}", err);
        eprintln!("Error ({}): {}", err.status_code(), err);
        std::process::exit(1);
    }
}
