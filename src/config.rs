use chrono::{Local, NaiveDate};

use crate::Args;

/// Settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct Config {
    pub pretty: bool,
    pub raw: bool,
    pub report: bool,
    /// Reference date for expiry checks
    pub today: NaiveDate,
    pub language: String,
    pub tessdata_path: Option<String>,
    pub max_image_bytes: usize,
    pub verbose: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            pretty: args.pretty,
            raw: args.raw,
            report: args.report,
            today: args.today.unwrap_or_else(|| Local::now().date_naive()),
            language: args.lang,
            tessdata_path: args.tessdata_path,
            max_image_bytes: args.max_image_bytes,
            verbose: args.verbose,
        }
    }
}
