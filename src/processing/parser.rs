use log::debug;

use crate::models::ParsedPassport;
use crate::processing::extractors::HeuristicExtractor;
use crate::processing::mrz::{find_mrz_lines, MrzDecoder};

/// Turns recognized passport text into a [`ParsedPassport`].
///
/// The MRZ is tried first and trusted whenever it yields a name; otherwise the
/// label heuristics run over the whole text. Parsing never fails and keeps no
/// state between calls.
pub struct PassportParser;

impl PassportParser {
    pub fn parse(text: &str) -> ParsedPassport {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let mrz_lines = find_mrz_lines(&lines);
        debug!("Found {} MRZ candidate line(s) in {} lines", mrz_lines.len(), lines.len());

        if mrz_lines.len() >= 2 {
            let mrz = MrzDecoder::decode_lines(&mrz_lines);
            if !mrz.full_name.is_empty() {
                return mrz;
            }
            debug!("MRZ yielded no name, falling back to label matching");
        }

        HeuristicExtractor::extract(&text.to_uppercase())
    }
}

/// Shorthand for [`PassportParser::parse`].
pub fn parse_passport_text(text: &str) -> ParsedPassport {
    PassportParser::parse(text)
}
