use log::{debug, warn};

use crate::models::{country_code_to_nationality, ParsedPassport};
use crate::processing::normalize::{mrz_date_to_iso, normalize_gender, title_case};
use crate::utils::{PassportError, Result};

/// Shortest OCR line still accepted as a TD3 MRZ line (nominally 44 characters)
pub const MIN_MRZ_LINE_LEN: usize = 42;

/// Line 2 has to reach past the expiry date to be decoded
pub const MIN_MRZ_LINE2_LEN: usize = 28;

/// Remove every whitespace character, including the ones OCR inserts between filler runs.
pub fn strip_whitespace(line: &str) -> String {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_mrz_charset(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '<')
}

/// Collect the lines that look like TD3 MRZ lines, whitespace stripped, in document order.
pub fn find_mrz_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| line.chars().count() >= MIN_MRZ_LINE_LEN)
        .map(strip_whitespace)
        .filter(|line| is_mrz_charset(line))
        .collect()
}

/// Substring clamped to the line, so a truncated OCR line yields a shorter (or empty) field.
fn slice(line: &str, start: usize, end: usize) -> Result<&str> {
    let end = end.min(line.len());
    let start = start.min(end);
    line.get(start..end).ok_or_else(|| {
        PassportError::MrzParsingError(format!(
            "range {}..{} splits a character in {:?}",
            start, end, line
        ))
    })
}

/// Decoder for the two-line passport MRZ defined in ICAO Doc 9303 part 4.
pub struct MrzDecoder;

impl MrzDecoder {
    /// Decode the bottom two candidate lines. Fewer than two lines yield an empty record.
    pub fn decode_lines(mrz_lines: &[String]) -> ParsedPassport {
        match mrz_lines {
            [.., line1, line2] => Self::decode(line1, line2),
            _ => ParsedPassport::default(),
        }
    }

    /// Decode a name line and a number line.
    ///
    /// Never fails: a malformed line stops decoding and the fields read so far are kept.
    pub fn decode(line1: &str, line2: &str) -> ParsedPassport {
        let line1 = strip_whitespace(line1);
        let line2 = strip_whitespace(line2);
        debug!("Decoding MRZ lines {:?} / {:?}", line1, line2);

        let mut result = ParsedPassport::default();
        if let Err(err) = Self::decode_into(&mut result, &line1, &line2) {
            warn!("MRZ decoding stopped early: {}", err);
        }
        result
    }

    fn decode_into(result: &mut ParsedPassport, line1: &str, line2: &str) -> Result<()> {
        // Line 1: P<CCC<SURNAME<<GIVEN<NAMES<<<...
        if line1.starts_with('P') {
            let country_code = slice(line1, 2, 5)?.replace('<', "");
            result.place_of_issue = country_code.clone();

            let name_section = slice(line1, 5, line1.len())?;
            let name_parts: Vec<&str> = name_section
                .split("<<")
                .filter(|part| !part.is_empty())
                .collect();
            let surname = Self::clean_name(name_parts.first().copied().unwrap_or(""));
            let given_names = Self::clean_name(name_parts.get(1).copied().unwrap_or(""));

            if !surname.is_empty() || !given_names.is_empty() {
                result.full_name = title_case(format!("{} {}", given_names, surname).trim());
            }

            // The issuing state stands in for nationality on line 1
            result.nationality = country_code_to_nationality(&country_code);
        }

        // Line 2: number, check, nationality, birth date, check, sex, expiry, check, ...
        if line2.len() >= MIN_MRZ_LINE2_LEN {
            result.passport_number = slice(line2, 0, 9)?.replace('<', "");

            let nationality_code = slice(line2, 10, 13)?.replace('<', "");
            if !nationality_code.is_empty() && result.nationality.is_empty() {
                result.nationality = country_code_to_nationality(&nationality_code);
            }

            result.date_of_birth = mrz_date_to_iso(slice(line2, 13, 19)?);
            result.gender = match slice(line2, 20, 21)? {
                marker @ ("M" | "F") => normalize_gender(marker),
                _ => String::new(),
            };
            result.passport_expiry = mrz_date_to_iso(slice(line2, 21, 27)?);
        }

        Ok(())
    }

    fn clean_name(part: &str) -> String {
        part.replace('<', " ").trim().to_string()
    }
}
