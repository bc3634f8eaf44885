// Value normalizers shared by the MRZ decoder and the heuristic extractors

use lazy_static::lazy_static;
use regex::Regex;

/// Three-letter month abbreviations, January first
const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Two-digit years up to and including this value belong to the 2000s
const CENTURY_PIVOT: u32 = 30;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref DATE_SEPARATORS: Regex = Regex::new(r"[./\s]").unwrap();
    static ref REPEATED_DASHES: Regex = Regex::new(r"-{2,}").unwrap();
}

/// Lower-case everything, then capitalize the first letter of each word.
/// Words start at the beginning of the string and after whitespace, `-` or `'`.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_boundary = true;

    for c in value.to_lowercase().chars() {
        if at_boundary {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_boundary = c.is_whitespace() || c == '-' || c == '\'';
    }

    result
}

fn expand_year(yy: u32) -> u32 {
    if yy <= CENTURY_PIVOT {
        2000 + yy
    } else {
        1900 + yy
    }
}

/// Convert an MRZ `YYMMDD` date to `YYYY-MM-DD`.
///
/// Returns an empty string for anything that is not exactly six digits.
pub fn mrz_date_to_iso(yymmdd: &str) -> String {
    if yymmdd.len() != 6 || !yymmdd.chars().all(|c| c.is_ascii_digit()) {
        return String::new();
    }

    let yy = yymmdd[0..2].parse::<u32>().unwrap_or(0);
    format!("{}-{}-{}", expand_year(yy), &yymmdd[2..4], &yymmdd[4..6])
}

fn month_number(token: &str) -> Option<usize> {
    let prefix: String = token.chars().take(3).collect::<String>().to_uppercase();
    MONTHS.iter().position(|month| *month == prefix).map(|i| i + 1)
}

fn pad2(part: &str) -> String {
    if part.chars().count() < 2 {
        format!("{:0>2}", part)
    } else {
        part.to_string()
    }
}

/// Best-effort conversion of a printed date to `YYYY-MM-DD`.
///
/// Handles `YYYY-MM-DD`, `DD-MM-YYYY` and `DD-MM-YY` layouts separated by dots,
/// slashes, dashes or whitespace, with either a numeric or an abbreviated month.
/// Input that fits none of them is returned untouched.
pub fn normalize_date_string(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }

    let dashed = DATE_SEPARATORS.replace_all(date, "-");
    let cleaned = REPEATED_DASHES.replace_all(&dashed, "-").to_string();

    if ISO_DATE.is_match(&cleaned) {
        return cleaned;
    }

    let parts: Vec<&str> = cleaned.split('-').collect();
    if parts.len() != 3 {
        return date.to_string();
    }

    let (first, third) = (parts[0], parts[2]);
    let month = match month_number(parts[1]) {
        Some(n) => format!("{:02}", n),
        None => parts[1].to_string(),
    };

    if first.chars().count() == 4 {
        return format!("{}-{}-{}", first, pad2(&month), pad2(third));
    }
    if third.chars().count() == 4 {
        return format!("{}-{}-{}", third, pad2(&month), pad2(first));
    }
    if third.len() == 2 && third.chars().all(|c| c.is_ascii_digit()) {
        let yy = third.parse::<u32>().unwrap_or(0);
        return format!("{}-{}-{}", expand_year(yy), pad2(&month), pad2(first));
    }

    date.to_string()
}

/// Map a printed or MRZ sex marker to `"Male"` / `"Female"`.
pub fn normalize_gender(token: &str) -> String {
    match token.trim().to_uppercase().as_str() {
        "M" | "MALE" | "LELAKI" => "Male".to_string(),
        "F" | "FEMALE" | "PEREMPUAN" => "Female".to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("WEI LIN TAN"), "Wei Lin Tan");
        assert_eq!(title_case("o'brien-smith"), "O'Brien-Smith");
        assert_eq!(title_case("kuala  lumpur"), "Kuala  Lumpur");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_mrz_date_pivot() {
        assert_eq!(mrz_date_to_iso("740812"), "1974-08-12");
        assert_eq!(mrz_date_to_iso("250101"), "2025-01-01");
        assert_eq!(mrz_date_to_iso("300615"), "2030-06-15");
        assert_eq!(mrz_date_to_iso("310615"), "1931-06-15");
    }

    #[test]
    fn test_mrz_date_malformed() {
        assert_eq!(mrz_date_to_iso("74081"), "");
        assert_eq!(mrz_date_to_iso("7408122"), "");
        assert_eq!(mrz_date_to_iso("<<<<<<"), "");
        assert_eq!(mrz_date_to_iso(""), "");
    }

    #[test]
    fn test_normalize_textual_month() {
        assert_eq!(normalize_date_string("15 AUG 1995"), "1995-08-15");
        assert_eq!(normalize_date_string("3 September 2001"), "2001-09-03");
        assert_eq!(normalize_date_string("01 jan 24"), "2024-01-01");
    }

    #[test]
    fn test_normalize_numeric_layouts() {
        assert_eq!(normalize_date_string("15/08/95"), "1995-08-15");
        assert_eq!(normalize_date_string("15.08.1995"), "1995-08-15");
        assert_eq!(normalize_date_string("1995 08 15"), "1995-08-15");
        assert_eq!(normalize_date_string("1995-08-15"), "1995-08-15");
        assert_eq!(normalize_date_string("1995.8.5"), "1995-08-05");
    }

    #[test]
    fn test_normalize_unparseable_is_returned_unchanged() {
        assert_eq!(normalize_date_string("AUGUST 1995"), "AUGUST 1995");
        assert_eq!(normalize_date_string("15-08-995"), "15-08-995");
        assert_eq!(normalize_date_string(""), "");
    }

    #[test]
    fn test_normalize_gender() {
        assert_eq!(normalize_gender("LELAKI"), "Male");
        assert_eq!(normalize_gender("PEREMPUAN"), "Female");
        assert_eq!(normalize_gender("m"), "Male");
        assert_eq!(normalize_gender("F"), "Female");
        assert_eq!(normalize_gender("<"), "");
        assert_eq!(normalize_gender(""), "");
    }
}
