// Label-driven field extraction for documents without a readable MRZ
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::models::{ParsedPassport, PassportField};
use crate::processing::normalize::{normalize_date_string, normalize_gender, title_case};

/// How a rule pulls a raw value out of the upper-cased text.
pub enum Matcher {
    /// The first pattern that matches wins; capture group 1 is the value.
    FirstOf(Vec<Regex>),
    /// `"<given> <surname>"` from two labels, or a single name label when either is missing.
    FullName {
        surname: Regex,
        given: Regex,
        fallback: Regex,
    },
}

impl Matcher {
    pub fn capture(&self, text: &str) -> Option<String> {
        match self {
            Matcher::FirstOf(patterns) => patterns.iter().find_map(|pattern| first_group(pattern, text)),
            Matcher::FullName {
                surname,
                given,
                fallback,
            } => match (first_group(surname, text), first_group(given, text)) {
                (Some(surname), Some(given)) => Some(format!("{} {}", given, surname)),
                _ => first_group(fallback, text),
            },
        }
    }
}

fn first_group(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|matched| matched.as_str().trim().to_string())
}

/// One heuristic: which field it fills, how it matches and how the raw capture is cleaned.
pub struct FieldRule {
    pub field: PassportField,
    pub matcher: Matcher,
    pub post: fn(&str) -> String,
}

impl FieldRule {
    /// Store the cleaned value in `parsed` when the rule matches. Returns whether it did.
    pub fn apply(&self, text: &str, parsed: &mut ParsedPassport) -> bool {
        match self.matcher.capture(text) {
            Some(raw) => {
                let value = (self.post)(&raw);
                debug!("Matched {} = {:?} (raw {:?})", self.field.key(), value, raw);
                parsed.set(self.field, value);
                true
            }
            None => false,
        }
    }
}

fn keep(value: &str) -> String {
    value.trim().to_string()
}

fn clean_name(value: &str) -> String {
    let without_digits: String = value.chars().filter(|c| !c.is_ascii_digit()).collect();
    let collapsed = without_digits.split_whitespace().collect::<Vec<_>>().join(" ");
    title_case(&collapsed)
}

fn title_value(value: &str) -> String {
    title_case(value.trim())
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

// Values stay on the line they start on; labels may sit on the line above them.
const DATE_VALUE: &str = r"(\d{1,2}[\s./-]\w{2,9}[\s./-]\d{2,4}|\d{4}[\s./-]\d{2}[\s./-]\d{2})";

lazy_static! {
    /// Applied in order; every rule is independent of the others.
    pub static ref FIELD_RULES: Vec<FieldRule> = vec![
        FieldRule {
            field: PassportField::PassportNumber,
            matcher: Matcher::FirstOf(vec![
                re(r"(?i)PASSPORT\s*(?:NO|NUMBER|NUM|#)[.\s:]*([A-Z]?\d{6,9}[A-Z]?\d?)"),
                re(r"(?i)\b([A-Z]\d{7,8})\b"),
            ]),
            post: keep,
        },
        FieldRule {
            field: PassportField::FullName,
            matcher: Matcher::FullName {
                surname: re(r"(?i)(?:SURNAME|FAMILY\s*NAME)[:\s/]*([A-Z][A-Z \t'-]*)"),
                given: re(r"(?i)(?:GIVEN\s*NAMES?|FIRST\s*NAMES?|PRENOMS?)[:\s/]*([A-Z][A-Z \t'-]*)"),
                fallback: re(r"(?i)NAME[:\s/]+([A-Z][A-Z \t'-]{2,30})"),
            },
            post: clean_name,
        },
        FieldRule {
            field: PassportField::Nationality,
            matcher: Matcher::FirstOf(vec![re(
                r"(?i)(?:NATIONALITY|KEWARGANEGARAAN|CITIZENSHIP)[:\s/]*([A-Z][A-Z \t]*)",
            )]),
            post: title_value,
        },
        FieldRule {
            field: PassportField::DateOfBirth,
            matcher: Matcher::FirstOf(vec![re(&format!(
                r"(?i)(?:DATE\s*OF\s*BIRTH|DOB|BIRTH\s*DATE|TANGGAL\s*LAHIR|BORN)[:\s/]*{}",
                DATE_VALUE
            ))]),
            post: normalize_date_string,
        },
        FieldRule {
            field: PassportField::Gender,
            matcher: Matcher::FirstOf(vec![re(
                r"(?i)(?:SEX|GENDER|JENIS\s*KELAMIN)[:\s/]*(FEMALE|MALE|LELAKI|PEREMPUAN|M|F)",
            )]),
            post: normalize_gender,
        },
        FieldRule {
            field: PassportField::PassportExpiry,
            matcher: Matcher::FirstOf(vec![re(&format!(
                r"(?i)(?:DATE\s*OF\s*EXPIR|EXPIRY|EXPIRATION|VALID\s*UNTIL|BERLAKU\s*HINGGA)[:\s/Y]*{}",
                DATE_VALUE
            ))]),
            post: normalize_date_string,
        },
        FieldRule {
            field: PassportField::PlaceOfIssue,
            matcher: Matcher::FirstOf(vec![re(
                r"(?i)(?:PLACE\s*OF\s*ISSUE|AUTHORITY|ISSUING|TEMPAT\s*DIKELUARKAN)[:\s/]*([A-Z][A-Z \t,'-]*)",
            )]),
            post: title_value,
        },
    ];
}

pub struct HeuristicExtractor;

impl HeuristicExtractor {
    /// Run every rule over `text` (expected upper-cased) and collect what matched.
    pub fn extract(text: &str) -> ParsedPassport {
        let mut parsed = ParsedPassport::default();
        let matched = FIELD_RULES
            .iter()
            .filter(|rule| rule.apply(text, &mut parsed))
            .count();
        debug!("Label matching filled {} of {} fields", matched, FIELD_RULES.len());
        parsed
    }
}
