use chrono::NaiveDate;
use log::debug;

use crate::models::{
    FormatValidationResult, ParsedPassport, PassportField, ValidationIssue, ValidationIssueType,
};

pub struct FormatValidator;

impl FormatValidator {
    /// Completeness and date-shape checks over a parsed record.
    pub fn validate(parsed: &ParsedPassport) -> FormatValidationResult {
        let mut issues = Vec::new();

        let missing_fields: Vec<&'static str> = parsed
            .missing_fields()
            .into_iter()
            .map(|field| field.key())
            .collect();
        for key in &missing_fields {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Format,
                message: format!("Missing field: {}", key),
            });
        }

        for field in [PassportField::DateOfBirth, PassportField::PassportExpiry] {
            let value = parsed.get(field);
            if !value.is_empty() && Self::parse_iso_date(value).is_none() {
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::Format,
                    message: format!("{} is not a valid YYYY-MM-DD date: {}", field.key(), value),
                });
            }
        }

        debug!("Format validation found {} issue(s)", issues.len());

        FormatValidationResult {
            is_valid: issues.is_empty(),
            missing_fields,
            issues,
        }
    }

    pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ParsedPassport {
        ParsedPassport {
            full_name: "Anna Maria Eriksson".to_string(),
            passport_number: "L898902C3".to_string(),
            nationality: "UTO".to_string(),
            date_of_birth: "1974-08-12".to_string(),
            gender: "Female".to_string(),
            passport_expiry: "2012-04-15".to_string(),
            place_of_issue: "UTO".to_string(),
        }
    }

    #[test]
    fn test_complete_record_is_valid() {
        let result = FormatValidator::validate(&complete());
        assert!(result.is_valid);
        assert!(result.missing_fields.is_empty());
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let mut parsed = complete();
        parsed.gender.clear();
        parsed.place_of_issue.clear();

        let result = FormatValidator::validate(&parsed);
        assert!(!result.is_valid);
        assert_eq!(result.missing_fields, vec!["gender", "place_of_issue"]);
        assert_eq!(result.issues.len(), 2);
    }

    #[test]
    fn test_unnormalized_and_impossible_dates() {
        let mut parsed = complete();
        parsed.date_of_birth = "AUGUST 1995".to_string();
        parsed.passport_expiry = "2030-02-30".to_string();

        let result = FormatValidator::validate(&parsed);
        assert!(!result.is_valid);
        assert!(result.missing_fields.is_empty());
        assert_eq!(result.issues.len(), 2);
        assert!(result.issues[0].message.contains("date_of_birth"));
    }
}
