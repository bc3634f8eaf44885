use chrono::NaiveDate;
use log::info;

use crate::models::ValidationResult;
use crate::processing::PassportParser;
use crate::validation::{ExpiryValidator, FormatValidator, MrzValidator};

pub struct PassportValidator;

impl PassportValidator {
    // Parse the text, then run format, MRZ and expiry checks over it.
    // Like parsing, checking never fails; problems end up in `issues`.
    pub fn validate(text: &str, today: NaiveDate) -> ValidationResult {
        let parsed = PassportParser::parse(text);

        let format_validation = FormatValidator::validate(&parsed);
        let mrz_validation = MrzValidator::validate_text(text);
        let expiry_validation = ExpiryValidator::validate(&parsed, today);

        let is_valid = format_validation.is_valid
            && mrz_validation.as_ref().map_or(true, |mrz| mrz.is_valid)
            && expiry_validation.is_valid;

        let mut issues = Vec::new();
        issues.extend(format_validation.issues.iter().cloned());
        if let Some(mrz) = &mrz_validation {
            issues.extend(mrz.issues.iter().cloned());
        }
        issues.extend(expiry_validation.issues.iter().cloned());

        info!(
            "Validated {:?}: valid={}, {} issue(s)",
            parsed.passport_number,
            is_valid,
            issues.len()
        );

        ValidationResult {
            is_valid,
            parsed,
            format_validation,
            mrz_validation,
            expiry_validation,
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationIssueType;

    const SPECIMEN: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
        L898902C36UTO7408122F1204159ZE184226B<<<<<10";

    #[test]
    fn test_specimen_is_expired_but_checksums_hold() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let result = PassportValidator::validate(SPECIMEN, today);

        assert!(!result.is_valid);
        assert!(result.mrz_validation.as_ref().unwrap().is_valid);
        assert!(!result.expiry_validation.not_expired);
        assert_eq!(result.format_validation.missing_fields, Vec::<&str>::new());
        assert_eq!(result.parsed.full_name, "Anna Maria Eriksson");
    }

    #[test]
    fn test_specimen_valid_before_expiry() {
        let today = NaiveDate::from_ymd_opt(2012, 4, 1).unwrap();
        let result = PassportValidator::validate(SPECIMEN, today);

        assert!(result.is_valid);
        assert!(result.issues.is_empty());
        assert_eq!(result.expiry_validation.days_left, Some(14));
        assert!(result.expiry_validation.reminder_due);
    }

    #[test]
    fn test_label_only_text_has_no_mrz_check() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let result = PassportValidator::validate("Surname: TAN\nGiven Name: WEI LIN", today);

        assert!(result.mrz_validation.is_none());
        assert!(!result.is_valid);
        assert!(result.format_validation.missing_fields.contains(&"passport_expiry"));
    }

    #[test]
    fn test_unreadable_mrz_line_does_not_abort_checks() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let text = "Surname: TAN\nGiven Name: WEI LIN\n\
            P<MYSTAN<<WEI<LIN<<<<<<<<<<<<<<<<<<<<<<<<<<<\n\
            A 1 2 3 4 5 6 7 8 2 M Y S 9 0 0 1 0 1 5 M 2 5";
        let result = PassportValidator::validate(text, today);

        assert_eq!(result.parsed.full_name, "Wei Lin Tan");
        assert_eq!(result.parsed.nationality, "Malaysian");
        let mrz = result.mrz_validation.as_ref().unwrap();
        assert!(!mrz.is_valid);
        assert!(!result.is_valid);
        assert!(result
            .issues
            .iter()
            .any(|issue| issue.issue_type == ValidationIssueType::Mrz));
    }
}
