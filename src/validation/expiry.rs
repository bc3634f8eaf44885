use chrono::NaiveDate;

use crate::models::{ExpiryValidationResult, ParsedPassport, ValidationIssue, ValidationIssueType};
use crate::validation::format::FormatValidator;

/// Days before expiry on which a renewal reminder goes out
pub const REMINDER_DAYS: [i64; 4] = [7, 14, 21, 28];

pub struct ExpiryValidator;

impl ExpiryValidator {
    pub fn validate(parsed: &ParsedPassport, today: NaiveDate) -> ExpiryValidationResult {
        let mut issues = Vec::new();

        let days_left = match FormatValidator::parse_iso_date(&parsed.passport_expiry) {
            Some(expiry) => Some((expiry - today).num_days()),
            None => {
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::Expiry,
                    message: "Invalid expiry date format".to_string(),
                });
                None
            }
        };

        let not_expired = days_left.map_or(false, |days| days >= 0);
        if days_left.is_some() && !not_expired {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Expiry,
                message: "Passport has expired".to_string(),
            });
        }

        ExpiryValidationResult {
            is_valid: not_expired,
            not_expired,
            days_left,
            reminder_due: days_left.map_or(false, |days| REMINDER_DAYS.contains(&days)),
            issues,
        }
    }
}
