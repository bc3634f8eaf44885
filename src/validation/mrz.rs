use log::warn;

use crate::models::{MrzValidationResult, ValidationIssue, ValidationIssueType};
use crate::processing::mrz::{find_mrz_lines, MIN_MRZ_LINE2_LEN};
use crate::utils::{PassportError, Result};

/// Repeating weights of the ICAO 9303 check digit
const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Full TD3 line length, needed for the composite check digit
const TD3_LINE_LEN: usize = 44;

pub struct MrzValidator;

impl MrzValidator {
    /// ICAO 9303 check digit of an MRZ field. `None` if the field holds a non-MRZ character.
    pub fn check_digit(field: &str) -> Option<u32> {
        let mut sum = 0;
        for (i, c) in field.chars().enumerate() {
            let value = match c {
                '0'..='9' => c as u32 - '0' as u32,
                'A'..='Z' => c as u32 - 'A' as u32 + 10,
                '<' => 0,
                _ => return None,
            };
            sum += value * WEIGHTS[i % 3];
        }
        Some(sum % 10)
    }

    fn verify(field: &str, check: &str) -> bool {
        match (Self::check_digit(field), check.chars().next().and_then(|c| c.to_digit(10))) {
            (Some(expected), Some(printed)) => expected == printed,
            _ => false,
        }
    }

    /// Verify the check digits of a TD3 number line.
    pub fn validate(line2: &str) -> Result<MrzValidationResult> {
        if line2.len() < MIN_MRZ_LINE2_LEN || !line2.is_ascii() {
            return Err(PassportError::MrzParsingError(format!(
                "MRZ line too short for check digits: {:?}",
                line2
            )));
        }

        let mut issues = Vec::new();
        let mut check = |name: &str, field: &str, digit: &str| {
            let valid = Self::verify(field, digit);
            if !valid {
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::Mrz,
                    message: format!("{} check digit mismatch", name),
                });
            }
            valid
        };

        let document_number_check_valid = check("Document number", &line2[0..9], &line2[9..10]);
        let date_of_birth_check_valid = check("Date of birth", &line2[13..19], &line2[19..20]);
        let date_of_expiry_check_valid = check("Date of expiry", &line2[21..27], &line2[27..28]);

        let composite_check_valid = if line2.len() >= TD3_LINE_LEN {
            let composite = format!("{}{}{}", &line2[0..10], &line2[13..20], &line2[21..43]);
            Some(check("Composite", &composite, &line2[43..44]))
        } else {
            None
        };

        let is_valid = document_number_check_valid
            && date_of_birth_check_valid
            && date_of_expiry_check_valid
            && composite_check_valid.unwrap_or(true);

        Ok(MrzValidationResult {
            is_valid,
            document_number_check_valid,
            date_of_birth_check_valid,
            date_of_expiry_check_valid,
            composite_check_valid,
            issues,
        })
    }

    /// Locate the MRZ in recognized text and verify its number line.
    /// Returns `None` when the text carries no MRZ. A number line too short
    /// for the check digits is reported as an invalid result, never an error.
    pub fn validate_text(text: &str) -> Option<MrzValidationResult> {
        let lines: Vec<&str> = text.lines().collect();
        let mrz_lines = find_mrz_lines(&lines);
        let line2 = match mrz_lines.as_slice() {
            [.., _, line2] => line2,
            _ => return None,
        };

        match Self::validate(line2) {
            Ok(result) => Some(result),
            Err(err) => {
                warn!("Skipping MRZ check digits: {}", err);
                Some(Self::unreadable(err))
            }
        }
    }

    fn unreadable(err: PassportError) -> MrzValidationResult {
        MrzValidationResult {
            is_valid: false,
            document_number_check_valid: false,
            date_of_birth_check_valid: false,
            date_of_expiry_check_valid: false,
            composite_check_valid: None,
            issues: vec![ValidationIssue {
                issue_type: ValidationIssueType::Mrz,
                message: err.to_string(),
            }],
        }
    }
}
