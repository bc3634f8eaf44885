use serde::{Deserialize, Serialize};

/// Passport fields recovered from recognized text.
///
/// Every field is a plain string that stays empty when nothing could be read,
/// so the record always serializes with the same seven keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPassport {
    pub full_name: String,
    pub passport_number: String,
    pub nationality: String,
    /// ISO `YYYY-MM-DD`, or whatever the document printed when it could not be normalized
    pub date_of_birth: String,
    /// `"Male"`, `"Female"` or empty
    pub gender: String,
    pub passport_expiry: String,
    pub place_of_issue: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassportField {
    FullName,
    PassportNumber,
    Nationality,
    DateOfBirth,
    Gender,
    PassportExpiry,
    PlaceOfIssue,
}

impl PassportField {
    pub const ALL: [PassportField; 7] = [
        PassportField::FullName,
        PassportField::PassportNumber,
        PassportField::Nationality,
        PassportField::DateOfBirth,
        PassportField::Gender,
        PassportField::PassportExpiry,
        PassportField::PlaceOfIssue,
    ];

    /// JSON key of the field
    pub fn key(&self) -> &'static str {
        match self {
            PassportField::FullName => "full_name",
            PassportField::PassportNumber => "passport_number",
            PassportField::Nationality => "nationality",
            PassportField::DateOfBirth => "date_of_birth",
            PassportField::Gender => "gender",
            PassportField::PassportExpiry => "passport_expiry",
            PassportField::PlaceOfIssue => "place_of_issue",
        }
    }
}

impl ParsedPassport {
    pub fn get(&self, field: PassportField) -> &str {
        match field {
            PassportField::FullName => &self.full_name,
            PassportField::PassportNumber => &self.passport_number,
            PassportField::Nationality => &self.nationality,
            PassportField::DateOfBirth => &self.date_of_birth,
            PassportField::Gender => &self.gender,
            PassportField::PassportExpiry => &self.passport_expiry,
            PassportField::PlaceOfIssue => &self.place_of_issue,
        }
    }

    pub fn set(&mut self, field: PassportField, value: String) {
        let slot = match field {
            PassportField::FullName => &mut self.full_name,
            PassportField::PassportNumber => &mut self.passport_number,
            PassportField::Nationality => &mut self.nationality,
            PassportField::DateOfBirth => &mut self.date_of_birth,
            PassportField::Gender => &mut self.gender,
            PassportField::PassportExpiry => &mut self.passport_expiry,
            PassportField::PlaceOfIssue => &mut self.place_of_issue,
        };
        *slot = value;
    }

    /// Fields that are still empty
    pub fn missing_fields(&self) -> Vec<PassportField> {
        PassportField::ALL
            .iter()
            .copied()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }
}

/// Envelope returned by the scan pipeline: the raw recognized text next to the parsed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub success: bool,
    pub raw_text: String,
    pub parsed: ParsedPassport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub issue_type: ValidationIssueType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationIssueType {
    Format,
    Mrz,
    Expiry,
}

#[derive(Debug, Serialize)]
pub struct FormatValidationResult {
    pub is_valid: bool,
    pub missing_fields: Vec<&'static str>,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Serialize)]
pub struct MrzValidationResult {
    pub is_valid: bool,
    pub document_number_check_valid: bool,
    pub date_of_birth_check_valid: bool,
    pub date_of_expiry_check_valid: bool,
    /// `None` when the line is too short to carry the composite digit
    pub composite_check_valid: Option<bool>,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Serialize)]
pub struct ExpiryValidationResult {
    pub is_valid: bool,
    pub not_expired: bool,
    pub days_left: Option<i64>,
    pub reminder_due: bool,
    pub issues: Vec<ValidationIssue>,
}

/// Everything the `check` pipeline knows about one document.
#[derive(Debug, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub parsed: ParsedPassport,
    pub format_validation: FormatValidationResult,
    /// Absent when the text carries no MRZ
    pub mrz_validation: Option<MrzValidationResult>,
    pub expiry_validation: ExpiryValidationResult,
    pub issues: Vec<ValidationIssue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_serializes_all_keys_empty() {
        let json = serde_json::to_value(ParsedPassport::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 7);
        for field in PassportField::ALL {
            assert_eq!(object[field.key()], "");
        }
    }

    #[test]
    fn test_set_and_missing_fields() {
        let mut parsed = ParsedPassport::default();
        parsed.set(PassportField::Gender, "Female".to_string());
        parsed.set(PassportField::PassportNumber, "A1234567".to_string());

        assert_eq!(parsed.get(PassportField::Gender), "Female");
        let missing = parsed.missing_fields();
        assert_eq!(missing.len(), 5);
        assert!(!missing.contains(&PassportField::PassportNumber));
    }
}
