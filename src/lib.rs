pub mod models;
pub mod passport_validator;
pub mod processing;
pub mod utils;
pub mod validation;

pub use models::{ParsedPassport, ScanResponse, ValidationResult};
pub use passport_validator::PassportValidator;
pub use processing::{parse_passport_text, PassportParser, PassportScanner, TextRecognizer};
pub use utils::{PassportError, Result};
