pub mod extractors;
pub mod mrz;
pub mod normalize;
pub mod ocr;
pub mod parser;

pub use extractors::{FieldRule, HeuristicExtractor, Matcher, FIELD_RULES};
pub use mrz::{find_mrz_lines, MrzDecoder};
pub use ocr::{default_recognizer, PassportScanner, TextRecognizer};
pub use parser::{parse_passport_text, PassportParser};

#[cfg(feature = "tesseract")]
pub use ocr::TesseractRecognizer;
