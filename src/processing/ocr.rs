use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{debug, info};

use crate::models::ScanResponse;
use crate::processing::parser::PassportParser;
use crate::utils::{PassportError, Result};

/// Default upper bound for a decoded image payload (10 MiB)
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Anything that can turn image bytes into text.
pub trait TextRecognizer: Send + Sync {
    /// Engine identifier used in logs
    fn name(&self) -> &'static str;

    fn recognize(&self, image_data: &[u8]) -> Result<String>;
}

#[cfg(feature = "tesseract")]
mod tesseract_engine {
    use std::io::Write;

    use tempfile::NamedTempFile;
    use tesseract::Tesseract;

    use super::TextRecognizer;
    use crate::utils::{PassportError, Result};

    /// Recognizer backed by the local libtesseract installation.
    pub struct TesseractRecognizer {
        language: String,
        datapath: Option<String>,
    }

    impl TesseractRecognizer {
        pub fn new(language: &str, datapath: Option<&str>) -> Self {
            Self {
                language: language.to_string(),
                datapath: datapath.map(str::to_string),
            }
        }
    }

    impl TextRecognizer for TesseractRecognizer {
        fn name(&self) -> &'static str {
            "tesseract"
        }

        fn recognize(&self, image_data: &[u8]) -> Result<String> {
            // Tesseract only reads from disk
            let mut temp_file = NamedTempFile::new()?;
            temp_file.write_all(image_data)?;

            let path = temp_file.path().to_str().ok_or_else(|| {
                PassportError::Recognition("Temporary file path is not valid UTF-8".to_string())
            })?;

            let text = Tesseract::new(self.datapath.as_deref(), Some(self.language.as_str()))
                .map_err(|e| PassportError::EngineUnavailable(format!("Tesseract init error: {}", e)))?
                .set_image(path)
                .map_err(|e| PassportError::Recognition(format!("Tesseract set image error: {}", e)))?
                .get_text()
                .map_err(|e| PassportError::Recognition(format!("Tesseract error: {}", e)))?;

            Ok(text)
        }
    }
}

#[cfg(feature = "tesseract")]
pub use tesseract_engine::TesseractRecognizer;

/// The recognizer compiled into this build.
#[cfg(feature = "tesseract")]
pub fn default_recognizer(language: &str, datapath: Option<&str>) -> Result<Box<dyn TextRecognizer>> {
    Ok(Box::new(TesseractRecognizer::new(language, datapath)))
}

/// The recognizer compiled into this build.
#[cfg(not(feature = "tesseract"))]
pub fn default_recognizer(_language: &str, _datapath: Option<&str>) -> Result<Box<dyn TextRecognizer>> {
    Err(PassportError::EngineUnavailable(
        "built without the `tesseract` feature".to_string(),
    ))
}

/// Image-to-fields pipeline: payload checks, text recognition, then parsing.
pub struct PassportScanner {
    recognizer: Box<dyn TextRecognizer>,
    max_image_bytes: usize,
}

impl PassportScanner {
    pub fn new(recognizer: Box<dyn TextRecognizer>) -> Self {
        Self {
            recognizer,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    /// Scan a base64-encoded image, with or without a `data:` URL prefix.
    pub fn scan(&self, image_b64: &str) -> Result<ScanResponse> {
        let image_data = self.decode_payload(image_b64)?;

        let text = self.recognizer.recognize(&image_data)?;
        if text.trim().is_empty() {
            return Err(PassportError::NoTextDetected);
        }
        info!(
            "{} recognized {} characters",
            self.recognizer.name(),
            text.chars().count()
        );

        Ok(Self::scan_text(&text))
    }

    /// Wrap already-recognized text in a response.
    pub fn scan_text(text: &str) -> ScanResponse {
        ScanResponse {
            success: true,
            raw_text: text.to_string(),
            parsed: PassportParser::parse(text),
        }
    }

    fn decode_payload(&self, image_b64: &str) -> Result<Vec<u8>> {
        let payload = image_b64.trim();
        if payload.is_empty() {
            return Err(PassportError::MissingImage);
        }

        // data:image/jpeg;base64,<payload>
        let encoded = match payload.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => payload,
        };
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

        let image_data = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| PassportError::InvalidImage(format!("Invalid base64: {}", e)))?;

        let format = image::guess_format(&image_data)
            .map_err(|e| PassportError::InvalidImage(format!("Unrecognized image format: {}", e)))?;

        if image_data.len() > self.max_image_bytes {
            return Err(PassportError::ImageTooLarge {
                size: image_data.len(),
                max: self.max_image_bytes,
            });
        }

        debug!("Decoded {} byte {:?} image", image_data.len(), format);

        Ok(image_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    struct FixedText(&'static str);

    impl TextRecognizer for FixedText {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn recognize(&self, _image_data: &[u8]) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl TextRecognizer for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn recognize(&self, _image_data: &[u8]) -> Result<String> {
            Err(PassportError::Recognition("upstream returned 503".to_string()))
        }
    }

    fn png_payload() -> String {
        STANDARD.encode(PNG_SIGNATURE)
    }

    #[test]
    fn test_scan_parses_recognized_text() {
        let scanner = PassportScanner::new(Box::new(FixedText("Surname: TAN\nGiven Name: WEI LIN")));
        let response = scanner.scan(&png_payload()).unwrap();
        assert!(response.success);
        assert_eq!(response.raw_text, "Surname: TAN\nGiven Name: WEI LIN");
        assert_eq!(response.parsed.full_name, "Wei Lin Tan");
    }

    #[test]
    fn test_scan_accepts_data_url() {
        let scanner = PassportScanner::new(Box::new(FixedText("Sex: F")));
        let payload = format!("data:image/png;base64,{}", png_payload());
        let response = scanner.scan(&payload).unwrap();
        assert_eq!(response.parsed.gender, "Female");
    }

    #[test]
    fn test_missing_image() {
        let scanner = PassportScanner::new(Box::new(FixedText("text")));
        let err = scanner.scan("   ").unwrap_err();
        assert!(matches!(err, PassportError::MissingImage));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_invalid_payloads() {
        let scanner = PassportScanner::new(Box::new(FixedText("text")));
        assert!(matches!(
            scanner.scan("not base64 at all!"),
            Err(PassportError::InvalidImage(_))
        ));
        let not_an_image = STANDARD.encode(b"plain text, not an image");
        assert!(matches!(
            scanner.scan(&not_an_image),
            Err(PassportError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_image_too_large() {
        let scanner = PassportScanner::new(Box::new(FixedText("text"))).with_max_image_bytes(4);
        match scanner.scan(&png_payload()) {
            Err(PassportError::ImageTooLarge { size, max }) => {
                assert_eq!(size, PNG_SIGNATURE.len());
                assert_eq!(max, 4);
            }
            other => panic!("expected ImageTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_format_checked_before_size() {
        let scanner = PassportScanner::new(Box::new(FixedText("text"))).with_max_image_bytes(4);
        let oversized_text = STANDARD.encode(b"plain text, not an image");
        assert!(matches!(
            scanner.scan(&oversized_text),
            Err(PassportError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_no_text_detected() {
        let scanner = PassportScanner::new(Box::new(FixedText(" \n ")));
        let err = scanner.scan(&png_payload()).unwrap_err();
        assert!(matches!(err, PassportError::NoTextDetected));
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_recognizer_error_propagates() {
        let scanner = PassportScanner::new(Box::new(Failing));
        let err = scanner.scan(&png_payload()).unwrap_err();
        assert_eq!(err.status_code(), 502);
    }

    #[cfg(not(feature = "tesseract"))]
    #[test]
    fn test_default_recognizer_unavailable_without_feature() {
        assert!(matches!(
            default_recognizer("eng", None),
            Err(PassportError::EngineUnavailable(_))
        ));
    }
}
