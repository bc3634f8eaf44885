use thiserror::Error;

#[derive(Error, Debug)]
pub enum PassportError {
    #[error("No image provided")]
    MissingImage,

    #[error("Invalid image payload: {0}")]
    InvalidImage(String),

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: usize, max: usize },

    #[error("No text detected in the image")]
    NoTextDetected,

    #[error("Text recognition failed: {0}")]
    Recognition(String),

    #[error("Text recognition engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("MRZ parsing error: {0}")]
    MrzParsingError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PassportError {
    /// HTTP status an embedding handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            PassportError::MissingImage | PassportError::InvalidImage(_) => 400,
            PassportError::ImageTooLarge { .. } => 413,
            PassportError::NoTextDetected => 422,
            PassportError::Recognition(_) => 502,
            PassportError::EngineUnavailable(_)
            | PassportError::MrzParsingError(_)
            | PassportError::IoError(_)
            | PassportError::Serialization(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, PassportError>;
