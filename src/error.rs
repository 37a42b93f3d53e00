use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeadshotError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Gemini API error {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Generation failed: {0}")]
    GenerationFailure(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Invalid style: {0}")]
    InvalidStyle(String),
    #[error("I/O error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl HeadshotError {
    /// True for failures raised by an individual API call, as opposed to
    /// configuration or input problems.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            HeadshotError::TransportError(_)
                | HeadshotError::ApiError { .. }
                | HeadshotError::ResponseError(_)
        )
    }
}

impl From<std::io::Error> for HeadshotError {
    fn from(err: std::io::Error) -> Self {
        HeadshotError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for HeadshotError {
    fn from(err: serde_json::Error) -> Self {
        HeadshotError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HeadshotError>;
