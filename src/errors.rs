/*!
 * Error types for the fusionn control surface.
 *
 * The three failure families a submit can end in are kept apart:
 * - `ValidationError`: a path input was missing or malformed, nothing was sent
 * - `ServiceError`: the processing service answered with an explicit error
 * - `TransportError`: the request never completed or its body was unreadable
 *
 * All of them collapse to a single line of status text for the user. Only
 * transport errors carry technical detail, and that detail goes to the log.
 */

use thiserror::Error;

use crate::validation::paths::VIDEO_EXTENSIONS;

/// A submit was blocked locally before any request was issued.
///
/// The `Display` text is exactly what the status banner shows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No video file path provided")]
    MissingVideoPath,

    #[error("File must end with one of: {}", VIDEO_EXTENSIONS.join(", "))]
    InvalidVideoPath,

    #[error("Both subtitle paths are required")]
    MissingSubtitlePaths,

    #[error("Chinese subtitle file must be a .srt file")]
    InvalidChsSubtitle,

    #[error("English subtitle file must be a .srt file")]
    InvalidEngSubtitle,

    #[error("Folder path is required")]
    MissingFolderPath,

    #[error("Please provide a valid folder path without file extension")]
    InvalidFolderPath,
}

impl ValidationError {
    /// Whether the error comes from an empty input rather than a malformed one
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            Self::MissingVideoPath | Self::MissingSubtitlePaths | Self::MissingFolderPath
        )
    }
}

/// The request could not complete, or the response body could not be read
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, reset or DNS failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// No response within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Response arrived but the body is not JSON
    #[error("Failed to parse service response: {0}")]
    Parse(String),

    /// Any other failure while building or sending the request
    #[error("Request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Timeouts are the one transport failure a user is likely to fix by resubmitting
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// The service answered, but not with `message == "success"`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Service reported failure (HTTP {status_code}): {}", message.as_deref().unwrap_or("no error field"))]
pub struct ServiceError {
    /// HTTP status code of the reply
    pub status_code: u16,
    /// Content of the `error` field, when the service sent one
    pub message: Option<String>,
}

/// Why a dispatched request ended in `Failed`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A submit was blocked by its guard
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A dispatched request failed
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<TransportError> for AppError {
    fn from(error: TransportError) -> Self {
        Self::Dispatch(DispatchError::Transport(error))
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
