use thiserror::Error;

/// Errors that can occur while browsing or mutating a Drive folder
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Not found: {id}")]
    NotFound { id: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited by remote service: {message}")]
    RateLimited { message: String },

    #[error("Drive API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("File {name} is {size} bytes, which exceeds the {limit} byte limit")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Folder {id} is not part of the current path")]
    NotInPath { id: String },

    #[error("Folder browser has not been initialized")]
    NotInitialized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid base64 content: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl DriveError {
    /// Message shown to the user when this error is surfaced as a toast
    pub fn user_message(&self) -> String {
        match self {
            DriveError::Api { message, .. } if !message.is_empty() => message.clone(),
            DriveError::RateLimited { message } => message.clone(),
            DriveError::Network(_) | DriveError::Io(_) | DriveError::Serialization(_) => {
                "An unexpected error occurred.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for drive operations
pub type Result<T> = std::result::Result<T, DriveError>;
