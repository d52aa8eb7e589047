use thiserror::Error;

#[derive(Error, Debug)]
pub enum BindError {
    #[error("Shape mismatch for {label}: expected {expected}")]
    ShapeMismatch { label: String, expected: &'static str },

    #[error("Invalid binding: {0}")]
    InvalidBinding(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl From<serde_json::Error> for BindError {
    fn from(err: serde_json::Error) -> Self {
        BindError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BindError>;
