use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Strict validation found configuration errors. The message is a
    /// compact summary (up to six errors plus an overflow count); the full
    /// list lives in the validation report.
    #[error("match engine input validation failed:\n{summary}")]
    Validation { summary: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
