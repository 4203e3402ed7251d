use thiserror::Error;

/// All possible errors in the pipeline checker
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid pipeline: {0}")]
    InputValidation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Stable machine-readable code used in structured error bodies
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::InputValidation(_) => "InputValidation",
            PipelineError::InvalidConfig(_) => "InvalidConfig",
            PipelineError::Io(_) => "Io",
            PipelineError::Json(_) => "Json",
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PipelineError>;
