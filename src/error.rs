use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Invalid CLI input")]
    InvalidInput,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Only PDFs allowed: {0}")]
    NotPdf(String),

    #[error("Upload rejected with status {0}")]
    UploadRejected(reqwest::StatusCode),

    #[error("Question rejected with status {0}")]
    AskRejected(reqwest::StatusCode),

    #[error("Stream already finished")]
    StreamClosed,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown error: {0}")]
    Other(String),
}

impl AppError {
    pub fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
