use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Summarization model offered by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModelChoice {
    #[default]
    #[value(name = "t5-small")]
    T5Small,
    #[value(name = "bart-large-cnn")]
    BartLargeCnn,
    Mistral,
    Api,
}

impl ModelChoice {
    /// Value sent in the `model_choice` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::T5Small => "t5-small",
            ModelChoice::BartLargeCnn => "bart-large-cnn",
            ModelChoice::Mistral => "mistral",
            ModelChoice::Api => "api",
        }
    }
}

/// PDF file ready to be uploaded
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    #[allow(dead_code)]
    pub question: Option<String>,
    pub answer: String,
}
