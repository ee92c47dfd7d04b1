use clap::{Parser, Subcommand};

use crate::{
    AppError, AppResult,
    backend::{BackendConfig, DEFAULT_HOST, DEFAULT_PORT, ModelChoice},
};

#[derive(Debug, Parser)]
#[command(name = "docstream")]
#[command(version, about = "Summarize PDFs and query the company knowledge base", long_about = None)]
pub struct Cli {
    /// Backend host, including the scheme
    #[arg(long, env = "DOCSTREAM_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Backend port
    #[arg(long, env = "DOCSTREAM_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Print only results, no progress bar or status lines
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a PDF and stream back its summary
    Summarize {
        /// PDF file to summarize
        file: String,

        /// Summarization model
        #[arg(short, long, value_enum, default_value_t = ModelChoice::default())]
        model: ModelChoice,
    },
    /// Ask the knowledge base a single question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Start an interactive chat session
    Chat {
        /// Write the session transcript as JSON when the session ends
        #[arg(long)]
        save: Option<String>,
    },
}

impl Cli {
    pub fn backend_config(&self) -> AppResult<BackendConfig> {
        BackendConfig::builder()
            .host(self.host.clone())
            .port(self.port)
            .build()
    }

    pub fn question(&self) -> AppResult<Option<String>> {
        match &self.command {
            Commands::Ask { question } => {
                let text = question.join(" ");
                if text.trim().is_empty() {
                    return Err(AppError::InvalidInput);
                }
                Ok(Some(text))
            }
            _ => Ok(None),
        }
    }
}
