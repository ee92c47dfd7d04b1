use clap::Parser;
use dotenv::dotenv;

mod backend;
mod chat;
mod cli;
mod core;
mod error;
mod protocol;
mod session;
mod streaming;
mod utils;

pub use crate::cli::{Cli, Commands};
pub use crate::error::AppError;
pub type AppResult<T, E = crate::error::AppError> = std::result::Result<T, E>;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let logger = utils::logger_init();
    log::info!("Starting docstream...");

    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        log::error!("Exiting with error: {}", e);
        eprintln!("docstream: {}", e);
        if let Ok(handle) = &logger {
            handle.flush();
        }
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> AppResult<()> {
    let client = backend::BackendClient::new(cli.backend_config()?)?;

    match &cli.command {
        Commands::Summarize { file, model } => {
            log::info!("Summarizing {}...", file);
            if cli.quiet {
                let summary =
                    core::summarize_quietly(&client, file, *model, &mut std::io::stderr()).await?;
                if let Some(summary) = summary {
                    println!("{}", summary);
                }
            } else {
                let mut streamer = streaming::create_cli_streamer(true);
                core::summarize_document(&client, file, *model, &mut streamer).await?;
            }
        }
        Commands::Ask { .. } => {
            let question = cli.question()?.ok_or(AppError::InvalidInput)?;
            let mut transcript = chat::Transcript::default();
            let mut streamer = streaming::create_cli_streamer(!cli.quiet);
            core::answer_question(&client, &mut transcript, &question, &mut streamer).await?;
        }
        Commands::Chat { save } => {
            log::info!("Starting chat...");
            let mut transcript = chat::Transcript::default();
            let mut streamer = streaming::create_cli_streamer(!cli.quiet);
            let input = tokio::io::BufReader::new(tokio::io::stdin());

            core::run_chat(&client, input, &mut transcript, &mut streamer).await?;

            if let Some(path) = save {
                utils::save_json(path, &transcript)?;
                log::info!("Transcript saved to {}", path);
            }
        }
    }

    Ok(())
}
