use std::io::Write;

use crate::{
    AppResult,
    backend::{BackendClient, ModelChoice},
    streaming::{OutputStreamer, RecordingStreamer, StreamEvent},
    utils::load_document,
};

pub const UPLOAD_ERROR: &str = "Error during upload.";

/// Loads the PDF, uploads it and renders the stream. Failures are reported to
/// the streamer once and then returned.
pub async fn summarize_document(
    client: &BackendClient,
    file_path: &str,
    model: ModelChoice,
    streamer: &mut dyn OutputStreamer,
) -> AppResult<Option<String>> {
    streamer
        .handle_event(StreamEvent::Status(format!("Loading file: {}", file_path)))
        .await?;

    log::info!("Loading document from: {}", file_path);
    let document = match load_document(file_path) {
        Ok(document) => document,
        Err(e) => {
            log::error!("Cannot load {}: {}", file_path, e);
            streamer.handle_event(StreamEvent::Error(e.to_string())).await?;
            return Err(e);
        }
    };

    match client.summarize(document, model, streamer).await {
        Ok(summary) => {
            streamer.finish().await?;
            log::info!("Summarize completed successfully");
            Ok(summary)
        }
        Err(e) => {
            log::error!("Summarize failed: {}", e);
            streamer
                .handle_event(StreamEvent::Error(UPLOAD_ERROR.to_string()))
                .await?;
            Err(e)
        }
    }
}

/// Same flow without progress rendering. Only the errors the user would have
/// seen are written, one per line, to `errors`.
pub async fn summarize_quietly<W: Write>(
    client: &BackendClient,
    file_path: &str,
    model: ModelChoice,
    errors: &mut W,
) -> AppResult<Option<String>> {
    let mut streamer = RecordingStreamer::new();
    let result = summarize_document(client, file_path, model, &mut streamer).await;

    for error in streamer.errors() {
        writeln!(errors, "Error: {}", error)?;
    }
    errors.flush()?;

    result
}
