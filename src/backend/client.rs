use futures_util::StreamExt;
use reqwest::{
    Client,
    multipart::{Form, Part},
};

use super::{AskRequest, AskResponse, BackendConfig, Document, ModelChoice};
use crate::{
    AppError, AppResult,
    session::SummarySession,
    streaming::{OutputStreamer, StreamEvent},
};

const UPLOAD_API: &str = "/upload";
const ASK_API: &str = "/api/ask";
const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> AppResult<Self> {
        config.validate()?;

        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    /// Uploads a PDF and follows the progress stream until the backend closes it.
    /// Returns the final summary, or `None` if the stream carried none.
    pub async fn summarize(
        &self,
        document: Document,
        model: ModelChoice,
        streamer: &mut dyn OutputStreamer,
    ) -> AppResult<Option<String>> {
        log::info!(
            "Uploading {} ({} bytes) with model {}",
            document.file_name,
            document.content.len(),
            model.as_str()
        );
        streamer
            .handle_event(StreamEvent::Status(format!(
                "Uploading {} using {}",
                document.file_name,
                model.as_str()
            )))
            .await?;

        let file = Part::bytes(document.content)
            .file_name(document.file_name)
            .mime_str(PDF_MIME)?;
        let form = Form::new()
            .part("file", file)
            .text("model_choice", model.as_str());

        let response = self
            .client
            .post(format!("{}{}", self.config.endpoint_url(), UPLOAD_API))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Upload failed with status {}", status);
            return Err(AppError::UploadRejected(status));
        }

        let mut session = SummarySession::new();
        let mut chunks = response.bytes_stream();

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.inspect_err(|e| log::error!("Stream error: {}", e))?;
            session.on_chunk(&chunk, streamer).await?;
        }

        session.on_end(streamer).await
    }

    pub async fn ask(&self, question: &str) -> AppResult<String> {
        log::info!("Asking: {}", question);

        let response = self
            .client
            .post(format!("{}{}", self.config.endpoint_url(), ASK_API))
            .json(&AskRequest {
                question: question.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Question failed with status {}", status);
            return Err(AppError::AskRejected(status));
        }

        let body: AskResponse = response.json().await?;
        Ok(body.answer)
    }
}
