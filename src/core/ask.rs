use futures_util::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_stream::wrappers::LinesStream;

use crate::{
    AppResult,
    backend::BackendClient,
    chat::{Speaker, Transcript, normalize_question},
    streaming::{OutputStreamer, StreamEvent},
};

pub const UNREACHABLE_REPLY: &str = "Error: Could not reach the knowledge base.";

/// Sends one question and renders the reply. Returns `None` for blank input.
/// A failed request becomes the unreachable reply rather than an error.
pub async fn answer_question(
    client: &BackendClient,
    transcript: &mut Transcript,
    input: &str,
    streamer: &mut dyn OutputStreamer,
) -> AppResult<Option<String>> {
    let Some(question) = normalize_question(input) else {
        log::debug!("Skipping empty question");
        return Ok(None);
    };

    transcript.add_user_message(question.to_string());

    let reply = match client.ask(question).await {
        Ok(answer) => answer,
        Err(e) => {
            log::error!("Error: {}", e);
            UNREACHABLE_REPLY.to_string()
        }
    };

    transcript.add_bot_message(reply.clone());
    streamer.handle_event(StreamEvent::Reply(reply.clone())).await?;

    Ok(Some(reply))
}

/// Interactive session over line-based input. `exit`, `quit` or end of input
/// ends it; `/history` replays the transcript.
pub async fn run_chat<R>(
    client: &BackendClient,
    input: R,
    transcript: &mut Transcript,
    streamer: &mut dyn OutputStreamer,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
{
    streamer
        .handle_event(StreamEvent::Status(
            "Ask a question (/history to review, exit to quit)".to_string(),
        ))
        .await?;

    let mut lines = LinesStream::new(input.lines());

    while let Some(line) = lines.next().await {
        let line = line?;

        match line.trim() {
            "exit" | "quit" => break,
            "/history" => {
                for message in transcript.messages() {
                    let speaker = match message.speaker {
                        Speaker::User => "you",
                        Speaker::Bot => "bot",
                    };
                    streamer
                        .handle_event(StreamEvent::Status(format!("{}> {}", speaker, message.text)))
                        .await?;
                }
            }
            _ => {
                answer_question(client, transcript, &line, streamer).await?;
            }
        }
    }

    if transcript.is_empty() {
        log::info!("Chat ended without any questions");
    } else {
        log::info!("Chat ended after {} messages", transcript.len());
    }
    streamer.finish().await
}
