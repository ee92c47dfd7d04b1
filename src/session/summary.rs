use std::time::Instant;

use crate::{
    AppError, AppResult,
    protocol::{LineDecoder, ProtocolRecord},
    session::ProgressEstimate,
    streaming::{OutputStreamer, ProgressInfo, StreamEvent},
};

/// State of one summarize response stream.
///
/// Driven by two events from the transport: [`SummarySession::on_chunk`] for
/// every chunk in the order received, then [`SummarySession::on_end`] once.
/// Records are turned into [`StreamEvent`]s for the given streamer.
#[derive(Debug)]
pub struct SummarySession {
    decoder: Option<LineDecoder>,
    started: Instant,
    summary: Option<String>,
}

impl SummarySession {
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(started: Instant) -> Self {
        Self {
            decoder: Some(LineDecoder::new()),
            started,
            summary: None,
        }
    }

    pub async fn on_chunk(
        &mut self,
        chunk: &[u8],
        streamer: &mut dyn OutputStreamer,
    ) -> AppResult<()> {
        self.on_chunk_at(chunk, Instant::now(), streamer).await
    }

    pub async fn on_chunk_at(
        &mut self,
        chunk: &[u8],
        now: Instant,
        streamer: &mut dyn OutputStreamer,
    ) -> AppResult<()> {
        let decoder = self.decoder.as_mut().ok_or(AppError::StreamClosed)?;
        let records = decoder.feed(chunk);
        log::trace!(
            "Chunk of {} bytes gave {} records, {} bytes buffered",
            chunk.len(),
            records.len(),
            decoder.buffered_len()
        );

        for record in records {
            self.dispatch(record, now, streamer).await?;
        }

        Ok(())
    }

    /// Ends the stream and returns the last summary received, if any.
    pub async fn on_end(&mut self, streamer: &mut dyn OutputStreamer) -> AppResult<Option<String>> {
        let decoder = self.decoder.take().ok_or(AppError::StreamClosed)?;
        decoder.finish();

        if self.summary.is_none() {
            log::warn!("Summary stream ended without a summary");
            streamer
                .handle_event(StreamEvent::Status(
                    "Stream ended without a summary".to_string(),
                ))
                .await?;
        }

        Ok(self.summary.take())
    }

    async fn dispatch(
        &mut self,
        record: ProtocolRecord,
        now: Instant,
        streamer: &mut dyn OutputStreamer,
    ) -> AppResult<()> {
        match record {
            ProtocolRecord::Progress { completed, total } => {
                let elapsed = now.saturating_duration_since(self.started);
                let estimate = ProgressEstimate::compute(completed, total, elapsed);
                log::info!("Progress {}/{} ({:.0}%)", completed, total, estimate.percent);

                streamer
                    .handle_event(StreamEvent::Progress(ProgressInfo {
                        completed,
                        total,
                        estimate,
                    }))
                    .await
            }
            ProtocolRecord::Summary { text } => {
                log::info!("Received summary ({} chars)", text.chars().count());
                self.summary = Some(text.clone());
                streamer.handle_event(StreamEvent::Summary(text)).await
            }
        }
    }
}

impl Default for SummarySession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::streaming::RecordingStreamer;

    #[tokio::test]
    async fn test_records_become_events_in_order() {
        let started = Instant::now();
        let mut session = SummarySession::started_at(started);
        let mut streamer = RecordingStreamer::new();

        session
            .on_chunk_at(b"PROGRESS:1/4\nSUMM", started + Duration::from_secs(5), &mut streamer)
            .await
            .unwrap();
        session
            .on_chunk_at(b"ARY:first\\nsecond\n", started + Duration::from_secs(6), &mut streamer)
            .await
            .unwrap();
        let summary = session.on_end(&mut streamer).await.unwrap();

        assert_eq!(summary.as_deref(), Some("first\nsecond"));
        assert_eq!(
            streamer.events,
            vec![
                StreamEvent::Progress(ProgressInfo {
                    completed: 1,
                    total: 4,
                    estimate: ProgressEstimate {
                        percent: 25.0,
                        remaining: Some(Duration::from_secs(15)),
                    },
                }),
                StreamEvent::Summary("first\nsecond".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_zero_completed_has_unknown_remaining() {
        let mut session = SummarySession::new();
        let mut streamer = RecordingStreamer::new();

        session.on_chunk(b"PROGRESS:0/3\n", &mut streamer).await.unwrap();

        match &streamer.events[..] {
            [StreamEvent::Progress(info)] => {
                assert_eq!(info.estimate.percent, 0.0);
                assert_eq!(info.estimate.remaining, None);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_max_total_does_not_break_the_stream() {
        let started = Instant::now();
        let mut session = SummarySession::started_at(started);
        let mut streamer = RecordingStreamer::new();

        session
            .on_chunk_at(
                b"PROGRESS:1/18446744073709551615\n",
                started + Duration::from_secs(10),
                &mut streamer,
            )
            .await
            .unwrap();

        match &streamer.events[..] {
            [StreamEvent::Progress(info)] => {
                assert_eq!(info.total, u64::MAX);
                assert_eq!(info.estimate.remaining, None);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_end_without_summary_reports_status() {
        let mut session = SummarySession::new();
        let mut streamer = RecordingStreamer::new();

        session.on_chunk(b"SUMMARY:never terminated", &mut streamer).await.unwrap();
        let summary = session.on_end(&mut streamer).await.unwrap();

        assert_eq!(summary, None);
        assert_eq!(
            streamer.events,
            vec![StreamEvent::Status("Stream ended without a summary".to_string())]
        );
    }

    #[tokio::test]
    async fn test_last_summary_wins() {
        let mut session = SummarySession::new();
        let mut streamer = RecordingStreamer::new();

        session
            .on_chunk(b"SUMMARY:draft\nSUMMARY:final\n", &mut streamer)
            .await
            .unwrap();

        assert_eq!(
            session.on_end(&mut streamer).await.unwrap().as_deref(),
            Some("final")
        );
    }

    #[tokio::test]
    async fn test_events_after_end_are_rejected() {
        let mut session = SummarySession::new();
        let mut streamer = RecordingStreamer::new();

        session.on_end(&mut streamer).await.unwrap();

        assert!(matches!(
            session.on_chunk(b"PROGRESS:1/2\n", &mut streamer).await,
            Err(AppError::StreamClosed)
        ));
        assert!(matches!(
            session.on_end(&mut streamer).await,
            Err(AppError::StreamClosed)
        ));
    }
}
