use super::{OutputStreamer, StreamEvent};
use crate::AppResult;

/// Keeps every event in memory instead of rendering it
#[derive(Debug, Default)]
pub struct RecordingStreamer {
    pub events: Vec<StreamEvent>,
}

impl RecordingStreamer {
    pub fn new() -> Self {
        RecordingStreamer { events: Vec::new() }
    }

    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                StreamEvent::Error(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl OutputStreamer for RecordingStreamer {
    async fn finish(&mut self) -> AppResult<()> {
        self.handle_event(StreamEvent::Finished).await
    }

    async fn handle_event(&mut self, event: StreamEvent) -> AppResult<()> {
        log::debug!("{:#?}", event);
        self.events.push(event);
        Ok(())
    }
}
