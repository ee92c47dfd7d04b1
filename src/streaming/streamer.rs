use crate::AppResult;
use async_trait::async_trait;

use crate::session::ProgressEstimate;

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressInfo {
    pub completed: u64,
    pub total: u64,
    pub estimate: ProgressEstimate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Progress(ProgressInfo),
    /// Final summary text, replaces any previous output
    Summary(String),
    /// Answer from the knowledge-base chat
    Reply(String),
    Status(String),
    Error(String),
    Finished,
}

#[async_trait]
pub trait OutputStreamer: Send + Sync {
    async fn handle_event(&mut self, event: StreamEvent) -> AppResult<()>;
    async fn finish(&mut self) -> AppResult<()>;
}
