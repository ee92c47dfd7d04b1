mod ask;
mod summarize;

pub use ask::{answer_question, run_chat};
pub use summarize::{summarize_document, summarize_quietly};
