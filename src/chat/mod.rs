mod transcript;

pub use transcript::{Speaker, Transcript, normalize_question};
