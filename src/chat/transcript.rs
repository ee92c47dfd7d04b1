use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_MAX_HISTORY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

/// Bounded history of one chat session, oldest entries dropped first
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Transcript {
    messages: VecDeque<ChatMessage>,
    max_history: usize,
}

impl Transcript {
    pub fn new(max_history: usize) -> Self {
        Self {
            messages: VecDeque::new(),
            max_history: max_history.max(1),
        }
    }

    fn trim(&mut self) {
        while self.messages.len() > self.max_history {
            self.messages.pop_front();
        }
    }

    pub fn push(&mut self, speaker: Speaker, text: String) {
        self.messages.push_back(ChatMessage { speaker, text });
        self.trim();
    }

    pub fn add_user_message(&mut self, text: String) {
        self.push(Speaker::User, text)
    }

    pub fn add_bot_message(&mut self, text: String) {
        self.push(Speaker::Bot, text)
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

/// Trims the question, `None` when nothing is left to send
pub fn normalize_question(input: &str) -> Option<&str> {
    let question = input.trim();
    (!question.is_empty()).then_some(question)
}
