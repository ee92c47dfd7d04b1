mod client;
mod config;
#[cfg(test)]
pub mod test_server;
mod types;

pub use client::BackendClient;
pub use config::{BackendConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use types::{AskRequest, AskResponse, Document, ModelChoice};
