mod functions;
mod logger;

pub use functions::{load_document, save_json};
pub use logger::logger_init;
