mod decoder;
mod record;
mod utf8;

pub use decoder::LineDecoder;
pub use record::ProtocolRecord;
