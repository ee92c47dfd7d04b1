use super::{ProtocolRecord, utf8::Utf8Decoder};

/// Incremental decoder for one summarizer response body.
///
/// Bytes go in through [`LineDecoder::feed`] in the order they were received,
/// complete records come out. Text after the last newline stays buffered until
/// more bytes arrive. [`LineDecoder::finish`] consumes the decoder, so the end
/// of stream can only be signalled once; a trailing partial line is discarded.
#[derive(Debug)]
pub struct LineDecoder {
    text: Utf8Decoder,
    buffer: String,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            text: Utf8Decoder::new(),
            buffer: String::new(),
        }
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ProtocolRecord> {
        let text = self.text.decode(chunk);
        let previous_len = self.buffer.len();
        self.buffer.push_str(&text);

        // Only the new text can hold a newline, the buffered tail has none
        let Some(new_newline) = text.rfind('\n') else {
            return Vec::new();
        };
        let last_newline = previous_len + new_newline;

        let partial = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, partial);

        complete[..last_newline]
            .split('\n')
            .filter_map(ProtocolRecord::parse_line)
            .collect()
    }

    /// Length in bytes of the buffered partial line
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn finish(self) {
        let mut leftover = self.buffer;
        leftover.push_str(&self.text.finish());

        if !leftover.is_empty() {
            log::debug!(
                "Discarding {} bytes of unterminated line at end of stream",
                leftover.len()
            );
        }
    }
}
