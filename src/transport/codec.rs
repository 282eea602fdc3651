//! Newline-delimited framing that tolerates bad input.
//!
//! `LinesCodec` reports over-long lines and invalid UTF-8 as errors, and a
//! `FramedRead` stops yielding items after the first error. `CommandCodec`
//! turns both into [`Inbound::Malformed`] so one bad line never ends the
//! connection.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

/// One decoded inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Line(String),
    /// Line was too long or not UTF-8; it has been discarded.
    Malformed,
}

#[derive(Debug)]
pub struct CommandCodec {
    inner: LinesCodec,
}

impl CommandCodec {
    pub fn new(max_length: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_length),
        }
    }

    fn recover(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<Inbound>, LinesCodecError> {
        match result {
            Ok(line) => Ok(line.map(Inbound::Line)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Inbound::Malformed)),
            Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                Ok(Some(Inbound::Malformed))
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for CommandCodec {
    fn default() -> Self {
        Self::new(crate::config::MAX_LINE_LENGTH)
    }
}

impl Decoder for CommandCodec {
    type Item = Inbound;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Inbound>, LinesCodecError> {
        Self::recover(self.inner.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Inbound>, LinesCodecError> {
        Self::recover(self.inner.decode_eof(buf))
    }
}

impl<T: AsRef<str>> Encoder<T> for CommandCodec {
    type Error = LinesCodecError;

    fn encode(&mut self, line: T, buf: &mut BytesMut) -> Result<(), LinesCodecError> {
        self.inner.encode(line, buf)
    }
}
