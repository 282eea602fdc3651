use tokio::io::{duplex, DuplexStream};

use crate::config::MAX_LINE_LENGTH;
use crate::transport::tcp::LineTransport;

impl LineTransport<DuplexStream> {
    /// Two transports connected back to back in memory.
    pub fn pair() -> (Self, Self) {
        let (a, b) = duplex(MAX_LINE_LENGTH * 16);
        (Self::new(a), Self::new(b))
    }
}

/// Raw in-memory stream pair, for driving a server-side handler directly.
pub fn stream_pair() -> (DuplexStream, DuplexStream) {
    duplex(MAX_LINE_LENGTH * 16)
}
