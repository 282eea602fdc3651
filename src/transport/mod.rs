pub mod codec;
pub mod in_memory;
pub mod tcp;

pub use codec::{CommandCodec, Inbound};
pub use tcp::LineTransport;

/// A bidirectional stream of text lines.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Send one line; a trailing newline is added.
    async fn send(&mut self, line: &str) -> anyhow::Result<()>;
    /// Next line from the peer, without its newline. Fails once the peer
    /// has closed the stream.
    async fn recv(&mut self) -> anyhow::Result<String>;
}
