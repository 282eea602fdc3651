use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};
use tokio_util::codec::Framed;

use crate::transport::codec::{CommandCodec, Inbound};
use crate::transport::Transport;

/// Line transport over any byte stream (a `TcpStream` in production).
pub struct LineTransport<S> {
    framed: Framed<S, CommandCodec>,
    timeout_duration: Option<Duration>,
}

impl LineTransport<TcpStream> {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

impl<S> LineTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap a stream; operations wait indefinitely.
    pub fn new(stream: S) -> Self {
        Self {
            framed: Framed::new(stream, CommandCodec::default()),
            timeout_duration: None,
        }
    }

    /// Wrap a stream, failing any send or receive that takes longer than `limit`.
    pub fn with_timeout(stream: S, limit: Duration) -> Self {
        Self {
            framed: Framed::new(stream, CommandCodec::default()),
            timeout_duration: Some(limit),
        }
    }

    async fn next_line(&mut self) -> anyhow::Result<String> {
        loop {
            match self.framed.next().await {
                Some(Ok(Inbound::Line(line))) => return Ok(line),
                Some(Ok(Inbound::Malformed)) => {
                    log::warn!("skipping malformed line from peer");
                }
                Some(Err(e)) => return Err(anyhow::anyhow!("Read error: {}", e)),
                None => return Err(anyhow::anyhow!("Connection closed by peer")),
            }
        }
    }
}

#[async_trait::async_trait]
impl<S> Transport for LineTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        let send_op = async {
            self.framed
                .send(line)
                .await
                .map_err(|e| anyhow::anyhow!("Write error: {}", e))
        };
        match self.timeout_duration {
            Some(limit) => timeout(limit, send_op)
                .await
                .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", limit))?,
            None => send_op.await,
        }
    }

    async fn recv(&mut self) -> anyhow::Result<String> {
        match self.timeout_duration {
            Some(limit) => timeout(limit, self.next_line())
                .await
                .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", limit))?,
            None => self.next_line().await,
        }
    }
}
