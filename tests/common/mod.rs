#![allow(dead_code)]

use std::net::SocketAddr;

use fleet::{LineTransport, Server, ServerConfig, SharedRegistry, Transport};
use tokio::net::TcpStream;
use tokio::time::Duration;

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Start a server on an ephemeral port in the background.
pub async fn start_server() -> anyhow::Result<(SocketAddr, SharedRegistry)> {
    let server = Server::bind(ServerConfig {
        bind: "127.0.0.1:0".to_string(),
        ..Default::default()
    })
    .await?;
    let addr = server.local_addr()?;
    let registry = server.registry();
    tokio::spawn(server.run());
    Ok((addr, registry))
}

pub async fn connect(addr: SocketAddr) -> anyhow::Result<LineTransport<TcpStream>> {
    let stream = TcpStream::connect(addr).await?;
    Ok(LineTransport::with_timeout(stream, TIMEOUT))
}

/// Read until a line starting with `prefix` arrives, skipping everything else.
pub async fn expect_line<T: Transport>(transport: &mut T, prefix: &str) -> anyhow::Result<String> {
    loop {
        let line = transport.recv().await?;
        if line.starts_with(prefix) {
            return Ok(line);
        }
    }
}

/// Send a command and wait for the reply with the given tag.
pub async fn request<T: Transport>(
    transport: &mut T,
    command: &str,
    prefix: &str,
) -> anyhow::Result<String> {
    transport.send(command).await?;
    expect_line(transport, prefix).await
}
