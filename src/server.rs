use std::net::SocketAddr;

use log::{error, info, warn};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::handler::handle_connection;
use crate::registry::{Registry, SharedRegistry};

/// Accept loop: one spawned handler per connection, all sharing one registry.
pub struct Server {
    listener: TcpListener,
    registry: SharedRegistry,
    config: ServerConfig,
}

impl Server {
    pub async fn bind(config: ServerConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&config.bind).await?;
        info!("listening on {}", listener.local_addr()?);
        Ok(Self {
            listener,
            registry: Registry::shared(),
            config,
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle to the shared session state.
    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    /// Serve connections until the task is dropped. Accept failures are
    /// logged and do not stop the loop.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("failed to accept connection: {}", e);
                    continue;
                }
            };
            info!("client connected from {}", addr);
            let registry = self.registry.clone();
            let max_line_length = self.config.max_line_length;
            let outbox_capacity = self.config.outbox_capacity;
            tokio::spawn(async move {
                if let Err(e) =
                    handle_connection(stream, registry, max_line_length, outbox_capacity).await
                {
                    error!("connection from {} ended with an error: {}", addr, e);
                }
            });
        }
    }
}
