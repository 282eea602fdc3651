use tokio::time::Duration;

pub const BOARD_SIZE: usize = 10;
pub const MAX_SHIPS: usize = 5;

/// Longest command line accepted from a client, in bytes.
pub const MAX_LINE_LENGTH: usize = 1024;

pub const DEFAULT_PORT: u16 = 8080;

/// Replies queued for one connection before it is treated as stalled and dropped.
pub const OUTBOX_CAPACITY: usize = 256;

/// How long the client keeps an effect banner on screen.
pub const DEFAULT_EFFECT_DELAY: Duration = Duration::from_secs(3);

/// Settings for the matchmaking server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub max_line_length: usize,
    pub outbox_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: format!("0.0.0.0:{}", DEFAULT_PORT),
            max_line_length: MAX_LINE_LENGTH,
            outbox_capacity: OUTBOX_CAPACITY,
        }
    }
}

/// Settings for the terminal client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub connect: String,
    pub name: Option<String>,
    pub effect_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect: format!("127.0.0.1:{}", DEFAULT_PORT),
            name: None,
            effect_delay: DEFAULT_EFFECT_DELAY,
        }
    }
}
