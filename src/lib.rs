mod board;
pub mod client;
mod common;
mod config;
mod coordinate;
mod display;
mod effects;
mod game;
pub mod handler;
mod logging;
mod player;
pub mod protocol;
pub mod registry;
mod server;
pub mod transport;

pub use board::*;
pub use common::*;
pub use config::*;
pub use coordinate::*;
pub use display::render;
pub use effects::Effect;
pub use game::*;
pub use handler::{dispatch, handle_connection};
pub use logging::{init_logging, parse_level};
pub use player::Player;
pub use protocol::{Command, Reply};
pub use registry::{ConnectionId, GameId, Outbox, ReadyOutcome, Registry, SharedRegistry};
pub use server::Server;
pub use transport::{LineTransport, Transport};
