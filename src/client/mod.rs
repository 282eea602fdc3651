//! Terminal client: forwards typed commands and presents server output.

pub mod effect_queue;
pub mod frames;

pub use effect_queue::{EffectPlayer, EffectQueue, Screen, ScreenOp, Terminal, LOBBY_PROMPT};
pub use frames::{ClientEvent, FrameParser};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::{ClientConfig, BOARD_SIZE, MAX_SHIPS};
use crate::coordinate::Coordinate;
use crate::transport::{LineTransport, Transport};

/// What to do with one line typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    /// Place a random fleet with `/set` commands.
    AutoPlace,
    Send(String),
    Ignore,
}

pub fn classify_input(line: &str) -> InputAction {
    match line.trim() {
        "" => InputAction::Ignore,
        "quit" | "/quit" | "/exit" => InputAction::Quit,
        "/auto" => InputAction::AutoPlace,
        other => InputAction::Send(other.to_string()),
    }
}

/// Pick [`MAX_SHIPS`] distinct cells uniformly at random.
pub fn random_fleet<R: Rng>(rng: &mut R) -> Vec<Coordinate> {
    rand::seq::index::sample(rng, BOARD_SIZE * BOARD_SIZE, MAX_SHIPS)
        .into_iter()
        .filter_map(|i| Coordinate::new(i / BOARD_SIZE, i % BOARD_SIZE))
        .collect()
}

/// Connect, register a name and relay between stdin and the server until
/// the user quits or the connection drops.
pub async fn run_client(config: ClientConfig) -> anyhow::Result<()> {
    println!("[INFO] - Connecting to Fleet server at {}...", config.connect);
    let mut transport = LineTransport::connect(&config.connect).await?;
    println!("[INFO] - Connected!");

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let name = match config.name {
        Some(name) => name,
        None => {
            println!(">> Please enter your name: ");
            stdin.next_line().await?.unwrap_or_default()
        }
    };
    transport.send(&format!("/name {}", name.trim())).await?;

    let player = EffectPlayer::spawn(config.effect_delay, Terminal);
    player.submit(ClientEvent::GameReset);

    let mut parser = FrameParser::new();
    let mut rng = SmallRng::from_rng(&mut rand::rng());
    loop {
        tokio::select! {
            inbound = transport.recv() => match inbound {
                Ok(line) => {
                    if let Some(event) = parser.push(&line) {
                        player.submit(event);
                    }
                }
                Err(e) => {
                    log::info!("server connection ended: {}", e);
                    println!("[INFO] - Disconnected from server");
                    break;
                }
            },
            input = stdin.next_line() => {
                let Some(line) = input? else { break };
                match classify_input(&line) {
                    InputAction::Quit => break,
                    InputAction::Ignore => {}
                    InputAction::AutoPlace => {
                        for cell in random_fleet(&mut rng) {
                            transport.send(&format!("/set {}", cell)).await?;
                        }
                    }
                    InputAction::Send(command) => transport.send(&command).await?,
                }
            }
        }
    }

    player.shutdown().await;
    Ok(())
}
