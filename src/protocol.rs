//! Line protocol between client and server: inbound commands and the
//! tagged replies and framed payloads sent back.

use core::fmt;

use crate::common::GameError;
use crate::coordinate::Coordinate;
use crate::effects::Effect;

pub const DISPLAY_BEGIN: &str = "DISPLAY_UPDATE";
pub const DISPLAY_END: &str = "END_DISPLAY";
pub const EFFECT_BEGIN: &str = "EFFECT_UPDATE";
pub const EFFECT_END: &str = "EFFECT_END";
pub const OPPONENT_DISCONNECTED: &str = "OPPONENT_DISCONNECTED";
pub const GAME_RESET: &str = "GAME_RESET";

const GAME_OVER_RULE: &str = "======================================";

/// A command sent by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/name <text>`; the remaining tokens joined by single spaces.
    Name(String),
    /// `/ready`
    Ready,
    /// `/set <coord>`
    Set(String),
    /// `/fire <coord>`
    Fire(String),
}

impl Command {
    /// Parse one inbound line. A blank line is an unknown command.
    pub fn parse(line: &str) -> Result<Command, GameError> {
        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else {
            return Err(GameError::UnknownCommand(String::new()));
        };
        let command = match head {
            "/name" => {
                let name = tokens.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err(GameError::MissingArgument("/name YourName"));
                }
                Command::Name(name)
            }
            "/ready" => Command::Ready,
            "/set" => Command::Set(
                tokens
                    .next()
                    .ok_or(GameError::MissingArgument("/set A1"))?
                    .to_string(),
            ),
            "/fire" => Command::Fire(
                tokens
                    .next()
                    .ok_or(GameError::MissingArgument("/fire A1"))?
                    .to_string(),
            ),
            other => return Err(GameError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

/// Everything the server writes to a client. Each reply renders to one or
/// more newline-separated lines without a trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    NameSet { name: String },
    Waiting,
    GameStart { opponent: String },
    ShipPlaced { at: Coordinate, placed: usize, quota: usize },
    CombatStart,
    YourTurn,
    OpponentsTurn { opponent: String },
    ShotResult { hit: bool, at: Coordinate },
    Incoming { shooter: String, hit: bool, at: Coordinate },
    GameOver { winner: String },
    Error(GameError),
    /// Rendered board, framed by `DISPLAY_UPDATE` / `END_DISPLAY`.
    Display(String),
    /// Banner framed by `EFFECT_UPDATE` / `EFFECT_END`.
    Effect(Effect),
    OpponentDisconnected,
    GameReset,
}

fn hit_or_miss(hit: bool) -> &'static str {
    if hit {
        "HIT"
    } else {
        "MISS"
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::NameSet { name } => write!(f, "[NAME_SET] - Welcome {}!", name),
            Reply::Waiting => write!(f, "[WAITING] - Looking for opponent..."),
            Reply::GameStart { opponent } => {
                write!(f, "[GAME_START] - Match found! vs {}", opponent)
            }
            Reply::ShipPlaced { at, placed, quota } => {
                write!(f, "[SHIP_PLACED] - Ship placed at {} ({}/{})", at, placed, quota)
            }
            Reply::CombatStart => {
                write!(f, "[COMBAT_START] - All ships placed! Combat phase begins!")
            }
            Reply::YourTurn => write!(f, "[TURN] - Your turn! Fire with /fire A1"),
            Reply::OpponentsTurn { opponent } => {
                write!(f, "[TURN] - Waiting for {} to fire...", opponent)
            }
            Reply::ShotResult { hit, at } => {
                write!(f, "[SHOT_RESULT] - {} at {}", hit_or_miss(*hit), at)
            }
            Reply::Incoming { shooter, hit, at } => write!(
                f,
                "[INCOMING] - {} fired at {}: {}",
                shooter,
                at,
                hit_or_miss(*hit)
            ),
            Reply::GameOver { winner } => write!(
                f,
                "{rule}\n[GAME_OVER] - {} wins!\n{rule}",
                winner,
                rule = GAME_OVER_RULE
            ),
            Reply::Error(err) => write!(f, "[ERROR] - {}", err),
            Reply::Display(body) => {
                write!(f, "{}\n{}\n{}", DISPLAY_BEGIN, body.trim_end_matches('\n'), DISPLAY_END)
            }
            Reply::Effect(effect) => write!(
                f,
                "{}\n{}\n{}",
                EFFECT_BEGIN,
                effect.banner().trim_end_matches('\n'),
                EFFECT_END
            ),
            Reply::OpponentDisconnected => write!(f, "{}", OPPONENT_DISCONNECTED),
            Reply::GameReset => write!(f, "{}", GAME_RESET),
        }
    }
}
