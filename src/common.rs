//! Shared game types: match phase, player side, and the command error taxonomy.

use core::fmt;

/// Stage of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Placing,
    Playing,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Placing => write!(f, "PLACING"),
            Phase::Playing => write!(f, "PLAYING"),
            Phase::Finished => write!(f, "FINISHED"),
        }
    }
}

/// Which seat a player occupies in a game. `First` is the connection that
/// was waiting when the match was made and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// Errors returned by board, game and session operations. All of them are
/// recoverable: the connection stays open and the next command is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Cell token is malformed or outside A1..J10.
    InvalidCoordinate(String),
    /// The connection already registered a name.
    NameAlreadySet,
    /// `/ready` before `/name`.
    NoNameSet,
    /// `/ready` while bound to an active game.
    AlreadyInGame,
    /// Placement or fire outside the phase that allows it.
    WrongPhase { expected: Phase },
    /// Fire while the opponent holds the turn.
    NotYourTurn,
    /// Acting player is not seated in the game.
    InvalidParticipant,
    /// First token of the line is not a known command.
    UnknownCommand(String),
    /// Cell occupied or ship quota reached.
    PlacementRejected(String),
    /// Game command from a connection with no active game.
    NotInGame,
    /// Command given without its required argument; carries the usage.
    MissingArgument(&'static str),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidCoordinate(token) => write!(f, "Invalid coordinate: {}", token),
            GameError::NameAlreadySet => write!(f, "Name is already set for this connection"),
            GameError::NoNameSet => write!(f, "Please set your name first with /name"),
            GameError::AlreadyInGame => write!(f, "You're already in a game"),
            GameError::WrongPhase { expected: Phase::Placing } => {
                write!(f, "Not in placement phase")
            }
            GameError::WrongPhase { expected: Phase::Playing } => write!(f, "Not in combat phase"),
            GameError::WrongPhase { expected: Phase::Finished } => write!(f, "Game is not over"),
            GameError::NotYourTurn => write!(f, "Not your turn"),
            GameError::InvalidParticipant => write!(f, "You're not a player in this game"),
            GameError::UnknownCommand(token) if token.is_empty() => write!(f, "Unknown command"),
            GameError::UnknownCommand(token) => write!(f, "Unknown command: {}", token),
            GameError::PlacementRejected(token) => write!(f, "Cannot place ship at {}", token),
            GameError::NotInGame => write!(f, "You're not in a game. Use /ready first"),
            GameError::MissingArgument(usage) => write!(f, "Usage: {}", usage),
        }
    }
}

impl std::error::Error for GameError {}
