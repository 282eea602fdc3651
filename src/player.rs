use crate::board::Board;
use crate::registry::ConnectionId;

/// A named participant owning exactly one board.
#[derive(Debug, Clone)]
pub struct Player {
    id: ConnectionId,
    name: String,
    board: Board,
}

impl Player {
    /// New player with an empty board. The name is fixed for the player's lifetime.
    pub fn new(id: ConnectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            board: Board::new(),
        }
    }

    /// Connection that owns this player.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Discard the board so the player can be matched again.
    pub fn reset_board(&mut self) {
        self.board = Board::new();
    }
}
