//! Two-player match state machine: `Placing -> Playing -> Finished`.

use crate::board::Cell;
use crate::common::{GameError, Phase, Side};
use crate::coordinate::{parse_cell, Coordinate};
use crate::player::Player;
use crate::registry::ConnectionId;

/// Result of an accepted shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    pub shooter: Side,
    pub at: Coordinate,
    /// `WaterHit` or `ShipHit`.
    pub cell: Cell,
}

impl Shot {
    pub fn is_hit(&self) -> bool {
        self.cell == Cell::ShipHit
    }
}

/// Read-only projection of a game from one player's seat.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub me: &'a Player,
    pub opponent: &'a Player,
    pub phase: Phase,
    pub my_turn: bool,
}

/// Core match state: both players, whose turn it is and the current phase.
#[derive(Debug, Clone)]
pub struct Game {
    players: [Player; 2],
    current_turn: Side,
    phase: Phase,
}

impl Game {
    /// Seat two players; `first` moves first once combat begins.
    pub fn new(first: Player, second: Player) -> Self {
        Self {
            players: [first, second],
            current_turn: Side::First,
            phase: Phase::Placing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// Seat occupied by the given connection, if any.
    pub fn side_of(&self, id: ConnectionId) -> Option<Side> {
        if self.players[0].id() == id {
            Some(Side::First)
        } else if self.players[1].id() == id {
            Some(Side::Second)
        } else {
            None
        }
    }

    /// Give both players back, in seat order.
    pub fn into_players(self) -> [Player; 2] {
        self.players
    }

    /// Decode `token` and place a ship on `side`'s board. Moves the game to
    /// `Playing` once both fleets are complete. Placement never advances the turn.
    pub fn place_ship_for(&mut self, side: Side, token: &str) -> Result<Coordinate, GameError> {
        let at = parse_cell(token)?;
        let board = self.players[side.index()].board_mut();
        if !board.place_ship(at.row(), at.col()) {
            return Err(GameError::PlacementRejected(at.to_string()));
        }
        if self.phase == Phase::Placing && self.players.iter().all(|p| p.board().fleet_complete())
        {
            self.phase = Phase::Playing;
        }
        Ok(at)
    }

    /// Fire at the opponent of `shooter` without checking phase or turn.
    /// Finishes the game when the opponent's last ship is hit.
    pub fn fire_at_opponent(&mut self, shooter: ConnectionId, token: &str) -> Result<Shot, GameError> {
        let side = self.side_of(shooter).ok_or(GameError::InvalidParticipant)?;
        let at = parse_cell(token)?;
        let cell = self.players[side.other().index()].board_mut().fire(at);
        if self.is_game_over().is_some() {
            self.phase = Phase::Finished;
        }
        Ok(Shot {
            shooter: side,
            at,
            cell,
        })
    }

    /// Guarded shot: requires `Playing` and that `shooter` holds the turn,
    /// then fires and passes the turn. Nothing changes on error.
    pub fn take_shot(&mut self, shooter: ConnectionId, token: &str) -> Result<Shot, GameError> {
        let side = self.side_of(shooter).ok_or(GameError::InvalidParticipant)?;
        if self.phase != Phase::Playing {
            return Err(GameError::WrongPhase {
                expected: Phase::Playing,
            });
        }
        if self.current_turn != side {
            return Err(GameError::NotYourTurn);
        }
        let shot = self.fire_at_opponent(shooter, token)?;
        self.switch_turn();
        Ok(shot)
    }

    /// Toggle the turn and return the side now to move.
    pub fn switch_turn(&mut self) -> Side {
        self.current_turn = self.current_turn.other();
        self.current_turn
    }

    /// Winner, once one fleet is fully destroyed. Boards with no ships yet
    /// do not count while the game is still placing.
    pub fn is_game_over(&self) -> Option<Side> {
        if self.phase == Phase::Placing {
            return None;
        }
        if self.players[0].board().all_ships_destroyed() {
            Some(Side::Second)
        } else if self.players[1].board().all_ships_destroyed() {
            Some(Side::First)
        } else {
            None
        }
    }

    /// Project the game onto `side`'s seat: `side` becomes `me` and the turn
    /// flag is expressed relative to it.
    pub fn view_for(&self, side: Side) -> GameView<'_> {
        GameView {
            me: self.player(side),
            opponent: self.player(side.other()),
            phase: self.phase,
            my_turn: self.current_turn == side,
        }
    }
}
