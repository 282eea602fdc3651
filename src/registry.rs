//! Process-wide session state: named players, running games, the waiting
//! slot, and each connection's outbound queue.
//!
//! A [`Registry`] is plain data; callers share it as [`SharedRegistry`] and
//! hold the lock for the whole of one command, so every operation here is
//! atomic with respect to other connections. Outbound lines are only queued
//! while the lock is held; per-connection writer tasks do the actual I/O.

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc, Mutex};

use crate::common::{GameError, Side};
use crate::display;
use crate::game::Game;
use crate::player::Player;
use crate::protocol::Reply;

/// Identity of one accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wrap a raw id. The registry allocates ids for live connections; this
    /// is for building games outside of one.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}

/// Identity of one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "game#{}", self.0)
    }
}

/// Sending half of a connection's bounded outbound line queue, plus the
/// signal that tells the connection's tasks to shut down.
#[derive(Debug, Clone)]
pub struct Outbox {
    lines: mpsc::Sender<String>,
    close: broadcast::Sender<()>,
}

impl Outbox {
    /// New outbox holding up to `capacity` undelivered lines, and the
    /// receiving end its writer drains.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (lines, queue) = mpsc::channel(capacity);
        let (close, _) = broadcast::channel(1);
        (Self { lines, close }, queue)
    }

    /// Fires once the connection is to be dropped. Also resolves when the
    /// outbox itself is gone.
    pub fn subscribe_close(&self) -> broadcast::Receiver<()> {
        self.close.subscribe()
    }
}

pub type SharedRegistry = Arc<Mutex<Registry>>;

/// Outcome of a `/ready` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyOutcome {
    /// Caller took the empty waiting slot.
    Waiting,
    /// Caller was already the one waiting.
    StillWaiting,
    /// Caller was paired with the waiting connection.
    Matched {
        game: GameId,
        first: ConnectionId,
        second: ConnectionId,
    },
}

#[derive(Debug, Default)]
pub struct Registry {
    next_connection: u64,
    next_game: u64,
    outboxes: HashMap<ConnectionId, Outbox>,
    /// Named players not seated in a game. Seated players live in their game.
    idle: HashMap<ConnectionId, Player>,
    games: HashMap<GameId, Game>,
    bindings: HashMap<ConnectionId, GameId>,
    waiting: Option<ConnectionId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedRegistry {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Register a new connection and its outbound queue.
    pub fn connect(&mut self, outbox: Outbox) -> ConnectionId {
        self.next_connection += 1;
        let id = ConnectionId(self.next_connection);
        self.outboxes.insert(id, outbox);
        id
    }

    /// Create the connection's player. A connection names itself exactly once.
    pub fn register_name(&mut self, id: ConnectionId, name: &str) -> Result<(), GameError> {
        if self.has_player(id) {
            return Err(GameError::NameAlreadySet);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::MissingArgument("/name YourName"));
        }
        info!("{} registered as {:?}", id, name);
        self.idle.insert(id, Player::new(id, name));
        Ok(())
    }

    pub fn has_player(&self, id: ConnectionId) -> bool {
        self.idle.contains_key(&id) || self.bindings.contains_key(&id)
    }

    /// Display name of the connection's player, wherever it currently lives.
    pub fn player_name(&self, id: ConnectionId) -> Option<&str> {
        if let Some(player) = self.idle.get(&id) {
            return Some(player.name());
        }
        let game = self.games.get(self.bindings.get(&id)?)?;
        game.side_of(id).map(|side| game.player(side).name())
    }

    /// Matchmaking: take the waiting slot or pair with whoever holds it.
    pub fn ready(&mut self, id: ConnectionId) -> Result<ReadyOutcome, GameError> {
        if !self.has_player(id) {
            return Err(GameError::NoNameSet);
        }
        if self.waiting == Some(id) {
            return Ok(ReadyOutcome::StillWaiting);
        }
        if self.bindings.contains_key(&id) {
            return Err(GameError::AlreadyInGame);
        }

        let waiting = match self.waiting.take() {
            Some(other) if self.idle.contains_key(&other) => other,
            _ => {
                self.waiting = Some(id);
                debug!("{} is waiting for an opponent", id);
                return Ok(ReadyOutcome::Waiting);
            }
        };

        // both are idle: `waiting` by the guard above, `id` because it is named and unbound
        let (Some(mut first), Some(mut second)) =
            (self.idle.remove(&waiting), self.idle.remove(&id))
        else {
            return Err(GameError::NoNameSet);
        };
        first.reset_board();
        second.reset_board();

        self.next_game += 1;
        let game_id = GameId(self.next_game);
        info!(
            "{}: {} ({}) vs {} ({})",
            game_id,
            first.name(),
            waiting,
            second.name(),
            id
        );
        self.games.insert(game_id, Game::new(first, second));
        self.bindings.insert(waiting, game_id);
        self.bindings.insert(id, game_id);

        Ok(ReadyOutcome::Matched {
            game: game_id,
            first: waiting,
            second: id,
        })
    }

    /// Game the connection is seated in, if any.
    pub fn find_game_for(&self, id: ConnectionId) -> Option<GameId> {
        self.bindings.get(&id).copied()
    }

    pub fn game(&self, game_id: GameId) -> Option<&Game> {
        self.games.get(&game_id)
    }

    pub fn game_mut(&mut self, game_id: GameId) -> Option<&mut Game> {
        self.games.get_mut(&game_id)
    }

    /// Both connections of a game, in seat order.
    pub fn connections(&self, game_id: GameId) -> Option<[ConnectionId; 2]> {
        let game = self.games.get(&game_id)?;
        Some([game.player(Side::First).id(), game.player(Side::Second).id()])
    }

    /// Remove a game and return both players to the pre-match state with
    /// fresh boards. Returns the two connections that were seated.
    pub fn finish_game(&mut self, game_id: GameId) -> Option<[ConnectionId; 2]> {
        let game = self.games.remove(&game_id)?;
        info!("{} torn down", game_id);
        let ids = [game.player(Side::First).id(), game.player(Side::Second).id()];
        for mut player in game.into_players() {
            self.bindings.remove(&player.id());
            player.reset_board();
            self.idle.insert(player.id(), player);
        }
        Some(ids)
    }

    /// Forget a closed connection. When it was seated in a game, the game is
    /// dropped and the surviving opponent's connection is returned; that
    /// player is back in the pre-match state.
    pub fn on_disconnect(&mut self, id: ConnectionId) -> Option<ConnectionId> {
        self.outboxes.remove(&id);
        self.idle.remove(&id);
        if self.waiting == Some(id) {
            self.waiting = None;
        }
        let game_id = self.bindings.get(&id).copied()?;
        let [first, second] = self.finish_game(game_id)?;
        self.idle.remove(&id);
        let survivor = if first == id { second } else { first };
        info!("{} left {}; {} returns to the lobby", id, game_id, survivor);
        Some(survivor)
    }

    /// Queue a reply for one connection. Closed connections are skipped; a
    /// connection whose queue is full has stopped reading and is told to close.
    pub fn send(&self, id: ConnectionId, reply: &Reply) {
        let Some(outbox) = self.outboxes.get(&id) else {
            return;
        };
        match outbox.lines.try_send(reply.to_string()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!("{} outbox full, closing connection", id);
                if outbox.close.send(()).is_err() {
                    debug!("{} already closing", id);
                }
            }
            Err(TrySendError::Closed(_)) => debug!("{} outbox closed, dropping reply", id),
        }
    }

    /// Queue the same reply for both players of a game.
    pub fn broadcast(&self, game_id: GameId, reply: &Reply) {
        if let Some(ids) = self.connections(game_id) {
            for id in ids {
                self.send(id, reply);
            }
        }
    }

    /// Render the game from each seat and queue it for that seat.
    pub fn send_views(&self, game_id: GameId) {
        let Some(game) = self.games.get(&game_id) else {
            return;
        };
        for side in [Side::First, Side::Second] {
            let view = game.view_for(side);
            self.send(view.me.id(), &Reply::Display(display::render(&view)));
        }
    }

    /// All running games.
    pub fn games(&self) -> impl Iterator<Item = (GameId, &Game)> + '_ {
        self.games.iter().map(|(id, game)| (*id, game))
    }

    pub fn waiting(&self) -> Option<ConnectionId> {
        self.waiting
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    pub fn connection_count(&self) -> usize {
        self.outboxes.len()
    }
}
