//! Per-connection command loop and protocol dispatch.

use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite, WriteHalf};
use tokio::sync::{broadcast, mpsc};
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::common::{GameError, Phase, Side};
use crate::config::MAX_SHIPS;
use crate::effects::Effect;
use crate::protocol::{Command, Reply};
use crate::registry::{ConnectionId, GameId, Outbox, ReadyOutcome, Registry, SharedRegistry};
use crate::transport::{CommandCodec, Inbound};

/// Serve one client until its stream closes or its outbox overflows, then
/// release everything the connection held and tell a seated opponent.
pub async fn handle_connection<S>(
    stream: S,
    registry: SharedRegistry,
    max_line_length: usize,
    outbox_capacity: usize,
) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (read_half, write_half) = tokio::io::split(stream);
    let (outbox, queue) = Outbox::channel(outbox_capacity);
    let mut close = outbox.subscribe_close();
    let writer_close = outbox.subscribe_close();
    let id = registry.lock().await.connect(outbox);
    debug!("{} attached", id);

    tokio::spawn(write_outbox(id, write_half, queue, writer_close));

    let mut lines = FramedRead::new(read_half, CommandCodec::new(max_line_length));
    loop {
        let next = tokio::select! {
            _ = close.recv() => {
                warn!("{} stopped reading replies, dropping connection", id);
                break;
            }
            next = lines.next() => next,
        };
        match next {
            Some(Ok(Inbound::Line(line))) => {
                debug!("{} -> {}", id, line);
                let mut registry = registry.lock().await;
                dispatch(&mut registry, id, &line);
            }
            Some(Ok(Inbound::Malformed)) => {
                let registry = registry.lock().await;
                registry.send(
                    id,
                    &Reply::Error(GameError::UnknownCommand(String::new())),
                );
            }
            Some(Err(e)) => {
                debug!("{} read failed: {}", id, e);
                break;
            }
            None => break,
        }
    }

    let mut registry = registry.lock().await;
    if let Some(survivor) = registry.on_disconnect(id) {
        registry.send(survivor, &Reply::OpponentDisconnected);
        registry.send(survivor, &Reply::GameReset);
    }
    info!("{} disconnected", id);
    Ok(())
}

/// Drain a connection's outbox to its socket. Stops on the outbox's close
/// signal, which also fires once the registry drops the outbox, and on the
/// first failed write.
async fn write_outbox<W>(
    id: ConnectionId,
    write_half: WriteHalf<W>,
    mut queue: mpsc::Receiver<String>,
    mut close: broadcast::Receiver<()>,
)
where
    W: AsyncRead + AsyncWrite,
{
    let mut sink = FramedWrite::new(write_half, CommandCodec::default());
    tokio::select! {
        _ = close.recv() => debug!("{} writer closed", id),
        _ = async {
            while let Some(line) = queue.recv().await {
                if let Err(e) = sink.send(line).await {
                    warn!("{} write failed: {}", id, e);
                    break;
                }
            }
        } => {}
    }
}

/// Execute one command line on behalf of `id`. Errors become an `[ERROR]`
/// reply to the caller; nothing here ends the connection.
pub fn dispatch(registry: &mut Registry, id: ConnectionId, line: &str) {
    let result = Command::parse(line).and_then(|command| execute(registry, id, command));
    if let Err(err) = result {
        debug!("{} rejected: {}", id, err);
        registry.send(id, &Reply::Error(err));
    }
}

fn execute(registry: &mut Registry, id: ConnectionId, command: Command) -> Result<(), GameError> {
    match command {
        Command::Name(name) => {
            registry.register_name(id, &name)?;
            registry.send(id, &Reply::NameSet { name });
            Ok(())
        }
        Command::Ready => on_ready(registry, id),
        Command::Set(token) => on_set(registry, id, &token),
        Command::Fire(token) => on_fire(registry, id, &token),
    }
}

fn on_ready(registry: &mut Registry, id: ConnectionId) -> Result<(), GameError> {
    match registry.ready(id)? {
        ReadyOutcome::Waiting | ReadyOutcome::StillWaiting => {
            registry.send(id, &Reply::Waiting);
        }
        ReadyOutcome::Matched { game, first, second } => {
            for (me, opponent) in [(first, second), (second, first)] {
                let opponent = registry.player_name(opponent).unwrap_or_default().to_string();
                registry.send(me, &Reply::GameStart { opponent });
            }
            registry.broadcast(game, &Reply::Effect(Effect::GameStart));
            registry.send_views(game);
        }
    }
    Ok(())
}

/// Seated game and side of `id`.
fn seat(registry: &Registry, id: ConnectionId) -> Result<(GameId, Side), GameError> {
    let game_id = registry.find_game_for(id).ok_or(GameError::NotInGame)?;
    let side = registry
        .game(game_id)
        .ok_or(GameError::NotInGame)?
        .side_of(id)
        .ok_or(GameError::InvalidParticipant)?;
    Ok((game_id, side))
}

fn on_set(registry: &mut Registry, id: ConnectionId, token: &str) -> Result<(), GameError> {
    let (game_id, side) = seat(registry, id)?;
    let game = registry.game_mut(game_id).ok_or(GameError::NotInGame)?;
    if game.phase() != Phase::Placing {
        return Err(GameError::WrongPhase {
            expected: Phase::Placing,
        });
    }
    let at = game.place_ship_for(side, token)?;
    let placed = game.player(side).board().ships_placed();
    let combat_started = game.phase() == Phase::Playing;

    registry.send(
        id,
        &Reply::ShipPlaced {
            at,
            placed,
            quota: MAX_SHIPS,
        },
    );
    if combat_started {
        info!("{} entering combat", game_id);
        registry.broadcast(game_id, &Reply::CombatStart);
        registry.broadcast(game_id, &Reply::Effect(Effect::CombatStart));
        send_turn_notices(registry, game_id);
    }
    registry.send_views(game_id);
    Ok(())
}

fn on_fire(registry: &mut Registry, id: ConnectionId, token: &str) -> Result<(), GameError> {
    let (game_id, side) = seat(registry, id)?;
    let game = registry.game_mut(game_id).ok_or(GameError::NotInGame)?;
    let shot = game.take_shot(id, token)?;
    let winner = game.is_game_over();
    let shooter = game.player(side).name().to_string();
    let target = game.player(side.other()).id();
    let winner = winner.map(|w| (game.player(w).id(), game.player(w).name().to_string()));
    info!("{}: {} fired at {}: {:?}", game_id, shooter, shot.at, shot.cell);

    let hit = shot.is_hit();
    registry.send(id, &Reply::ShotResult { hit, at: shot.at });
    registry.send(
        target,
        &Reply::Incoming {
            shooter,
            hit,
            at: shot.at,
        },
    );
    registry.broadcast(game_id, &Reply::Effect(Effect::for_shot(hit)));
    registry.send_views(game_id);

    match winner {
        Some((winner_id, winner_name)) => {
            info!("{}: {} wins", game_id, winner_name);
            registry.broadcast(game_id, &Reply::GameOver { winner: winner_name });
            if let Some(ids) = registry.connections(game_id) {
                for conn in ids {
                    let effect = if conn == winner_id {
                        Effect::Victory
                    } else {
                        Effect::Defeat
                    };
                    registry.send(conn, &Reply::Effect(effect));
                }
            }
            registry.finish_game(game_id);
        }
        None => send_turn_notices(registry, game_id),
    }
    Ok(())
}

fn send_turn_notices(registry: &Registry, game_id: GameId) {
    let Some(game) = registry.game(game_id) else {
        return;
    };
    let to_move = game.player(game.current_turn());
    let waiting = game.player(game.current_turn().other());
    registry.send(to_move.id(), &Reply::YourTurn);
    registry.send(
        waiting.id(),
        &Reply::OpponentsTurn {
            opponent: to_move.name().to_string(),
        },
    );
}
