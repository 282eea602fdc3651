use std::sync::{Arc, Mutex};

use fleet::client::{
    classify_input, random_fleet, ClientEvent, EffectPlayer, EffectQueue, FrameParser, InputAction,
    Screen, ScreenOp, LOBBY_PROMPT,
};
use fleet::{Board, Reply, Effect, MAX_SHIPS};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::time::{Duration, Instant};

const DELAY: Duration = Duration::from_secs(3);

fn feed(parser: &mut FrameParser, text: &str) -> Vec<ClientEvent> {
    text.lines().filter_map(|line| parser.push(line)).collect()
}

#[test]
fn test_frame_parser_groups_payloads() {
    let mut parser = FrameParser::new();
    let text = format!(
        "{}\n\n{}\n{}",
        "[WAITING] - Looking for opponent...",
        Reply::Display("row 1\nrow 2".into()),
        Reply::Effect(Effect::Hit),
    );
    let events = feed(&mut parser, &text);
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[0],
        ClientEvent::Line("[WAITING] - Looking for opponent...".into())
    );
    assert_eq!(events[1], ClientEvent::Display("row 1\nrow 2\n".into()));
    assert!(matches!(&events[2], ClientEvent::Effect(banner) if banner.contains("HIT")));
}

#[test]
fn test_frame_parser_keeps_blank_lines_inside_frames() {
    let mut parser = FrameParser::new();
    let events = feed(&mut parser, "DISPLAY_UPDATE\na\n\nb\nEND_DISPLAY");
    assert_eq!(events, vec![ClientEvent::Display("a\n\nb\n".into())]);
}

#[test]
fn test_reset_aborts_partial_frame() {
    let mut parser = FrameParser::new();
    let events = feed(
        &mut parser,
        "EFFECT_UPDATE\nhalf a banner\nOPPONENT_DISCONNECTED\nGAME_RESET\n[WAITING] - x",
    );
    assert_eq!(
        events,
        vec![
            ClientEvent::OpponentDisconnected,
            ClientEvent::GameReset,
            ClientEvent::Line("[WAITING] - x".into()),
        ]
    );
}

#[test]
fn test_effects_play_in_order_then_held_display() {
    let start = Instant::now();
    let mut queue = EffectQueue::new(DELAY);

    assert_eq!(
        queue.handle(ClientEvent::Effect("one".into()), start),
        vec![ScreenOp::Frame("one".into())]
    );
    assert!(queue.handle(ClientEvent::Effect("two".into()), start).is_empty());
    assert!(queue.handle(ClientEvent::Display("board".into()), start).is_empty());
    assert!(queue.handle(ClientEvent::Line("[TURN] - x".into()), start).is_empty());
    assert_eq!(queue.pending(), 1);
    assert_eq!(queue.deadline(), Some(start + DELAY));

    assert!(queue.advance(start + DELAY / 2).is_empty());
    assert_eq!(
        queue.advance(start + DELAY),
        vec![ScreenOp::Frame("two".into())]
    );
    assert_eq!(
        queue.advance(start + DELAY * 2),
        vec![ScreenOp::Frame("board".into())]
    );
    assert!(!queue.is_showing());
    assert_eq!(
        queue.handle(ClientEvent::Line("[TURN] - y".into()), start + DELAY * 2),
        vec![ScreenOp::Print("[TURN] - y".into())]
    );
}

#[test]
fn test_idle_display_draws_immediately() {
    let mut queue = EffectQueue::new(DELAY);
    assert_eq!(
        queue.handle(ClientEvent::Display("board".into()), Instant::now()),
        vec![ScreenOp::Frame("board".into())]
    );
}

#[test]
fn test_reset_cancels_pending_effects() {
    let start = Instant::now();
    let mut queue = EffectQueue::new(DELAY);
    queue.handle(ClientEvent::Effect("one".into()), start);
    queue.handle(ClientEvent::Effect("two".into()), start);
    queue.handle(ClientEvent::Display("board".into()), start);

    let ops = queue.handle(ClientEvent::OpponentDisconnected, start);
    assert!(matches!(&ops[..], [ScreenOp::Frame(text)] if text.contains("Opponent disconnected!")));
    assert_eq!(
        queue.handle(ClientEvent::GameReset, start),
        vec![ScreenOp::Frame(LOBBY_PROMPT.into())]
    );
    assert!(!queue.is_showing());
    assert_eq!(queue.pending(), 0);
    assert!(queue.advance(start + DELAY * 10).is_empty());
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<ScreenOp>>>);

impl Screen for Recorder {
    fn apply(&mut self, op: ScreenOp) {
        self.0.lock().unwrap().push(op);
    }
}

#[tokio::test]
async fn test_effect_player_holds_display_until_banner_expires() {
    let recorder = Recorder::default();
    let player = EffectPlayer::spawn(Duration::from_millis(50), recorder.clone());
    player.submit(ClientEvent::Effect("boom".into()));
    player.submit(ClientEvent::Display("board".into()));

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(
        *recorder.0.lock().unwrap(),
        vec![ScreenOp::Frame("boom".into())]
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    player.shutdown().await;
    assert_eq!(
        *recorder.0.lock().unwrap(),
        vec![
            ScreenOp::Frame("boom".into()),
            ScreenOp::Frame("board".into()),
        ]
    );
}

#[test]
fn test_classify_input() {
    assert_eq!(classify_input("  "), InputAction::Ignore);
    assert_eq!(classify_input("quit"), InputAction::Quit);
    assert_eq!(classify_input("/exit"), InputAction::Quit);
    assert_eq!(classify_input(" /auto "), InputAction::AutoPlace);
    assert_eq!(
        classify_input("/fire B2 "),
        InputAction::Send("/fire B2".into())
    );
}

#[test]
fn test_random_fleet_is_placeable() {
    for seed in 0..32 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = random_fleet(&mut rng);
        assert_eq!(fleet.len(), MAX_SHIPS);
        let mut board = Board::new();
        for cell in &fleet {
            assert!(board.place_ship(cell.row(), cell.col()), "seed {}: {}", seed, cell);
        }
        assert!(board.fleet_complete());
    }
}
