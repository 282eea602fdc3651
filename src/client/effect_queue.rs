//! Client-side sequencing of effect banners and board redraws.
//!
//! Effects are shown one at a time, each for a fixed delay. A board display
//! arriving meanwhile is held and drawn once the queue is empty; plain lines
//! are suppressed while a banner is on screen. A session reset cancels
//! everything pending.

use std::collections::VecDeque;
use std::future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};

use super::frames::ClientEvent;

pub const LOBBY_PROMPT: &str = concat!(
    "============================== FLEET ==============================\n",
    "Type '/ready' if you're ready for war or '/quit' to exit\n",
    "===================================================================\n",
);

/// What to do to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOp {
    /// Print below whatever is shown.
    Print(String),
    /// Clear the screen, then print.
    Frame(String),
}

/// Pure state of the effect sequencer; time is passed in by the caller.
#[derive(Debug)]
pub struct EffectQueue {
    delay: Duration,
    effects: VecDeque<String>,
    held_display: Option<String>,
    showing_until: Option<Instant>,
}

impl EffectQueue {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            effects: VecDeque::new(),
            held_display: None,
            showing_until: None,
        }
    }

    /// When the banner on screen expires, if one is shown.
    pub fn deadline(&self) -> Option<Instant> {
        self.showing_until
    }

    pub fn is_showing(&self) -> bool {
        self.showing_until.is_some()
    }

    pub fn pending(&self) -> usize {
        self.effects.len()
    }

    pub fn handle(&mut self, event: ClientEvent, now: Instant) -> Vec<ScreenOp> {
        match event {
            ClientEvent::Line(line) if self.is_showing() => {
                log::debug!("suppressed while effect is shown: {}", line);
                Vec::new()
            }
            ClientEvent::Line(line) => vec![ScreenOp::Print(line)],
            ClientEvent::Display(board) if self.is_showing() => {
                self.held_display = Some(board);
                Vec::new()
            }
            ClientEvent::Display(board) => vec![ScreenOp::Frame(board)],
            ClientEvent::Effect(banner) => {
                self.effects.push_back(banner);
                if self.is_showing() {
                    Vec::new()
                } else {
                    self.show_next(now)
                }
            }
            ClientEvent::OpponentDisconnected => {
                self.cancel();
                vec![ScreenOp::Frame(format!(
                    "---------------------\nOpponent disconnected!\n---------------------\n\n{}",
                    LOBBY_PROMPT
                ))]
            }
            ClientEvent::GameReset => {
                self.cancel();
                vec![ScreenOp::Frame(LOBBY_PROMPT.to_string())]
            }
        }
    }

    /// Move on once the current banner's time is up.
    pub fn advance(&mut self, now: Instant) -> Vec<ScreenOp> {
        match self.showing_until {
            Some(until) if now >= until => self.show_next(now),
            _ => Vec::new(),
        }
    }

    fn show_next(&mut self, now: Instant) -> Vec<ScreenOp> {
        match self.effects.pop_front() {
            Some(banner) => {
                self.showing_until = Some(now + self.delay);
                vec![ScreenOp::Frame(banner)]
            }
            None => {
                self.showing_until = None;
                self.held_display.take().map(ScreenOp::Frame).into_iter().collect()
            }
        }
    }

    fn cancel(&mut self) {
        self.effects.clear();
        self.held_display = None;
        self.showing_until = None;
    }
}

/// Output device for the client.
pub trait Screen: Send + 'static {
    fn apply(&mut self, op: ScreenOp);
}

/// Stdout with ANSI clear-screen for frames.
pub struct Terminal;

impl Screen for Terminal {
    fn apply(&mut self, op: ScreenOp) {
        match op {
            ScreenOp::Print(line) => println!("{}", line),
            ScreenOp::Frame(text) => {
                print!("\x1b[2J\x1b[H");
                print!("{}", text);
                if !text.ends_with('\n') {
                    println!();
                }
            }
        }
    }
}

/// Single task that owns an [`EffectQueue`] and drives a [`Screen`].
pub struct EffectPlayer {
    events: mpsc::UnboundedSender<ClientEvent>,
    task: JoinHandle<()>,
}

impl EffectPlayer {
    pub fn spawn<S: Screen>(delay: Duration, screen: S) -> Self {
        let (events, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(EffectQueue::new(delay), screen, rx));
        Self { events, task }
    }

    pub fn submit(&self, event: ClientEvent) {
        let _ = self.events.send(event);
    }

    /// Stop accepting events, let pending ones be applied, and wait for the task.
    pub async fn shutdown(self) {
        drop(self.events);
        let _ = self.task.await;
    }
}

async fn run<S: Screen>(
    mut queue: EffectQueue,
    mut screen: S,
    mut events: mpsc::UnboundedReceiver<ClientEvent>,
) {
    loop {
        let deadline = queue.deadline();
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    for op in queue.handle(event, Instant::now()) {
                        screen.apply(op);
                    }
                }
                None => break,
            },
            _ = wait_for(deadline) => {
                for op in queue.advance(Instant::now()) {
                    screen.apply(op);
                }
            }
        }
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending().await,
    }
}
