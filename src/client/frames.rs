//! Reassembly of server output into whole events.

use crate::protocol::{
    DISPLAY_BEGIN, DISPLAY_END, EFFECT_BEGIN, EFFECT_END, GAME_RESET, OPPONENT_DISCONNECTED,
};

/// A complete unit of server output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Ordinary tagged line such as `[WAITING] - ...`.
    Line(String),
    /// Board payload, one `\n`-terminated line per row.
    Display(String),
    /// Banner payload.
    Effect(String),
    OpponentDisconnected,
    GameReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    Normal,
    Display,
    Effect,
}

/// Buffers framed payloads until their closing sentinel arrives.
#[derive(Debug, Default)]
pub struct FrameParser {
    mode: Mode,
    buffer: String,
}

impl FrameParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (without newline). Returns an event once one is complete.
    pub fn push(&mut self, line: &str) -> Option<ClientEvent> {
        // reset sentinels win even inside an unterminated frame
        if line == OPPONENT_DISCONNECTED || line == GAME_RESET {
            self.mode = Mode::Normal;
            self.buffer.clear();
            return Some(if line == GAME_RESET {
                ClientEvent::GameReset
            } else {
                ClientEvent::OpponentDisconnected
            });
        }

        match (self.mode, line) {
            (Mode::Normal, EFFECT_BEGIN) => self.begin(Mode::Effect),
            (Mode::Normal, DISPLAY_BEGIN) => self.begin(Mode::Display),
            (Mode::Effect, EFFECT_END) => Some(ClientEvent::Effect(self.finish())),
            (Mode::Display, DISPLAY_END) => Some(ClientEvent::Display(self.finish())),
            (Mode::Effect, _) | (Mode::Display, _) => {
                self.buffer.push_str(line);
                self.buffer.push('\n');
                None
            }
            (Mode::Normal, "") => None,
            (Mode::Normal, _) => Some(ClientEvent::Line(line.to_string())),
        }
    }

    fn begin(&mut self, mode: Mode) -> Option<ClientEvent> {
        self.mode = mode;
        self.buffer.clear();
        None
    }

    fn finish(&mut self) -> String {
        self.mode = Mode::Normal;
        std::mem::take(&mut self.buffer)
    }
}
