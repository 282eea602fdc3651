//! Text rendering of a player's view of a game.

use std::fmt::Write;

use crate::board::{Board, Cell};
use crate::common::Phase;
use crate::config::{BOARD_SIZE, MAX_SHIPS};
use crate::game::GameView;

const RULE: &str = "==========================================================";
const GAP: &str = "          ";

/// Unrevealed boards show only cells that have been fired on.
fn cell_char(cell: Cell, reveal: bool) -> char {
    if !reveal && !cell.is_fired() {
        return '~';
    }
    match cell {
        Cell::Empty => '~',
        Cell::ShipPresent => 'S',
        Cell::WaterHit => 'O',
        Cell::ShipHit => 'X',
    }
}

fn board_row(board: &Board, row: usize, reveal: bool) -> String {
    let mut line = format!("{:2}", row + 1);
    for cell in board.rows()[row] {
        line.push(' ');
        line.push(cell_char(cell, reveal));
    }
    line
}

fn column_header() -> String {
    let mut line = String::from("  ");
    for c in 0..BOARD_SIZE {
        line.push(' ');
        line.push((b'A' + c as u8) as char);
    }
    line
}

/// Render both boards side by side from the viewer's seat. Own ships are
/// shown; on the opponent board only resolved shots are revealed.
pub fn render(view: &GameView<'_>) -> String {
    let mut out = String::new();
    let turn = match view.phase {
        Phase::Playing if view.my_turn => view.me.name(),
        Phase::Playing => view.opponent.name(),
        _ => "-",
    };
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "Player: {} vs {} | Phase: {} | Turn: {}",
        view.me.name(),
        view.opponent.name(),
        view.phase,
        turn
    );
    let _ = writeln!(out, "{}", RULE);

    let width = column_header().len();
    let _ = writeln!(out, "{:<width$}{}{}", "Your Board:", GAP, "Opponent's Board:");
    let _ = writeln!(out, "{}{}{}", column_header(), GAP, column_header());
    for row in 0..BOARD_SIZE {
        let _ = writeln!(
            out,
            "{}{}{}",
            board_row(view.me.board(), row, true),
            GAP,
            board_row(view.opponent.board(), row, false)
        );
    }

    let mine = format!(
        "Ships: {} placed, {} afloat",
        view.me.board().ships_placed(),
        view.me.board().live_ships()
    );
    let theirs = format!(
        "Enemy ships placed: {}/{}",
        view.opponent.board().ships_placed(),
        MAX_SHIPS
    );
    let _ = writeln!(out, "{:<width$}{}{}", mine, GAP, theirs);
    let _ = writeln!(out);
    let _ = write!(out, "Commands: /ready, /set A1, /fire B2");
    out
}
