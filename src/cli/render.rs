use std::fmt::Write;
use std::string::String;

use crate::board::Board;
use crate::common::Coord;
use crate::config::BOARD_SIZE;
use crate::events::TurnIndicator;
use crate::game::{GameSession, Phase};

fn cell_char(board: &Board, at: Coord, reveal: bool) -> char {
    let Ok(cell) = board.cell(at.x, at.y) else {
        return '?';
    };
    match (cell.was_shot(), cell.is_occupied()) {
        (true, true) => 'X',
        (true, false) => 'o',
        (false, true) if reveal => 'S',
        _ => '.',
    }
}

/// Draw `board` as text. Ships are only drawn when `reveal` is set.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "    ╔═══════════════════════╗");
    let _ = write!(out, "    ║  ");
    for x in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + x as u8) as char);
    }
    let _ = writeln!(out, " ║");
    let _ = writeln!(out, "    ╠═══════════════════════╣");
    for y in 0..BOARD_SIZE {
        let _ = write!(out, "    ║ {:2}", y + 1);
        for x in 0..BOARD_SIZE {
            let _ = write!(out, " {}", cell_char(board, Coord::new(x, y), reveal));
        }
        let _ = writeln!(out, " ║");
    }
    let _ = writeln!(out, "    ╚═══════════════════════╝");
    if reveal {
        let _ = writeln!(out, "    Legend: S=Ship  X=Hit  o=Miss  .=Water");
    } else {
        let _ = writeln!(out, "    Legend: X=Hit  o=Miss  .=Unknown");
    }
    let _ = writeln!(
        out,
        "    Ships afloat: {}/{}",
        board.ships_remaining(),
        board.fleet_size()
    );
    out
}

/// Text for a turn indicator label.
pub fn turn_label(indicator: TurnIndicator) -> &'static str {
    match indicator {
        TurnIndicator::Player => "Your Turn",
        TurnIndicator::Enemy => "Enemy's Turn",
        TurnIndicator::Paused => "Game Paused",
    }
}

/// Enemy board on top, own board below, followed by a status line.
pub fn render_session(session: &GameSession) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Enemy board:");
    out.push_str(&render_board(session.enemy_board(), false));
    let _ = writeln!(out, "\nYour board:");
    out.push_str(&render_board(session.player_board(), true));
    let status = match session.phase() {
        Phase::Setup => match session.next_ship_size() {
            Some(size) => std::format!(
                "Place your ships: next size {} ({} left)",
                size,
                session.ships_to_place()
            ),
            None => "Place your ships".into(),
        },
        Phase::Playing if session.is_paused() => turn_label(TurnIndicator::Paused).into(),
        Phase::Playing => turn_label(TurnIndicator::Player).into(),
        Phase::Finished(outcome) => std::format!("Game over: {:?}", outcome),
    };
    let _ = writeln!(out, "\n{}", status);
    out
}

pub fn print_session(session: &GameSession) {
    std::print!("{}", render_session(session));
}
