use std::string::{String, ToString};

use crate::common::Coord;
use crate::config::BOARD_SIZE;
use crate::ship::Orientation;

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A bare coordinate: a placement during setup, a shot during play.
    At {
        at: Coord,
        orientation: Option<Orientation>,
    },
    /// Place the remaining ships at random.
    Random,
    Pause,
    Resume,
    Restart,
    Help,
    Quit,
}

/// Render a coordinate the way the user types it, e.g. `A5`.
pub fn coord_to_string(at: Coord) -> String {
    let col = (b'A' + at.x as u8) as char;
    std::format!("{}{}", col, at.y + 1)
}

/// Parse `A5`-style input: column letter A-J for `x`, row number 1-10 for `y`.
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let x = (col_ch as u8).wrapping_sub(b'A') as usize;
    if x >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Coord::new(x, row - 1))
}

fn parse_orientation(input: &str) -> Result<Orientation, String> {
    match input.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('H') => Ok(Orientation::Horizontal),
        Some('V') => Ok(Orientation::Vertical),
        _ => Err(format!("Invalid orientation '{}' - use H or V", input)),
    }
}

/// Parse one line of input.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("Empty input".to_string());
    };
    let command = match head.to_ascii_lowercase().as_str() {
        "random" | "r" => Command::Random,
        "pause" => Command::Pause,
        "resume" => Command::Resume,
        "restart" => Command::Restart,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        // explicit verbs are optional; the phase decides what a coordinate means
        "place" | "fire" => {
            let Some(target) = parts.next() else {
                return Err(format!("'{}' needs a coordinate (e.g., A5)", head));
            };
            return parse_target(target, parts);
        }
        _ => return parse_target(head, parts),
    };
    match parts.next() {
        Some(extra) => Err(format!("Unexpected input '{}'", extra)),
        None => Ok(command),
    }
}

fn parse_target<'a>(
    head: &str,
    mut parts: impl Iterator<Item = &'a str>,
) -> Result<Command, String> {
    let at = parse_coord(head)?;
    let orientation = parts.next().map(parse_orientation).transpose()?;
    match parts.next() {
        Some(extra) => Err(format!("Unexpected input '{}'", extra)),
        None => Ok(Command::At { at, orientation }),
    }
}
