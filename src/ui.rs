use std::fmt::Write;

use crate::{
    board::Board,
    common::ShotOutcome,
    config::BOARD_SIZE,
    coordinate::Coordinate,
    game::{GameState, MatchResult, Phase},
};

/// Glyph for one cell. `reveal` shows unshot ship segments.
fn cell_glyph(board: &Board, coord: Coordinate, reveal: bool) -> char {
    match board.outcome_at(coord) {
        Some(ShotOutcome::Miss) => 'o',
        Some(ShotOutcome::Sunk(_)) => '#',
        Some(ShotOutcome::Hit(t)) => {
            if board.ship(t).is_some_and(|s| s.is_sunk()) {
                '#'
            } else {
                'X'
            }
        }
        None if reveal && board.ship_at(coord).is_some() => 'S',
        None => '.',
    }
}

/// Render `board` as a lettered grid:
/// `.` unknown, `o` miss, `X` hit, `#` sunk, `S` ship (only with `reveal`).
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::from("   ");
    for col in 0..BOARD_SIZE {
        out.push(' ');
        out.push((b'A' + col) as char);
    }
    out.push('\n');
    for row in 0..BOARD_SIZE {
        let _ = write!(out, "{:>2} ", row + 1);
        for col in 0..BOARD_SIZE {
            out.push(' ');
            if let Some(coord) = Coordinate::new(col, row) {
                out.push(cell_glyph(board, coord, reveal));
            }
        }
        out.push('\n');
    }
    out
}

/// Both boards with a status line, as the local player sees them.
pub fn render_game(game: &GameState) -> String {
    let mut out = String::new();
    out.push_str("Enemy waters:\n");
    out.push_str(&render_board(game.remote_board(), false));
    out.push_str("\nYour fleet:\n");
    out.push_str(&render_board(game.local_board(), true));
    out.push('\n');
    out.push_str(&render_status(game));
    out.push('\n');
    out
}

pub fn render_status(game: &GameState) -> String {
    match (game.phase(), game.result()) {
        (Phase::Idle, _) => "Setting up".to_string(),
        (Phase::InGame, _) if game.is_locals_turn() => "Your turn".to_string(),
        (Phase::InGame, _) => "Waiting for the enemy".to_string(),
        (Phase::Finished, Some(MatchResult::Won)) => "You won!".to_string(),
        (Phase::Finished, Some(MatchResult::Lost)) => "You lost.".to_string(),
        (Phase::Finished, _) => "Match abandoned".to_string(),
    }
}
