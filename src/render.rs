//! Text rendering of a [`Board`] for the terminal.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt::Write;

use crate::board::Board;
use crate::coord::Coord;
use crate::piece::{Color, Piece, PieceKind};
use crate::BOARD_SIZE;

lazy_static! {
    /// Glyph for each non-zero square value, 6 kinds x 2 colors.
    static ref PIECE_SYMBOLS: HashMap<i8, char> = {
        let glyphs = [
            (PieceKind::King, '♔', '♚'),
            (PieceKind::Queen, '♕', '♛'),
            (PieceKind::Rook, '♖', '♜'),
            (PieceKind::Bishop, '♗', '♝'),
            (PieceKind::Knight, '♘', '♞'),
            (PieceKind::Pawn, '♙', '♟'),
        ];
        let mut table = HashMap::with_capacity(12);
        for (kind, white, black) in glyphs {
            table.insert(Piece::new(kind, Color::White).code(), white);
            table.insert(Piece::new(kind, Color::Black).code(), black);
        }
        table
    };
}

const LIGHT_SQUARE: char = '◻';
const DARK_SQUARE: char = '◼';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    #[default]
    Symbols,
    /// Piece letters (uppercase White) and `.` for empty squares.
    Ascii,
}

pub fn piece_symbol(code: i8) -> Option<char> {
    PIECE_SYMBOLS.get(&code).copied()
}

/// Neutral marker for an empty square, by parity of `row + col`.
pub fn square_marker(sq: Coord) -> char {
    if (sq.row + sq.col) % 2 == 1 { LIGHT_SQUARE } else { DARK_SQUARE }
}

/// Draws the board with rank 8 at the top and file letters underneath.
pub fn render_board(board: &Board, style: RenderStyle) -> String {
    let mut out = String::new();
    for row in (0..BOARD_SIZE as i8).rev() {
        let _ = write!(out, "{} ", row + 1);
        for col in 0..BOARD_SIZE as i8 {
            let sq = Coord { row, col };
            let cell = match (style, board.piece_at(sq)) {
                (RenderStyle::Symbols, Some(piece)) => piece_symbol(piece.code()).unwrap_or('?'),
                (RenderStyle::Symbols, None) => square_marker(sq),
                (RenderStyle::Ascii, Some(piece)) => piece.to_string().chars().next().unwrap_or('?'),
                (RenderStyle::Ascii, None) => '.',
            };
            let _ = write!(out, " {}", cell);
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out
}
