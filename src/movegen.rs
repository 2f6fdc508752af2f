//! Pseudo-legal move generation.
//!
//! Moves obey each piece's geometry and never land on a friendly piece, but
//! nothing here checks whether the mover's own king is left en prise.
//! The output order is part of the contract: squares are scanned row 0..7,
//! column 0..7, and each piece emits its moves in direction-table order.

use crate::board::{Board, Move};
use crate::coord::Coord;
use crate::piece::{Color, Piece, PieceKind};

// --- Direction Tables ---

/// One-square steps for the king, as (row delta, column delta).
pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

pub const KNIGHT_STEPS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    ( 1, -2), ( 1, 2), ( 2, -1), ( 2, 1),
];

pub const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Rook directions followed by bishop directions.
pub const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

/// How a piece moves, with just the data its generator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mover {
    Step(&'static [(i8, i8)]),
    Slide(&'static [(i8, i8)]),
    Pawn { direction: i8, start_row: i8 },
}

impl Mover {
    fn of(piece: Piece) -> Mover {
        match piece.kind {
            PieceKind::King => Mover::Step(&KING_STEPS),
            PieceKind::Knight => Mover::Step(&KNIGHT_STEPS),
            PieceKind::Queen => Mover::Slide(&QUEEN_DIRS),
            PieceKind::Rook => Mover::Slide(&ROOK_DIRS),
            PieceKind::Bishop => Mover::Slide(&BISHOP_DIRS),
            PieceKind::Pawn => Mover::Pawn {
                direction: piece.color.pawn_direction(),
                start_row: piece.color.pawn_start_row(),
            },
        }
    }
}

/// What a candidate target square holds, from the scanning side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occupant { Empty, Enemy, Friendly }

#[inline]
fn occupant(board: &Board, sq: Coord, color: Color) -> Occupant {
    match board.piece_at(sq) {
        None => Occupant::Empty,
        Some(p) if p.color == color => Occupant::Friendly,
        Some(_) => Occupant::Enemy,
    }
}

// --- Generation Driver ---

/// Generates every pseudo-legal move for `color`.
///
/// Friendly and enemy squares are judged against `color`, never against the
/// sign of the piece being moved. `en_passant` is only honoured by the caller
/// when `color` is the side to move.
pub(crate) fn generate_pseudo_legal_moves(board: &Board, color: Color, en_passant: Option<Coord>) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for from in Coord::all() {
        match board.piece_at(from) {
            Some(piece) if piece.color == color => {
                generate_moves_for_piece(board, from, piece, en_passant, &mut moves);
            }
            _ => {}
        }
    }
    moves
}

#[inline]
fn generate_moves_for_piece(board: &Board, from: Coord, piece: Piece, en_passant: Option<Coord>, moves: &mut Vec<Move>) {
    match Mover::of(piece) {
        Mover::Step(steps) => generate_step_moves(board, from, piece.color, steps, moves),
        Mover::Slide(dirs) => generate_sliding_moves(board, from, piece.color, dirs, moves),
        Mover::Pawn { direction, start_row } => {
            generate_pawn_moves(board, from, piece.color, direction, start_row, en_passant, moves)
        }
    }
}

// --- Per-Piece Generators ---

/// King and knight moves: each offset independently, empty or enemy targets only.
fn generate_step_moves(board: &Board, from: Coord, color: Color, steps: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(dr, dc) in steps {
        let Some(to) = from.offset(dr, dc) else { continue };
        match occupant(board, to, color) {
            Occupant::Empty => moves.push(Move::quiet(from, to)),
            Occupant::Enemy => moves.push(Move::capture(from, to)),
            Occupant::Friendly => {}
        }
    }
}

/// Rook, bishop and queen rays. Each ray ends at the first occupied square,
/// which is included only when it holds an enemy piece.
fn generate_sliding_moves(board: &Board, from: Coord, color: Color, dirs: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(dr, dc) in dirs {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            match occupant(board, next, color) {
                Occupant::Empty => moves.push(Move::quiet(from, next)),
                Occupant::Enemy => {
                    moves.push(Move::capture(from, next));
                    break;
                }
                Occupant::Friendly => break,
            }
            current = next;
        }
    }
}

/// Single and double advances, then diagonal captures toward column-1 and column+1.
fn generate_pawn_moves(
    board: &Board,
    from: Coord,
    color: Color,
    direction: i8,
    start_row: i8,
    en_passant: Option<Coord>,
    moves: &mut Vec<Move>,
) {
    if let Some(one) = from.offset(direction, 0) {
        if occupant(board, one, color) == Occupant::Empty {
            moves.push(Move::quiet(from, one));
            // The double step needs both squares empty; no jumping.
            if from.row == start_row {
                if let Some(two) = from.offset(2 * direction, 0) {
                    if occupant(board, two, color) == Occupant::Empty {
                        moves.push(Move::quiet(from, two));
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        let Some(to) = from.offset(direction, dc) else { continue };
        match occupant(board, to, color) {
            Occupant::Enemy => moves.push(Move::capture(from, to)),
            Occupant::Empty if en_passant == Some(to) => {
                // The skipped pawn sits on our current row, in the target's column.
                let victim = Coord { row: from.row, col: to.col };
                moves.push(Move::en_passant(from, to, victim));
            }
            _ => {}
        }
    }
}
