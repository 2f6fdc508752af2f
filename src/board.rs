use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coord::Coord;
use crate::error::MoveError;
use crate::movegen;
use crate::piece::{Color, Piece, PieceKind};
use crate::BOARD_SIZE;

const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen,
    PieceKind::King, PieceKind::Bishop, PieceKind::Knight, PieceKind::Rook,
];

// --- Move Representation ---

/// A move as produced by the generator.
///
/// `capture` is `None` for a quiet move, equal to `to` for an ordinary
/// capture, and the skipped pawn's square for an en passant capture.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub capture: Option<Coord>,
}

impl Move {
    pub fn quiet(from: Coord, to: Coord) -> Self { Move { from, to, capture: None } }

    pub fn capture(from: Coord, to: Coord) -> Self { Move { from, to, capture: Some(to) } }

    pub fn en_passant(from: Coord, to: Coord, victim: Coord) -> Self { Move { from, to, capture: Some(victim) } }

    pub fn is_capture(&self) -> bool { self.capture.is_some() }

    pub fn is_en_passant(&self) -> bool { self.capture.is_some_and(|sq| sq != self.to) }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_en_passant() {
            write!(f, "{}x{} e.p.", self.from, self.to)
        } else if self.is_capture() {
            write!(f, "{}x{}", self.from, self.to)
        } else {
            write!(f, "{}{}", self.from, self.to)
        }
    }
}

// --- Board Engine ---

/// The board, the side to move and the en passant target.
///
/// The grid is row-major: `squares[row][col]`, row 0 being White's home rank.
/// Each value is a signed piece code (see [`Piece::code`]), `0` for empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    squares: [[i8; BOARD_SIZE]; BOARD_SIZE],
    turn: Color,
    en_passant: Option<Coord>,
}

/// Unchecked wire form of a [`Board`]; deserialization goes through `TryFrom`.
#[derive(Deserialize)]
struct RawBoard {
    squares: [[i8; BOARD_SIZE]; BOARD_SIZE],
    turn: Color,
    en_passant: Option<Coord>,
}

impl TryFrom<RawBoard> for Board {
    type Error = MoveError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let mut board = Board::from_squares(raw.squares, raw.turn)?;
        if let Some(ep) = raw.en_passant {
            board.check_en_passant_target(ep)?;
            board.en_passant = Some(ep);
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self { Board::new() }
}

impl Board {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        let mut board = Board::empty(Color::White);
        for color in [Color::White, Color::Black] {
            let home = color.home_row() as usize;
            let pawns = color.pawn_start_row() as usize;
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.squares[home][col] = Piece::new(*kind, color).code();
                board.squares[pawns][col] = Piece::new(PieceKind::Pawn, color).code();
            }
        }
        board
    }

    /// A board with no pieces on it.
    pub fn empty(turn: Color) -> Self {
        Board { squares: [[0; BOARD_SIZE]; BOARD_SIZE], turn, en_passant: None }
    }

    /// Builds a board from raw square values, rejecting anything outside `-6..=6`.
    pub fn from_squares(squares: [[i8; BOARD_SIZE]; BOARD_SIZE], turn: Color) -> Result<Self, MoveError> {
        for value in squares.iter().flatten() {
            Piece::from_code(*value)?;
        }
        Ok(Board { squares, turn, en_passant: None })
    }

    /// Puts `piece` on `sq` (or clears it), for setting up positions.
    pub fn place(&mut self, sq: Coord, piece: Option<Piece>) -> Result<(), MoveError> {
        let sq = Coord::new(sq.row, sq.col)?;
        self.set(sq, piece);
        Ok(())
    }

    /// `sq` must already be on the board.
    fn set(&mut self, sq: Coord, piece: Option<Piece>) {
        let (r, c) = sq.index();
        self.squares[r][c] = piece.map_or(0, |p| p.code());
    }

    /// An en passant target must be the empty square a pawn of the side that
    /// just moved skipped over: start row empty behind it, the pawn just past it.
    fn check_en_passant_target(&self, ep: Coord) -> Result<(), MoveError> {
        let mover = self.turn.opponent();
        let dir = mover.pawn_direction();
        let pawn = Piece::new(PieceKind::Pawn, mover);
        let ep = Coord::new(ep.row, ep.col)?;
        let consistent = ep.row == mover.pawn_start_row() + dir
            && self.piece_at(ep).is_none()
            && ep.offset(-dir, 0).is_some_and(|start| self.piece_at(start).is_none())
            && ep.offset(dir, 0).is_some_and(|landed| self.piece_at(landed) == Some(pawn));
        if consistent {
            Ok(())
        } else {
            Err(MoveError::InconsistentState(
                format!("en passant target {} has no double advance behind it", ep)))
        }
    }

    // --- Read Access ---

    pub fn squares(&self) -> &[[i8; BOARD_SIZE]; BOARD_SIZE] { &self.squares }

    pub fn turn(&self) -> Color { self.turn }

    /// Square skipped by a double pawn advance on the previous ply, if any.
    pub fn en_passant(&self) -> Option<Coord> { self.en_passant }

    /// Raw signed value at `sq`, `None` when `sq` is off the board.
    pub fn value_at(&self, sq: Coord) -> Option<i8> {
        if sq.row < 0 || sq.col < 0 { return None; }
        self.squares.get(sq.row as usize)?.get(sq.col as usize).copied()
    }

    pub fn piece_at(&self, sq: Coord) -> Option<Piece> {
        // `place`, `from_squares` and deserialization all validate values.
        self.value_at(sq).and_then(|v| Piece::from_code(v).ok().flatten())
    }

    // --- Move Generation ---

    /// All pseudo-legal moves for the side to move, in scan order.
    pub fn generate_moves(&self) -> Vec<Move> {
        movegen::generate_pseudo_legal_moves(self, self.turn, self.en_passant)
    }

    /// Pseudo-legal moves for either color. The en passant target belongs to
    /// the side to move, so it is ignored when generating for the other side.
    pub fn generate_moves_for(&self, color: Color) -> Vec<Move> {
        let en_passant = if color == self.turn { self.en_passant } else { None };
        movegen::generate_pseudo_legal_moves(self, color, en_passant)
    }

    /// The generated move going from `from` to `to`, carrying its capture square.
    pub fn find_move(&self, from: Coord, to: Coord) -> Option<Move> {
        self.generate_moves().into_iter().find(|m| m.from == from && m.to == to)
    }

    // --- Move Application ---

    /// Applies `mv` without checking it against the generator, returning the
    /// captured piece. Fails if the source square is empty or belongs to the
    /// side not to move; the board is unchanged on error.
    pub fn apply_move(&mut self, mv: Move) -> Result<Option<Piece>, MoveError> {
        for sq in [Some(mv.from), Some(mv.to), mv.capture].into_iter().flatten() {
            Coord::new(sq.row, sq.col)?;
        }
        let moving = self.piece_at(mv.from)
            .ok_or_else(|| MoveError::InconsistentState(format!("no piece on {}", mv.from)))?;
        if moving.color != self.turn {
            return Err(MoveError::InconsistentState(
                format!("{} on {} does not belong to {}", moving, mv.from, self.turn)));
        }

        // Clear the capture square first: for en passant it is not the target.
        let captured = match mv.capture {
            Some(sq) => {
                let victim = self.piece_at(sq);
                self.set(sq, None);
                victim
            }
            None => None,
        };
        self.set(mv.to, Some(moving));
        self.set(mv.from, None);

        self.en_passant = if moving.kind == PieceKind::Pawn && (mv.to.row - mv.from.row).abs() == 2 {
            Some(Coord { row: (mv.from.row + mv.to.row) / 2, col: mv.from.col })
        } else {
            None
        };
        if let Some(ep) = self.en_passant {
            debug!("en passant target set to {}", ep);
        }

        debug!("{} played {}{}", self.turn, mv,
            captured.map_or(String::new(), |p| format!(", capturing {}", p)));
        self.turn = self.turn.opponent();
        Ok(captured)
    }

    /// Plays `requested` only if it is among the freshly generated moves.
    /// A rejected selection leaves the board unchanged.
    pub fn play(&mut self, requested: Move) -> Result<Option<Piece>, MoveError> {
        if !self.generate_moves().contains(&requested) {
            warn!("rejected selection {} for {}", requested, self.turn);
            return Err(MoveError::IllegalSelection(requested.to_string()));
        }
        self.apply_move(requested)
    }

    /// Counts leaf nodes of the pseudo-legal move tree `depth` plies deep.
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 { return 1; }
        let moves = self.generate_moves();
        if depth == 1 { return moves.len() as u64; }
        moves.into_iter()
            .map(|mv| {
                let mut next = self.clone();
                match next.apply_move(mv) {
                    Ok(_) => next.perft(depth - 1),
                    Err(_) => 0,
                }
            })
            .sum()
    }
}
