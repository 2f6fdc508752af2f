//! Pseudo-legal move generation and move application for an 8x8 chess board.
//!
//! The [`Board`] owns the square values, the side to move and the en passant
//! target. Everything else in the crate (text coordinates, rendering, the
//! [`Game`] session and its JSON log) is a consumer of that engine.

pub mod board;
pub mod coord;
pub mod error;
pub mod game;
pub mod movegen;
pub mod piece;
pub mod render;

pub use board::{Board, Move};
pub use coord::Coord;
pub use error::{CommandError, MoveError, SaveLoadError};
pub use game::{Game, MoveRecord};
pub use piece::{Color, Piece, PieceKind};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 8;

/// Default file name for saved session logs.
pub const DEFAULT_LOG_FILENAME: &str = "chess_log.json";
