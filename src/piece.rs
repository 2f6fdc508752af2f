use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MoveError;

// --- Color ---

/// The two sides. Each side's square values carry its [`Color::sign`].
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color { White, Black }

impl Color {
    /// `+1` for White (the first mover), `-1` for Black.
    pub fn sign(self) -> i8 {
        match self { Color::White => 1, Color::Black => -1 }
    }

    pub fn from_sign(value: i8) -> Option<Color> {
        match value.signum() { 1 => Some(Color::White), -1 => Some(Color::Black), _ => None }
    }

    pub fn opponent(self) -> Color {
        match self { Color::White => Color::Black, Color::Black => Color::White }
    }

    /// Row delta of a forward pawn step.
    pub fn pawn_direction(self) -> i8 { self.sign() }

    /// Row a pawn of this color starts on (and may double-advance from).
    pub fn pawn_start_row(self) -> i8 {
        match self { Color::White => 1, Color::Black => 6 }
    }

    pub fn home_row(self) -> i8 {
        match self { Color::White => 0, Color::Black => 7 }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Color::White => write!(f, "White"), Color::Black => write!(f, "Black") }
    }
}

// --- Piece Kind ---

/// Piece kinds, numbered by the magnitude they take in a square value.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceKind { King = 1, Queen = 2, Rook = 3, Bishop = 4, Knight = 5, Pawn = 6 }

impl PieceKind {
    pub fn magnitude(self) -> i8 { self as i8 }

    pub fn from_magnitude(magnitude: i8) -> Option<PieceKind> {
        match magnitude {
            1 => Some(PieceKind::King), 2 => Some(PieceKind::Queen), 3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Bishop), 5 => Some(PieceKind::Knight), 6 => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

// --- Piece ---

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self { Piece { kind, color } }

    /// Signed square value: magnitude is the kind, sign is the color.
    pub fn code(&self) -> i8 { self.kind.magnitude() * self.color.sign() }

    /// Decodes a square value. `0` is an empty square.
    pub fn from_code(code: i8) -> Result<Option<Piece>, MoveError> {
        if code == 0 { return Ok(None); }
        let kind = PieceKind::from_magnitude(code.saturating_abs())
            .ok_or(MoveError::InvalidSquareValue(code))?;
        // Non-zero, so the sign always resolves.
        let color = Color::from_sign(code).ok_or(MoveError::InvalidSquareValue(code))?;
        Ok(Some(Piece::new(kind, color)))
    }

    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn, 'n' => PieceKind::Knight, 'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook, 'q' => PieceKind::Queen, 'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.kind {
            PieceKind::Pawn => 'p', PieceKind::Knight => 'n', PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r', PieceKind::Queen => 'q', PieceKind::King => 'k',
        };
        let symbol = match self.color {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        };
        write!(f, "{}", symbol)
    }
}
