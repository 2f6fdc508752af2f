use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

use crate::board::{Board, Move};
use crate::coord::{parse_move_text, Coord};
use crate::error::{MoveError, SaveLoadError};
use crate::piece::{Color, Piece};
use crate::render::{render_board, RenderStyle};
use crate::BOARD_SIZE;

// --- Move History ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based ply number.
    pub ply: u32,
    pub color: Color,
    pub notation: String,
    pub mv: Move,
    pub captured: Option<Piece>,
}

/// What gets written to the session log file.
#[derive(Debug, Serialize)]
struct GameLog<'a> {
    moves: &'a [MoveRecord],
    captured_by_white: &'a [Piece],
    captured_by_black: &'a [Piece],
    final_squares: &'a [[i8; BOARD_SIZE]; BOARD_SIZE],
    side_to_move: Color,
    en_passant_target: Option<Coord>,
}

// --- Game Session ---

/// A game in progress: the board plus its move history.
///
/// Every way of selecting a move is checked against a freshly generated move
/// list, and a rejected selection leaves the session untouched.
#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    history: Vec<MoveRecord>,
    captured_by_white: Vec<Piece>,
    captured_by_black: Vec<Piece>,
    pub render_style: RenderStyle,
}

impl Game {
    pub fn new() -> Self { Game::from_board(Board::new()) }

    pub fn from_board(board: Board) -> Self {
        Game {
            board,
            history: Vec::new(),
            captured_by_white: Vec::new(),
            captured_by_black: Vec::new(),
            render_style: RenderStyle::default(),
        }
    }

    pub fn board(&self) -> &Board { &self.board }

    pub fn history(&self) -> &[MoveRecord] { &self.history }

    /// Pieces taken by `color`.
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.captured_by_white,
            Color::Black => &self.captured_by_black,
        }
    }

    /// The pseudo-legal moves offered to the player, numbered in generation
    /// order. Indices into this list are what
    /// [`Game::play_index`] accepts.
    pub fn legal_moves(&self) -> Vec<Move> { self.board.generate_moves() }

    pub fn play_move(&mut self, requested: Move) -> Result<Option<Piece>, MoveError> {
        let color = self.board.turn();
        let captured = self.board.play(requested)?;
        if let Some(piece) = captured {
            match color {
                Color::White => self.captured_by_white.push(piece),
                Color::Black => self.captured_by_black.push(piece),
            }
        }
        self.history.push(MoveRecord {
            ply: self.history.len() as u32 + 1,
            color,
            notation: requested.to_string(),
            mv: requested,
            captured,
        });
        Ok(captured)
    }

    pub fn play_index(&mut self, index: usize) -> Result<Option<Piece>, MoveError> {
        let mv = self.legal_moves().get(index).copied()
            .ok_or_else(|| MoveError::IllegalSelection(format!("#{}", index)))?;
        self.play_move(mv)
    }

    /// Plays coordinate text such as `e2e4`, resolved against the generated moves.
    pub fn play_text(&mut self, input: &str) -> Result<Option<Piece>, MoveError> {
        let (from, to) = parse_move_text(input)?;
        let mv = self.board.find_move(from, to)
            .ok_or_else(|| MoveError::IllegalSelection(format!("{}{}", from, to)))?;
        self.play_move(mv)
    }

    /// A uniformly random generated move, or `None` if the side to move is stuck.
    pub fn random_move<R: Rng>(&self, rng: &mut R) -> Option<Move> {
        let moves = self.legal_moves();
        if moves.is_empty() { return None; }
        Some(moves[rng.random_range(0..moves.len())])
    }

    pub fn log_json(&self) -> Result<String, SaveLoadError> {
        let log = GameLog {
            moves: &self.history,
            captured_by_white: &self.captured_by_white,
            captured_by_black: &self.captured_by_black,
            final_squares: self.board.squares(),
            side_to_move: self.board.turn(),
            en_passant_target: self.board.en_passant(),
        };
        serde_json::to_string_pretty(&log).map_err(SaveLoadError::Serialization)
    }

    /// Saves the move history and final position as pretty-printed JSON.
    pub fn save_log_to_file(&self, filename: &str) -> Result<(), SaveLoadError> {
        let json_data = self.log_json()?;
        fs::write(filename, json_data)
            .map_err(|e| SaveLoadError::Io(filename.to_string(), e))?;
        info!("saved {} plies to {}", self.history.len(), filename);
        Ok(())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Captured by White: ")?;
        for piece in &self.captured_by_white { write!(f, "{} ", piece)?; }
        writeln!(f)?;
        write!(f, "Captured by Black: ")?;
        for piece in &self.captured_by_black { write!(f, "{} ", piece)?; }
        writeln!(f)?;
        writeln!(f, "---------------------")?;

        write!(f, "{}", render_board(&self.board, self.render_style))?;

        writeln!(f, "Turn: {}", self.board.turn())?;
        match self.board.en_passant() {
            Some(sq) => writeln!(f, "En Passant Target: {}", sq)?,
            None => writeln!(f, "En Passant Target: -")?,
        }

        if !self.history.is_empty() {
            writeln!(f, "Move History:")?;
            // A session set up with Black to move opens with "1. ... <move>".
            let offset = match self.history[0].color {
                Color::White => 0,
                Color::Black => {
                    writeln!(f, "1. ... {}", self.history[0].notation)?;
                    1
                }
            };
            for pair in self.history[offset..].chunks(2) {
                let number = (pair[0].ply + offset as u32 + 1) / 2;
                match pair {
                    [white, black] => writeln!(f, "{}. {} {}", number, white.notation, black.notation)?,
                    [single] => writeln!(f, "{}. {}", number, single.notation)?,
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn index_selection_follows_generation_order() {
        let mut game = Game::new();
        // Index 0 is Nb1-a3: the knight on row 0 is scanned before the pawns.
        let first = game.legal_moves()[0];
        assert_eq!(first.to_string(), "b1a3");
        game.play_index(0).unwrap();
        assert_eq!(game.history()[0].notation, "b1a3");
        assert_eq!(game.board().turn(), Color::Black);
    }

    #[test]
    fn out_of_range_index_is_rejected_without_changes() {
        let mut game = Game::new();
        let err = game.play_index(20).unwrap_err();
        assert_eq!(err, MoveError::IllegalSelection("#20".to_string()));
        assert!(game.history().is_empty());
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn text_moves_resolve_capture_squares() {
        let mut game = Game::new();
        for text in ["e2e4", "d7d5"] {
            game.play_text(text).unwrap();
        }
        let captured = game.play_text("e4d5").unwrap();
        assert_eq!(captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert_eq!(game.captured_by(Color::White), &[Piece::new(PieceKind::Pawn, Color::Black)]);
        assert_eq!(game.history()[2].notation, "e4xd5");
    }

    #[test]
    fn unreachable_text_move_is_an_illegal_selection() {
        let mut game = Game::new();
        assert_eq!(game.play_text("e2e5"), Err(MoveError::IllegalSelection("e2e5".to_string())));
        assert!(matches!(game.play_text("castle"), Err(MoveError::InvalidFormat(_))));
        assert!(game.history().is_empty());
    }

    #[test]
    fn random_move_is_one_of_the_generated_moves() {
        let game = Game::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mv = game.random_move(&mut rng).unwrap();
        assert!(game.legal_moves().contains(&mv));
    }

    #[test]
    fn random_move_on_an_empty_board_is_none() {
        let game = Game::from_board(Board::empty(Color::White));
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(game.random_move(&mut rng), None);
    }

    #[test]
    fn log_contains_history_and_final_position() {
        let mut game = Game::new();
        game.play_text("e2e4").unwrap();
        let json: serde_json::Value = serde_json::from_str(&game.log_json().unwrap()).unwrap();
        assert_eq!(json["moves"][0]["notation"], "e2e4");
        assert_eq!(json["moves"][0]["color"], "White");
        assert_eq!(json["side_to_move"], "Black");
        assert_eq!(json["en_passant_target"]["row"], 2);
        assert_eq!(json["final_squares"][3][4], 6);
    }

    #[test]
    fn history_from_a_black_to_move_position_starts_with_ellipsis() {
        let mut board = Board::empty(Color::Black);
        for (s, kind, color) in [
            ("e8", PieceKind::King, Color::Black),
            ("e1", PieceKind::King, Color::White),
            ("a7", PieceKind::Pawn, Color::Black),
            ("h2", PieceKind::Pawn, Color::White),
        ] {
            let sq = crate::coord::parse_square(s).unwrap();
            board.place(sq, Some(Piece::new(kind, color))).unwrap();
        }
        let mut game = Game::from_board(board);
        for text in ["a7a6", "h2h3", "a6a5"] {
            game.play_text(text).unwrap();
        }
        assert_eq!(game.history()[0].color, Color::Black);

        let shown = game.to_string();
        let history = &shown[shown.find("Move History:").unwrap()..];
        assert_eq!(history, "Move History:\n1. ... a7a6\n2. h2h3 a6a5\n");
    }

    #[test]
    fn white_first_history_pairs_moves_per_number() {
        let mut game = Game::new();
        for text in ["e2e4", "e7e5", "g1f3"] {
            game.play_text(text).unwrap();
        }
        let shown = game.to_string();
        let history = &shown[shown.find("Move History:").unwrap()..];
        assert_eq!(history, "Move History:\n1. e2e4 e7e5\n2. g1f3\n");
    }

    #[test]
    fn save_writes_the_log_file() {
        let mut game = Game::new();
        game.play_text("g1f3").unwrap();
        let path = std::env::temp_dir().join(format!("economy_chess_log_{}.json", std::process::id()));
        let path = path.to_str().unwrap().to_string();
        game.save_log_to_file(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("g1f3"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn display_pairs_moves_by_number() {
        let mut game = Game::new();
        for text in ["e2e4", "e7e5", "g1f3"] {
            game.play_text(text).unwrap();
        }
        let text = game.to_string();
        assert!(text.contains("1. e2e4 e7e5"));
        assert!(text.contains("2. g1f3"));
        assert!(text.contains("Turn: Black"));
        assert!(text.contains("En Passant Target: -"));
    }
}
