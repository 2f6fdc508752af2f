use std::collections::HashSet;

use economy_chess::coord::parse_square;
use economy_chess::{Board, Color, Coord, Game, Move, MoveError, Piece, PieceKind};

fn sq(s: &str) -> Coord {
    parse_square(s).unwrap()
}

/// Builds a board from `(square, letter)` pairs, uppercase for White.
fn setup(turn: Color, pieces: &[(&str, char)]) -> Board {
    let mut board = Board::empty(turn);
    for &(square, letter) in pieces {
        board.place(sq(square), Piece::from_char(letter)).unwrap();
    }
    board
}

/// Checks that `moves` and `expected` hold the same squares in the same order.
fn moves_match(board: &Board, moves: &[Move], expected: &[&str]) {
    let got: Vec<String> = moves.iter().map(|m| format!("{}{}", m.from, m.to)).collect();
    assert_eq!(got, expected, "\nPosition:\n{:?}", board.squares());
}

#[test]
fn perft_counts_from_the_start_position() {
    let board = Board::new();
    assert_eq!(board.perft(1), 20);
    assert_eq!(board.perft(2), 400);
    assert_eq!(board.perft(3), 8902);
}

#[test]
fn opening_moves_in_scan_order() {
    let board = Board::new();
    moves_match(&board, &board.generate_moves(), &[
        "b1a3", "b1c3", "g1f3", "g1h3",
        "a2a3", "a2a4", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4",
        "e2e3", "e2e4", "f2f3", "f2f4", "g2g3", "g2g4", "h2h3", "h2h4",
    ]);
    assert!(board.generate_moves().iter().all(|m| !m.is_capture()));
}

#[test]
fn black_opening_moves_mirror_white() {
    let mut board = Board::new();
    board.play(Move::quiet(sq("a2"), sq("a3"))).unwrap();
    let moves = board.generate_moves();
    assert_eq!(moves.len(), 20);
    // Row 6 pawns are scanned before the row 7 knights.
    assert_eq!(format!("{}{}", moves[0].from, moves[0].to), "a7a6");
    assert_eq!(format!("{}{}", moves[16].from, moves[16].to), "b8a6");
}

#[test]
fn no_slide_passes_through_an_occupied_square() {
    let board = setup(Color::White, &[
        ("d4", 'Q'), ("d6", 'p'), ("f4", 'P'), ("b2", 'n'), ("f6", 'K'), ("a4", 'r'),
    ]);
    let moves = board.generate_moves();
    let queen: Vec<&Move> = moves.iter().filter(|m| m.from == sq("d4")).collect();
    let targets: HashSet<String> = queen.iter().map(|m| m.to.to_string()).collect();

    for beyond in ["d7", "d8", "g4", "h4", "a1", "g7", "h8"] {
        assert!(!targets.contains(beyond), "queen slid through to {}", beyond);
    }
    for reachable in ["d5", "d6", "e4", "c4", "b4", "a4", "c3", "b2", "e5"] {
        assert!(targets.contains(reachable), "queen should reach {}", reachable);
    }
    assert!(!targets.contains("f4") && !targets.contains("f6"));

    let captures: HashSet<String> = queen.iter().filter(|m| m.is_capture()).map(|m| m.to.to_string()).collect();
    let expected: HashSet<String> = ["d6", "a4", "b2"].iter().map(|s| s.to_string()).collect();
    assert_eq!(captures, expected);
}

#[test]
fn en_passant_round_trip() {
    // White pawn on e2, black pawn waiting on f4.
    let mut board = setup(Color::White, &[("e1", 'K'), ("e8", 'k'), ("e2", 'P'), ("f4", 'p')]);

    board.play(Move::quiet(sq("e2"), sq("e4"))).unwrap();
    assert_eq!(board.en_passant(), Some(Coord { row: 2, col: 4 }));
    assert_eq!(board.turn(), Color::Black);

    let ep = board.generate_moves().into_iter()
        .find(|m| m.from == sq("f4") && m.to == sq("e3"))
        .expect("diagonal into the skipped square is generated");
    assert_eq!(ep.capture, Some(Coord { row: 3, col: 4 }));

    let captured = board.play(ep).unwrap();
    assert_eq!(captured, Some(Piece::new(PieceKind::Pawn, Color::White)));
    assert_eq!(board.value_at(Coord { row: 2, col: 4 }), Some(-6));
    assert_eq!(board.value_at(Coord { row: 3, col: 4 }), Some(0));
    assert_eq!(board.turn(), Color::White);
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut board = setup(Color::White, &[("e1", 'K'), ("e8", 'k'), ("e2", 'P'), ("d4", 'p')]);
    board.play(Move::quiet(sq("e2"), sq("e4"))).unwrap();
    assert!(board.find_move(sq("d4"), sq("e3")).is_some());

    // Black declines, both kings shuffle, the chance is gone for good.
    board.play(Move::quiet(sq("e8"), sq("d8"))).unwrap();
    assert_eq!(board.en_passant(), None);
    board.play(Move::quiet(sq("e1"), sq("d1"))).unwrap();
    assert_eq!(board.en_passant(), None);
    assert_eq!(board.find_move(sq("d4"), sq("e3")), None);
    assert_eq!(
        board.play(Move::en_passant(sq("d4"), sq("e3"), sq("e4"))),
        Err(MoveError::IllegalSelection("d4xe3 e.p.".to_string())),
    );
}

#[test]
fn white_en_passant_captures_upward() {
    let mut board = setup(Color::Black, &[("e1", 'K'), ("e8", 'k'), ("d7", 'p'), ("e5", 'P')]);
    board.play(Move::quiet(sq("d7"), sq("d5"))).unwrap();
    assert_eq!(board.en_passant(), Some(sq("d6")));

    let ep = board.find_move(sq("e5"), sq("d6")).unwrap();
    assert_eq!(ep, Move::en_passant(sq("e5"), sq("d6"), sq("d5")));
    board.play(ep).unwrap();
    assert_eq!(board.piece_at(sq("d5")), None);
    assert_eq!(board.piece_at(sq("d6")), Some(Piece::new(PieceKind::Pawn, Color::White)));
}

#[test]
fn kings_can_be_captured_pseudo_legally() {
    let mut game = Game::from_board(setup(Color::White, &[("a1", 'R'), ("a8", 'k'), ("h1", 'K')]));
    let captured = game.play_text("a1a8").unwrap();
    assert_eq!(captured, Some(Piece::new(PieceKind::King, Color::Black)));
    // The engine does not end the game; Black simply has no pieces to move.
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.board().turn(), Color::Black);
}

#[test]
fn random_games_keep_the_board_consistent() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut game = Game::new();
    for ply in 0..120 {
        let Some(mv) = game.random_move(&mut rng) else { break };
        let mover = game.board().turn();
        game.play_move(mv).unwrap();
        assert_eq!(game.board().turn(), mover.opponent(), "ply {}", ply);
        assert!(game.board().squares().iter().flatten().all(|v| (-6..=6).contains(v)));
        if let Some(ep) = game.board().en_passant() {
            let last = game.history().last().unwrap().mv;
            assert_eq!(ep, Coord { row: (last.from.row + last.to.row) / 2, col: last.from.col });
        }
    }
}
