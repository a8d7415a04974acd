//! Fixture-driven position tests.
//!
//! `positions.json` holds hand-checked board states with their
//! expected winner and per-color move counts. The fixtures pin the
//! win patterns (including the deliberate absence of short diagonal
//! runs) and the move generator against positions worked out on
//! paper.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use teeko_core::{Board, Piece};

#[derive(Debug, Deserialize)]
struct TestData {
    positions: Vec<Position>,
}

#[derive(Debug, Deserialize)]
struct Position {
    description: String,
    rows: Vec<String>,
    piece_count: u8,
    winner: Option<char>,
    #[serde(default)]
    black_moves: Option<usize>,
    #[serde(default)]
    red_moves: Option<usize>,
}

fn load_positions() -> TestData {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/positions.json");
    let file = File::open(&path)
        .unwrap_or_else(|e| panic!("failed to open {}: {}", path.display(), e));
    serde_json::from_reader(BufReader::new(file))
        .unwrap_or_else(|e| panic!("failed to parse {}: {}", path.display(), e))
}

fn board_from_fixture(position: &Position) -> Board {
    assert_eq!(
        position.rows.len(),
        5,
        "{}: fixture must have 5 rows",
        position.description
    );
    Board::from_rows([
        position.rows[0].as_str(),
        position.rows[1].as_str(),
        position.rows[2].as_str(),
        position.rows[3].as_str(),
        position.rows[4].as_str(),
    ])
}

#[test]
fn test_fixture_piece_counts() {
    let data = load_positions();

    for position in &data.positions {
        let board = board_from_fixture(position);
        assert_eq!(
            board.piece_count(),
            position.piece_count,
            "{}: piece count mismatch",
            position.description
        );
    }
}

#[test]
fn test_fixture_winners() {
    let data = load_positions();

    for position in &data.positions {
        let board = board_from_fixture(position);
        let winner = board.check_winner().map(Piece::as_char);
        assert_eq!(
            winner, position.winner,
            "{}: winner mismatch on\n{}",
            position.description, board
        );

        // The signed outcome must agree with the winner from both
        // perspectives.
        for piece in [Piece::Black, Piece::Red] {
            let expected = match position.winner {
                Some(ch) if ch == piece.as_char() => 1,
                Some(_) => -1,
                None => 0,
            };
            assert_eq!(
                board.outcome_for(piece),
                expected,
                "{}: outcome for {:?}",
                position.description,
                piece
            );
        }
    }
}

#[test]
fn test_fixture_move_counts() {
    let data = load_positions();

    for position in &data.positions {
        let board = board_from_fixture(position);

        for (piece, expected) in [
            (Piece::Black, position.black_moves),
            (Piece::Red, position.red_moves),
        ] {
            let Some(expected) = expected else {
                continue;
            };
            let moves = board.legal_moves(piece, position.piece_count);
            assert_eq!(
                moves.len(),
                expected,
                "{}: move count for {:?} on\n{}",
                position.description,
                piece,
                board
            );

            // Every generated move must target an empty cell.
            for mov in &moves {
                assert!(
                    board.is_empty(mov.to()),
                    "{}: move {:?} targets occupied cell",
                    position.description,
                    mov
                );
            }
        }
    }
}
