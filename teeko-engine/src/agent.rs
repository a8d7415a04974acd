//! Game-facing AI player.
//!
//! An [`Agent`] owns the authoritative board for one game: it searches
//! for and plays its own moves, and validates then applies the
//! opponent's. Both sides' moves flow through the same bookkeeping so
//! the piece count always matches the board.

use std::error::Error;
use std::fmt;

use rand::Rng;

use teeko_core::{Board, Move, Phase, Piece};

use crate::search::Search;
use crate::stats::SearchStats;

/// Why an opponent move was rejected. The board is left untouched
/// when any of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveError {
    /// Slide source does not hold one of the mover's pieces.
    NotYourPiece,
    /// Slide destination is more than one cell away.
    NotAdjacent,
    /// Destination cell is already occupied.
    Occupied,
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveError::NotYourPiece => write!(f, "You don't have a piece there!"),
            IllegalMoveError::NotAdjacent => {
                write!(f, "Illegal move: Can only move to an adjacent space")
            }
            IllegalMoveError::Occupied => write!(f, "Illegal move detected"),
        }
    }
}

impl Error for IllegalMoveError {}

/// The move an agent settled on, with the search evidence behind it.
pub struct Decision {
    /// The move that was played
    pub mov: Move,
    /// Search value of the chosen line
    pub value: i8,
    /// Statistics from the underlying search
    pub stats: SearchStats,
}

/// A Teeko player that tracks one game and searches for its moves.
pub struct Agent {
    my_piece: Piece,
    opp_piece: Piece,
    board: Board,
    piece_count: u8,
}

impl Agent {
    /// Create an agent with a randomly assigned color.
    pub fn new() -> Self {
        let my_piece = if rand::rng().random_range(0..2) == 0 {
            Piece::Black
        } else {
            Piece::Red
        };
        Self::with_piece(my_piece)
    }

    /// Create an agent playing the given color.
    pub fn with_piece(my_piece: Piece) -> Self {
        Self {
            my_piece,
            opp_piece: my_piece.opponent(),
            board: Board::new(),
            piece_count: 0,
        }
    }

    #[inline]
    pub fn my_piece(&self) -> Piece {
        self.my_piece
    }

    #[inline]
    pub fn opponent_piece(&self) -> Piece {
        self.opp_piece
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_count(&self) -> u8 {
        self.piece_count
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        Phase::from_piece_count(self.piece_count)
    }

    /// Current winner, if the game has been decided.
    pub fn winner(&self) -> Option<Piece> {
        self.board.check_winner()
    }

    /// Search for the agent's move, play it, and return the decision.
    /// Returns None when the agent has no legal move.
    pub fn decide_move(&mut self) -> Option<Decision> {
        let mut scratch = self.board;
        let mut search = Search::new(self.my_piece);
        let (value, mov) = search.minimax(&mut scratch, 0, true, self.piece_count, None);
        debug_assert_eq!(scratch, self.board);

        let mov = mov?;
        self.place(mov, self.my_piece);
        Some(Decision {
            mov,
            value,
            stats: search.stats,
        })
    }

    /// Validate the opponent's move and apply it.
    ///
    /// Checks run in a fixed order: slide source ownership, slide
    /// adjacency, then destination emptiness. Drops skip the first
    /// two. The caller builds drops only in the drop phase and slides
    /// only in the move phase.
    pub fn apply_opponent_move(&mut self, mov: Move) -> Result<(), IllegalMoveError> {
        if let Move::Slide { from, to } = mov {
            if self.board.cell(from) != Some(self.opp_piece) {
                return Err(IllegalMoveError::NotYourPiece);
            }
            let dr = (from.row() as i8 - to.row() as i8).abs();
            let dc = (from.col() as i8 - to.col() as i8).abs();
            if dr > 1 || dc > 1 {
                return Err(IllegalMoveError::NotAdjacent);
            }
        }
        if !self.board.is_empty(mov.to()) {
            return Err(IllegalMoveError::Occupied);
        }

        self.place(mov, self.opp_piece);
        Ok(())
    }

    /// Apply a validated move and keep the piece count in step.
    fn place(&mut self, mov: Move, piece: Piece) {
        match mov {
            Move::Drop { to } => {
                self.board.set_cell(to, Some(piece));
                self.piece_count += 1;
            }
            Move::Slide { from, to } => {
                self.board.set_cell(from, None);
                self.board.set_cell(to, Some(piece));
            }
        }
        debug_assert_eq!(self.piece_count, self.board.piece_count());
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::new()
    }
}
