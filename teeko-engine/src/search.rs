//! Fixed-depth minimax search.
//!
//! The search walks the game tree with a single board, applying and
//! undoing each trial move in place. Values are always from the
//! searching piece's perspective: +1 a win for it, -1 a win for the
//! opponent, 0 undecided within the horizon.

use teeko_core::{Board, Move, Piece};

use crate::movegen::MoveGenerator;
use crate::stats::SearchStats;

/// Search values, from the searching piece's perspective.
pub const WIN_SELF: i8 = 1;
pub const UNDECIDED: i8 = 0;
pub const WIN_OPPONENT: i8 = -1;

/// Deepest level that still expands successors. The root is level 0,
/// so the search scores positions up to 4 plies ahead.
pub const MAX_DEPTH: u8 = 3;

/// Minimax search for one side.
pub struct Search {
    /// The piece the search plays for
    my_piece: Piece,
    /// Search statistics
    pub stats: SearchStats,
}

impl Search {
    pub fn new(my_piece: Piece) -> Self {
        Self {
            my_piece,
            stats: SearchStats::default(),
        }
    }

    /// Evaluate a position, returning its value and the chosen move.
    ///
    /// `incoming` is the move that produced this position; leaves hand
    /// it back unchanged so interior nodes can pair each child value
    /// with its own candidate move. At the root pass `None`.
    ///
    /// `my_turn` is true when the searching piece is to move.
    /// `piece_count` must match the board; the recursion bumps it for
    /// drops and leaves it unchanged for slides.
    ///
    /// The board is restored before returning.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        my_turn: bool,
        piece_count: u8,
        incoming: Option<Move>,
    ) -> (i8, Option<Move>) {
        debug_assert_eq!(piece_count, board.piece_count());

        // Score the position before anything else: a decided board is
        // a leaf even below the depth limit.
        let val = board.outcome_for(self.my_piece);
        if depth > MAX_DEPTH || val != UNDECIDED {
            self.stats.record_leaf(val, depth);
            return (val, incoming);
        }
        self.stats.nodes_expanded += 1;

        let mover = if my_turn {
            self.my_piece
        } else {
            self.my_piece.opponent()
        };
        let want = if my_turn { WIN_SELF } else { WIN_OPPONENT };

        let mut fallback: Option<(i8, Move)> = None;
        let mut gen = MoveGenerator::new(mover, piece_count);

        while let Some(mov) = gen.next(board) {
            let next_count = match mov {
                Move::Drop { .. } => piece_count + 1,
                Move::Slide { .. } => piece_count,
            };

            let undo = board.apply(mov, mover);
            let (value, _) = self.minimax(board, depth + 1, !my_turn, next_count, Some(mov));
            board.undo(&undo);

            // The mover found a forced win: stop scanning siblings.
            if value == want {
                self.stats.early_exits += 1;
                return (value, Some(mov));
            }

            // Any undecided candidate displaces the current fallback;
            // otherwise only the first candidate seeds it.
            if value == UNDECIDED || fallback.is_none() {
                fallback = Some((value, mov));
            }
        }

        match fallback {
            Some((value, mov)) => (value, Some(mov)),
            // The mover has no legal move at all.
            None => (UNDECIDED, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teeko_core::Pos;

    #[test]
    fn test_decided_root_is_leaf() {
        let mut board = Board::from_rows(["bbbb ", "     ", "     ", "rr   ", "r    "]);
        let mut search = Search::new(Piece::Black);

        let (value, mov) = search.minimax(&mut board, 0, true, 7, None);
        assert_eq!(value, WIN_SELF);
        assert_eq!(mov, None);
        assert_eq!(search.stats.leaf_nodes, 1);
        assert_eq!(search.stats.nodes_expanded, 0);

        // Same board scored for the other side.
        let mut search = Search::new(Piece::Red);
        let (value, _) = search.minimax(&mut board, 0, true, 7, None);
        assert_eq!(value, WIN_OPPONENT);
    }

    #[test]
    fn test_empty_board_keeps_last_undecided() {
        let mut board = Board::new();
        let before = board;
        let mut search = Search::new(Piece::Black);

        // Nothing inside the horizon can be decided from an empty
        // board, so every candidate scores 0 and each one displaces
        // the fallback; the final choice is the last drop scanned.
        let (value, mov) = search.minimax(&mut board, 0, true, 0, None);
        assert_eq!(value, UNDECIDED);
        assert_eq!(
            mov,
            Some(Move::Drop {
                to: Pos::from_row_col(4, 4)
            })
        );
        assert_eq!(board, before);

        assert_eq!(search.stats.early_exits, 0);
        assert_eq!(search.stats.win_leaves, 0);
        assert_eq!(search.stats.loss_leaves, 0);
        assert_eq!(search.stats.max_depth, 4);
        assert_eq!(
            search.stats.total_nodes(),
            search.stats.nodes_expanded + search.stats.leaf_nodes
        );
    }

    #[test]
    fn test_takes_immediate_drop_win() {
        let mut board = Board::from_rows(["bbb  ", "rrr  ", "     ", "     ", "     "]);
        let mut search = Search::new(Piece::Black);

        // (0,3) is the first empty cell scanned and completes the row.
        let (value, mov) = search.minimax(&mut board, 0, true, 6, None);
        assert_eq!(value, WIN_SELF);
        assert_eq!(
            mov,
            Some(Move::Drop {
                to: Pos::from_row_col(0, 3)
            })
        );
        assert!(search.stats.early_exits >= 1);
    }

    #[test]
    fn test_finds_box_completion() {
        // Black completes the 2x2 box at (1,3)/(1,4)/(2,3)/(2,4) by
        // sliding (2,2) into (2,3). Earlier candidates all score 0
        // because red can answer every single threat they create.
        let mut board = Board::from_rows(["  r  ", "   bb", "  b b", "  r  ", "rr   "]);
        let mut search = Search::new(Piece::Black);

        let (value, mov) = search.minimax(&mut board, 0, true, 8, None);
        assert_eq!(value, WIN_SELF);
        assert_eq!(
            mov,
            Some(Move::Slide {
                from: Pos::from_row_col(2, 2),
                to: Pos::from_row_col(2, 3)
            })
        );
    }

    #[test]
    fn test_blocks_opponent_row_threat() {
        // Red threatens (1,3)->(0,3) finishing the top row. Black's
        // only non-losing candidate is taking (0,3) first; earlier
        // losing candidates seed the fallback and the blocking move
        // displaces them.
        let mut board = Board::from_rows(["rrr  ", "  br ", " b   ", "     ", "b   b"]);
        let mut search = Search::new(Piece::Black);

        let (value, mov) = search.minimax(&mut board, 0, true, 8, None);
        assert_eq!(value, UNDECIDED);
        assert_eq!(
            mov,
            Some(Move::Slide {
                from: Pos::from_row_col(1, 2),
                to: Pos::from_row_col(0, 3)
            })
        );
    }
}
