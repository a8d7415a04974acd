//! Lazy move generator for the minimax search.
//!
//! Instead of collecting every move upfront, this iterator produces
//! moves one at a time, tracking its indices to resume where it left
//! off. The order matches `Board::legal_moves`: drop destinations
//! row-major, slides by source cell row-major then neighbor offset.

use teeko_core::{Board, Move, Phase, Piece, Pos, SLIDE_OFFSETS};

/// Lazy move generator that produces moves on demand.
pub struct MoveGenerator {
    /// Piece color moves are generated for
    piece: Piece,
    /// Phase at construction; fixed for the generator's lifetime
    phase: Phase,
    /// Next drop destination to try (drop phase)
    dest_idx: u8,
    /// Current source cell (move phase)
    from_idx: u8,
    /// Next slide offset to try from the current source (move phase)
    offset_idx: u8,
}

impl MoveGenerator {
    /// Create a generator for `piece` in the phase implied by
    /// `piece_count`.
    pub fn new(piece: Piece, piece_count: u8) -> Self {
        Self {
            piece,
            phase: Phase::from_piece_count(piece_count),
            dest_idx: 0,
            from_idx: 0,
            offset_idx: 0,
        }
    }

    /// Get the next legal move, or None if exhausted.
    ///
    /// The board must describe the same position on every call; the
    /// search undoes each trial move before resuming the generator.
    pub fn next(&mut self, board: &Board) -> Option<Move> {
        match self.phase {
            Phase::Drop => self.next_drop(board),
            Phase::Move => self.next_slide(board),
        }
    }

    fn next_drop(&mut self, board: &Board) -> Option<Move> {
        while self.dest_idx < 25 {
            let to = Pos(self.dest_idx);
            self.dest_idx += 1;

            if board.is_empty(to) {
                return Some(Move::Drop { to });
            }
        }
        None
    }

    fn next_slide(&mut self, board: &Board) -> Option<Move> {
        while self.from_idx < 25 {
            let from = Pos(self.from_idx);

            if board.cell(from) != Some(self.piece) {
                // No piece to move from this cell
                self.from_idx += 1;
                self.offset_idx = 0;
                continue;
            }

            // Try the remaining neighbor offsets
            while self.offset_idx < 8 {
                let (dr, dc) = SLIDE_OFFSETS[self.offset_idx as usize];
                self.offset_idx += 1;

                let row = from.row() as i8 + dr;
                let col = from.col() as i8 + dc;
                if row < 0 || row > 4 || col < 0 || col > 4 {
                    continue;
                }

                let to = Pos::from_row_col(row as u8, col as u8);
                if board.is_empty(to) {
                    return Some(Move::Slide { from, to });
                }
            }

            // Done with this source cell
            self.from_idx += 1;
            self.offset_idx = 0;
        }
        None
    }
}
