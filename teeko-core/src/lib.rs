//! Teeko core game logic with bit-based board representation.
//!
//! Teeko is played on a 5x5 grid. Each player owns four pieces: black
//! (`'b'`) and red (`'r'`). While fewer than 8 pieces are on the board
//! (the drop phase), a move places a new piece on an empty cell. Once
//! all 8 are down (the move phase), a move slides one of the mover's
//! pieces to an adjacent empty cell. A player wins with four in a row
//! horizontally or vertically, a full-length diagonal, or a 2x2 box.
//!
//! # Board Encoding
//!
//! The board is a pair of 25-bit occupancy masks, one per color, with
//! bit `row * 5 + col` set when that color occupies the cell:
//!
//! ```text
//! bit index by cell:
//!
//!      col 0  1  2  3  4
//! row 0:   0  1  2  3  4
//! row 1:   5  6  7  8  9
//! row 2:  10 11 12 13 14
//! row 3:  15 16 17 18 19
//! row 4:  20 21 22 23 24
//! ```
//!
//! The two masks are disjoint. Win detection is a scan over a fixed
//! table of pattern masks: a color has won when `mask & pattern ==
//! pattern` for some pattern.
//!
//! # Win Patterns
//!
//! Patterns are ordered for deterministic evaluation: horizontal runs
//! (each row, starting columns 0 and 1), vertical runs (each column,
//! starting rows 0 and 1), the two full-length diagonals, then the
//! sixteen 2x2 boxes by top-left corner. Only the two length-5
//! diagonals are checked; shorter diagonal runs are deliberately not
//! win patterns in this rule set.

use std::fmt;

/// One of the two piece colors.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Piece {
    Black,
    Red,
}

impl Piece {
    /// The other color.
    #[inline]
    pub fn opponent(self) -> Piece {
        match self {
            Piece::Black => Piece::Red,
            Piece::Red => Piece::Black,
        }
    }

    /// Board character: `'b'` for black, `'r'` for red.
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Piece::Black => 'b',
            Piece::Red => 'r',
        }
    }

    /// Parse a board character.
    pub fn from_char(ch: char) -> Option<Piece> {
        match ch {
            'b' => Some(Piece::Black),
            'r' => Some(Piece::Red),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Board position (0-24), row-major cell index.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from row and column (0-4 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 5 && col < 5);
        Pos(row * 5 + col)
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 5
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 5
    }

    /// Check if the position index is on the board.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < 25
    }

    /// Iterate over all board positions in row-major order.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0u8..25).map(Pos)
    }
}

impl fmt::Display for Pos {
    /// Cell notation: column letter A-E followed by the row digit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col()) as char, self.row())
    }
}

/// A game move: drop a new piece, or slide one already on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Move {
    /// Place a new piece on an empty cell (drop phase).
    Drop { to: Pos },
    /// Move an existing piece to an adjacent empty cell (move phase).
    Slide { from: Pos, to: Pos },
}

impl Move {
    /// Destination cell of the move.
    #[inline]
    pub fn to(&self) -> Pos {
        match self {
            Move::Drop { to } => *to,
            Move::Slide { to, .. } => *to,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Drop { to } => write!(f, "{}", to),
            Move::Slide { from, to } => write!(f, "{}->{}", from, to),
        }
    }
}

/// Information needed to undo a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Undo {
    /// The move that was applied.
    pub mov: Move,
    /// The piece that moved.
    pub piece: Piece,
}

/// Game phase, derived from the number of pieces on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Fewer than 8 pieces placed: moves drop new pieces.
    Drop,
    /// All 8 pieces placed: moves slide pieces already on the board.
    Move,
}

impl Phase {
    #[inline]
    pub fn from_piece_count(count: u8) -> Phase {
        if count < 8 {
            Phase::Drop
        } else {
            Phase::Move
        }
    }
}

/// Neighbor offsets tried when sliding, in generation order: the 3x3
/// neighborhood scanned with the zero offset skipped.
pub const SLIDE_OFFSETS: [(i8, i8); 8] = [
    (1, 1),   // down-right
    (1, 0),   // down
    (1, -1),  // down-left
    (0, 1),   // right
    (0, -1),  // left
    (-1, 1),  // up-right
    (-1, 0),  // up
    (-1, -1), // up-left
];

// ============================================================================
// BOARD - Two 25-bit occupancy masks, one per color
// ============================================================================

/// Game board as a pair of disjoint occupancy masks.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    black: u32,
    red: u32,
}

impl Board {
    /// Number of distinct win patterns.
    const WIN_PATTERN_COUNT: usize = 38;

    /// Win patterns as cell masks, in evaluation order: horizontal runs
    /// by row then starting column, vertical runs by column then
    /// starting row, the two full-length diagonals, then 2x2 boxes in
    /// row-major corner order.
    const WIN_PATTERNS: [u32; Self::WIN_PATTERN_COUNT] = Self::build_win_patterns();

    /// Mask for a run of `len` cells starting at (row, col) and
    /// stepping by (dr, dc).
    const fn run_mask(row: u8, col: u8, dr: i8, dc: i8, len: u8) -> u32 {
        let mut mask = 0u32;
        let mut i: i8 = 0;
        while i < len as i8 {
            let r = row as i8 + dr * i;
            let c = col as i8 + dc * i;
            mask |= 1u32 << (r * 5 + c) as u32;
            i += 1;
        }
        mask
    }

    const fn build_win_patterns() -> [u32; Self::WIN_PATTERN_COUNT] {
        let mut patterns = [0u32; Self::WIN_PATTERN_COUNT];
        let mut n = 0;

        // Horizontal: each row, starting columns 0 and 1.
        let mut row = 0;
        while row < 5 {
            let mut start = 0;
            while start < 2 {
                patterns[n] = Self::run_mask(row, start, 0, 1, 4);
                n += 1;
                start += 1;
            }
            row += 1;
        }

        // Vertical: each column, starting rows 0 and 1.
        let mut col = 0;
        while col < 5 {
            let mut start = 0;
            while start < 2 {
                patterns[n] = Self::run_mask(start, col, 1, 0, 4);
                n += 1;
                start += 1;
            }
            col += 1;
        }

        // The two length-5 diagonals.
        patterns[n] = Self::run_mask(0, 0, 1, 1, 5);
        n += 1;
        patterns[n] = Self::run_mask(0, 4, 1, -1, 5);
        n += 1;

        // 2x2 boxes by top-left corner.
        let mut r = 0;
        while r < 4 {
            let mut c = 0;
            while c < 4 {
                patterns[n] = Self::run_mask(r, c, 0, 1, 2) | Self::run_mask(r + 1, c, 0, 1, 2);
                n += 1;
                c += 1;
            }
            r += 1;
        }

        patterns
    }

    /// Create an empty board.
    pub fn new() -> Board {
        Board { black: 0, red: 0 }
    }

    /// Create a board from raw occupancy masks.
    pub const fn from_masks(black: u32, red: u32) -> Board {
        debug_assert!(black & red == 0);
        Board { black, red }
    }

    /// Build a board from five row strings in display format: one
    /// character per cell, `'b'`/`'r'` for pieces, anything else empty.
    pub fn from_rows(rows: [&str; 5]) -> Board {
        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                debug_assert!(col < 5);
                if let Some(piece) = Piece::from_char(ch) {
                    board.set_cell(Pos::from_row_col(row as u8, col as u8), Some(piece));
                }
            }
        }
        board
    }

    /// Get the piece at a position.
    #[inline]
    pub fn cell(&self, pos: Pos) -> Option<Piece> {
        let bit = 1u32 << pos.0;
        if self.black & bit != 0 {
            Some(Piece::Black)
        } else if self.red & bit != 0 {
            Some(Piece::Red)
        } else {
            None
        }
    }

    /// Set or clear the piece at a position.
    #[inline]
    pub fn set_cell(&mut self, pos: Pos, cell: Option<Piece>) {
        let bit = 1u32 << pos.0;
        self.black &= !bit;
        self.red &= !bit;
        match cell {
            Some(Piece::Black) => self.black |= bit,
            Some(Piece::Red) => self.red |= bit,
            None => {}
        }
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        (self.black | self.red) & (1u32 << pos.0) == 0
    }

    /// Count pieces on the board. Callers that mutate in a loop track
    /// this incrementally; the recount exists for construction and
    /// consistency checks.
    pub fn piece_count(&self) -> u8 {
        (self.black | self.red).count_ones() as u8
    }

    // ========== Win Detection ==========

    /// Check for a winner.
    ///
    /// The scan runs over the fixed pattern order, so hypothetical
    /// boards where both colors hold a pattern resolve
    /// deterministically to the earlier pattern. Under legal play at
    /// most one side can have a pattern. Works on any well-formed
    /// board, including states unreachable in a real game.
    pub fn check_winner(&self) -> Option<Piece> {
        for &pattern in Self::WIN_PATTERNS.iter() {
            if self.black & pattern == pattern {
                return Some(Piece::Black);
            }
            if self.red & pattern == pattern {
                return Some(Piece::Red);
            }
        }
        None
    }

    /// Signed outcome relative to a perspective piece: +1 if that piece
    /// has a winning pattern, -1 if its opponent does, 0 otherwise.
    pub fn outcome_for(&self, perspective: Piece) -> i8 {
        match self.check_winner() {
            Some(winner) if winner == perspective => 1,
            Some(_) => -1,
            None => 0,
        }
    }

    // ========== Move Generation ==========

    /// Enumerate the legal moves for `piece` in the phase implied by
    /// `piece_count`, in a fixed deterministic order: drop destinations
    /// row-major; slides by source cell row-major, then
    /// [`SLIDE_OFFSETS`] order per source. The search's tie-breaking
    /// depends on this order.
    pub fn legal_moves(&self, piece: Piece, piece_count: u8) -> Vec<Move> {
        let mut moves = Vec::with_capacity(32);
        match Phase::from_piece_count(piece_count) {
            Phase::Drop => {
                for to in Pos::all() {
                    if self.is_empty(to) {
                        moves.push(Move::Drop { to });
                    }
                }
            }
            Phase::Move => {
                for from in Pos::all() {
                    if self.cell(from) != Some(piece) {
                        continue;
                    }
                    for &(dr, dc) in SLIDE_OFFSETS.iter() {
                        let row = from.row() as i8 + dr;
                        let col = from.col() as i8 + dc;
                        if row < 0 || row > 4 || col < 0 || col > 4 {
                            continue;
                        }
                        let to = Pos::from_row_col(row as u8, col as u8);
                        if self.is_empty(to) {
                            moves.push(Move::Slide { from, to });
                        }
                    }
                }
            }
        }
        moves
    }

    // ========== Apply & Undo ==========

    /// Apply a move for `piece`, returning the undo record.
    /// Does NOT validate - caller must ensure the move is legal.
    pub fn apply(&mut self, mov: Move, piece: Piece) -> Undo {
        match mov {
            Move::Drop { to } => {
                debug_assert!(self.is_empty(to));
                self.set_cell(to, Some(piece));
            }
            Move::Slide { from, to } => {
                debug_assert_eq!(self.cell(from), Some(piece));
                debug_assert!(self.is_empty(to));
                self.set_cell(from, None);
                self.set_cell(to, Some(piece));
            }
        }
        Undo { mov, piece }
    }

    /// Undo a previously applied move, restoring the board bit-for-bit.
    pub fn undo(&mut self, undo: &Undo) {
        match undo.mov {
            Move::Drop { to } => {
                self.set_cell(to, None);
            }
            Move::Slide { from, to } => {
                self.set_cell(to, None);
                self.set_cell(from, Some(undo.piece));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Text rendering: each row as `"<row>: "` followed by one
    /// character and one space per cell, then a column-letter footer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..5u8 {
            write!(f, "{}: ", row)?;
            for col in 0..5u8 {
                let ch = match self.cell(Pos::from_row_col(row, col)) {
                    Some(piece) => piece.as_char(),
                    None => ' ',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "   A B C D E")
    }
}
