use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ops;

// Internal type aliases for the packed representation
pub(crate) type BoardRaw = u64;
pub(crate) type Line = u64;
pub(crate) type Score = u64;

/// Fixed board dimension; the grid never changes size.
pub const SIZE: usize = 4;

/// Tile value that ends the game as a win.
pub const WIN_TILE: u32 = 2048;

/// Exponent stored for the winning tile (2^11 = 2048).
pub(crate) const WIN_EXPONENT: u8 = WIN_TILE.trailing_zeros() as u8;

/// A direction to shift/merge tiles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, handy for "does any move remain" scans.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Where the game stands. Derived after every effective move, never
/// stored anywhere but in `Game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Packed 4x4 board: 16 4-bit nibbles in a `u64`, row-major from the
/// high nibble. Each nibble holds the base-2 exponent of the tile
/// value (0 = empty cell, `n` = tile `2^n`).
///
/// The public surface speaks in actual tile values (2, 4, 8, ...);
/// the raw packed form stays available as an escape hatch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(pub(crate) BoardRaw);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board(0);

    /// Construct a `Board` from its raw packed representation.
    #[inline]
    pub fn from_raw(raw: BoardRaw) -> Self {
        Board(raw)
    }

    /// Consume this `Board`, returning the raw packed `u64`.
    #[inline]
    pub fn into_raw(self) -> BoardRaw {
        self.0
    }

    /// Borrow the raw packed `u64` for this `Board`.
    #[inline]
    pub fn raw(&self) -> BoardRaw {
        self.0
    }

    /// Tile value at `(row, col)`, 0 for an empty cell.
    ///
    /// ```
    /// use grid_engine::engine::Board;
    /// let b = Board::from_grid([[2, 0, 0, 0], [0, 4, 0, 0], [0; 4], [0; 4]]);
    /// assert_eq!(b.get(0, 0), 2);
    /// assert_eq!(b.get(1, 1), 4);
    /// assert_eq!(b.get(3, 3), 0);
    /// ```
    #[inline]
    pub fn get(self, row: usize, col: usize) -> u32 {
        debug_assert!(row < SIZE && col < SIZE);
        let exp = (self.0 >> (60 - 4 * (row * SIZE + col))) & 0xf;
        if exp == 0 {
            0
        } else {
            1u32 << exp
        }
    }

    /// The board as a grid of actual tile values, row-major.
    pub fn to_grid(self) -> [[u32; SIZE]; SIZE] {
        let mut grid = [[0u32; SIZE]; SIZE];
        for (idx, exp) in self.tiles().enumerate() {
            if exp != 0 {
                grid[idx / SIZE][idx % SIZE] = 1u32 << exp;
            }
        }
        grid
    }

    /// Build a board from a grid of tile values.
    ///
    /// Every entry must be 0 (empty) or a power of two in `2..=32768`.
    ///
    /// ```
    /// use grid_engine::engine::Board;
    /// let b = Board::from_grid([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(b.to_grid()[0], [2, 2, 4, 4]);
    /// ```
    pub fn from_grid(grid: [[u32; SIZE]; SIZE]) -> Board {
        let mut raw: BoardRaw = 0;
        for row in grid.iter() {
            for &val in row.iter() {
                debug_assert!(
                    val == 0 || (val.is_power_of_two() && (2..=32768).contains(&val)),
                    "tile values must be 0 or a power of two >= 2, got {val}"
                );
                let exp = if val == 0 { 0 } else { val.trailing_zeros() as u64 };
                raw = (raw << 4) | exp;
            }
        }
        Board(raw)
    }

    /// Iterate over tile exponents (nibbles) in row-major order.
    /// Yields 0 for empty, 1 for 2, 2 for 4, etc.
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter { raw: self.0, idx: 0 }
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> u64 {
        ops::count_empty(self)
    }

    /// Highest tile value present, 0 for an empty board.
    #[inline]
    pub fn highest_tile(self) -> u32 {
        ops::highest_tile(self)
    }

    /// Slide/merge tiles in `dir` (no random spawn), returning the new
    /// board and the score gained by the merges.
    #[inline]
    pub fn shift(self, dir: Direction) -> (Board, Score) {
        ops::shift(self, dir)
    }

    /// Insert a 2 (p = 0.9) or 4 (p = 0.1) into a uniformly chosen
    /// empty cell. A full board is returned untouched.
    ///
    /// ```
    /// use grid_engine::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Board {
        ops::spawn_random_tile(self, rng)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:#018x})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "+------".repeat(SIZE) + "+";
        writeln!(f, "{rule}")?;
        for row in self.to_grid() {
            for val in row {
                if val == 0 {
                    write!(f, "|      ")?;
                } else {
                    write!(f, "|{val:^6}")?;
                }
            }
            writeln!(f, "|")?;
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

impl From<BoardRaw> for Board {
    fn from(v: BoardRaw) -> Self {
        Board::from_raw(v)
    }
}
impl From<Board> for BoardRaw {
    fn from(b: Board) -> Self {
        b.into_raw()
    }
}

/// Iterator over board tiles (exponents) in row-major order.
pub struct TilesIter {
    raw: BoardRaw,
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = u8;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= SIZE * SIZE {
            return None;
        }
        let n = ((self.raw >> (60 - (4 * self.idx))) & 0xf) as u8;
        self.idx += 1;
        Some(n)
    }
}

impl IntoIterator for Board {
    type Item = u8;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}
