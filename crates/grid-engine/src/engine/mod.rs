//! Engine module: packed 4x4 board, slide/merge ops backed by
//! precomputed line tables, and the stateful `Game` on top.
//!
//! - `Board` is the packed board state with grid-level accessors.
//! - `Game` owns board + score and runs the move/spawn/status cycle.
//! - Internals (tables and hot ops) live in submodules to keep things tidy.

mod game;
mod ops;
pub mod state;
mod tables;

pub use game::Game;
pub use state::{Board, Direction, GameStatus, SIZE, WIN_TILE};

pub use ops::{count_empty, has_won, highest_tile, is_stuck, shift, spawn_random_tile};

/// Force initialization of the internal line tables.
///
/// The tables are built lazily on first use either way; calling this
/// up front just keeps the one-time cost out of the first move.
/// Safe to call multiple times.
pub fn new() {
    tables::init();
}
