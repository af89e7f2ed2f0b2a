//! grid-engine: the transition engine for a 4x4 sliding-tile merge game
//!
//! This crate provides:
//! - A compact packed `Board` with the slide/merge move logic (`engine` module)
//! - A stateful `Game` that tracks score and win/loss status
//! - A best-score persistence port (`store` module) so the engine itself
//!   never touches storage
//!
//! Quick start:
//! ```
//! use grid_engine::engine::{Direction, Game, GameStatus};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new(&mut rng);
//! assert_eq!(game.status(), GameStatus::InProgress);
//!
//! // One full turn: shift, and when the board changed, spawn a tile
//! // and re-derive the status.
//! let _moved = game.step(Direction::Left, &mut rng);
//! ```
//!
//! All randomness is injected as `&mut impl Rng`; seed a `StdRng` for
//! reproducible games.

pub mod engine;
pub mod store;
