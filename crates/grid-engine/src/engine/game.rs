use rand::Rng;

use super::ops;
use super::state::{Board, Direction, GameStatus, Score};

/// The stateful game: board, score, and derived status.
///
/// The engine owns nothing but the numbers. Rendering, input capture,
/// and best-score persistence live with the caller; the caller drives
/// one synchronous [`Game::step`] per input event.
///
/// ```
/// use grid_engine::engine::{Direction, Game, GameStatus};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let mut game = Game::new(&mut rng);
/// assert_eq!(game.score(), 0);
/// assert_eq!(game.board().count_empty(), 14);
/// ```
pub struct Game {
    board: Board,
    score: Score,
    status: GameStatus,
}

impl Game {
    /// Start a fresh game: empty board, score 0, two spawned tiles.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Game {
            board: Board::EMPTY,
            score: 0,
            status: GameStatus::InProgress,
        };
        game.restart(rng);
        game
    }

    /// Reset to a fresh game. Valid at any time: mid-game, after a
    /// win, after a loss.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board = ops::spawn_random_tile(
            ops::spawn_random_tile(Board::EMPTY, rng),
            rng,
        );
        self.score = 0;
        self.status = GameStatus::InProgress;
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Shift the board in `dir`, committing board and score only when
    /// the shift changes at least one cell. Ignored entirely (returns
    /// false) in terminal states.
    ///
    /// Returns whether the move was effective. An effective move must
    /// be followed by [`Game::post_move_update`]; use [`Game::step`]
    /// to do both.
    pub fn apply(&mut self, dir: Direction) -> bool {
        if self.status != GameStatus::InProgress {
            return false;
        }
        let (shifted, gain) = ops::shift(self.board, dir);
        if shifted == self.board {
            return false;
        }
        self.board = shifted;
        self.score += gain;
        true
    }

    /// Complete an effective move: spawn one random tile, then
    /// re-derive the status. Won (any 2048 tile) is checked first and
    /// short-circuits the stuck check; otherwise the game is Lost when
    /// no empty cell and no merge remains. Both are absorbing.
    pub fn post_move_update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board = ops::spawn_random_tile(self.board, rng);
        if ops::has_won(self.board) {
            self.status = GameStatus::Won;
        } else if ops::is_stuck(self.board) {
            self.status = GameStatus::Lost;
        }
    }

    /// One full turn: [`Game::apply`], then on an effective move the
    /// spawn/status pass. Returns whether the move was effective.
    pub fn step<R: Rng + ?Sized>(&mut self, dir: Direction, rng: &mut R) -> bool {
        let moved = self.apply(dir);
        if moved {
            self.post_move_update(rng);
        }
        moved
    }
}
