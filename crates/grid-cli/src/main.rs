//! Terminal front-end for the grid engine.
//!
//! Arrow keys shift the board, `r` restarts (at any time, including
//! mid-game), `q`/`Esc` quits. One key event drives one synchronous
//! engine step; the board, score, and best score are redrawn after
//! every state change.

mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use grid_engine::engine::{self, Direction, Game};
use grid_engine::store::{BestScoreStore, FileBestScoreStore, MemoryBestScoreStore};

#[derive(Parser, Debug)]
#[command(name = "grid-cli", about = "Play the 2048 sliding-tile game in the terminal")]
struct Args {
    /// File holding the persisted best score.
    #[arg(long, default_value = ".grid-best-score")]
    best_score_file: PathBuf,
    /// Seed the RNG for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
    /// Keep the best score in memory only (no file writes).
    #[arg(long)]
    no_persist: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut store: Box<dyn BestScoreStore> = if args.no_persist {
        Box::new(MemoryBestScoreStore::default())
    } else {
        Box::new(FileBestScoreStore::new(&args.best_score_file))
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Warm the line tables before the first key lands.
    engine::new();

    terminal::enable_raw_mode()?;
    let result = run(&mut rng, store.as_mut());
    terminal::disable_raw_mode()?;
    result
}

fn run(rng: &mut StdRng, store: &mut dyn BestScoreStore) -> Result<()> {
    let mut best = store.load();
    let mut game = Game::new(rng);
    ui::draw(&game, best)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Char('r') => {
                game.restart(rng);
                ui::draw(&game, best)?;
                continue;
            }
            _ => {}
        }

        let Some(dir) = direction_for(key.code) else {
            continue;
        };
        if !game.step(dir, rng) {
            // Illegal/no-op direction: nothing changed, nothing to draw.
            debug!("ignored ineffective move {dir:?}");
            continue;
        }
        if game.score() > best {
            best = game.score();
            store.save(best);
        }
        ui::draw(&game, best)?;
    }

    Ok(())
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(direction_for(KeyCode::Up), Some(Direction::Up));
        assert_eq!(direction_for(KeyCode::Down), Some(Direction::Down));
        assert_eq!(direction_for(KeyCode::Left), Some(Direction::Left));
        assert_eq!(direction_for(KeyCode::Right), Some(Direction::Right));
        assert_eq!(direction_for(KeyCode::Char('x')), None);
    }
}
