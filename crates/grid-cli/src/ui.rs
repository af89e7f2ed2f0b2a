//! Board, score, and banner rendering for the raw-mode terminal.

use std::io::{self, Write};

use crossterm::style::{Color, SetForegroundColor};
use crossterm::{cursor, execute, terminal};

use grid_engine::engine::{Game, GameStatus, SIZE};

/// Redraw the whole screen from the current game state.
///
/// Raw mode is active, so lines end with `\r\n` explicitly.
pub fn draw(game: &Game, best: u64) -> io::Result<()> {
    let mut out = io::stdout();
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    write!(out, "score {:>6}   best {:>6}\r\n\r\n", game.score(), best)?;

    let rule = "+------".repeat(SIZE) + "+";
    write!(out, "{rule}\r\n")?;
    for row in game.board().to_grid() {
        for val in row {
            if val == 0 {
                write!(out, "|      ")?;
            } else {
                write!(out, "|{val:^6}")?;
            }
        }
        write!(out, "|\r\n{rule}\r\n")?;
    }

    match game.status() {
        GameStatus::Won => banner(&mut out, Color::Green, "You win!")?,
        GameStatus::Lost => banner(&mut out, Color::Red, "Game over!")?,
        GameStatus::InProgress => {
            write!(out, "\r\narrows move, r restarts, q quits\r\n")?;
        }
    }
    out.flush()
}

fn banner(out: &mut io::Stdout, color: Color, text: &str) -> io::Result<()> {
    execute!(out, SetForegroundColor(color))?;
    write!(out, "\r\n{text}")?;
    execute!(out, SetForegroundColor(Color::Reset))?;
    write!(out, " Press r to play again, q to quit.\r\n")?;
    Ok(())
}
