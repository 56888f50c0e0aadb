//! Terminal painter for the bundled host binary.
//!
//! Full-redraw only; the playfield is small enough that diffing buys
//! nothing. Everything here reads the engine through its public queries.
//! No game logic.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::{GameSession, Score, Tetramino};
use crate::types::{PieceName, SessionStatus};

/// Two terminal columns per cell compensates for glyph aspect ratio.
const CELL_WIDTH: u16 = 2;

fn piece_color(name: PieceName) -> Color {
    match name {
        PieceName::I => Color::Cyan,
        PieceName::J => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        PieceName::L => Color::Red,
        PieceName::O => Color::Yellow,
        PieceName::S => Color::Green,
        PieceName::T => Color::Blue,
        PieceName::Z => Color::Magenta,
    }
}

/// Raw-mode terminal session with a queued-command painter.
pub struct Screen {
    stdout: io::Stdout,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Paint one frame: playfield, score panel, hold and queue previews,
    /// and a status line.
    pub fn draw(&mut self, session: &GameSession, score: Score) -> Result<()> {
        let grid = session.grid();
        let columns = grid.columns() as u16;
        let rows = grid.rows() as u16;

        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        // Border.
        let field_width = columns * CELL_WIDTH;
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        self.stdout
            .queue(Print(format!("+{}+", "-".repeat(field_width as usize))))?;
        self.stdout.queue(cursor::MoveTo(0, rows + 1))?;
        self.stdout
            .queue(Print(format!("+{}+", "-".repeat(field_width as usize))))?;

        // Cells.
        for y in 0..rows {
            self.stdout.queue(cursor::MoveTo(0, y + 1))?;
            self.stdout.queue(Print("|"))?;
            for x in 0..columns {
                match grid.cell(x as i32, y as i32) {
                    Some(Some(name)) => {
                        self.stdout.queue(SetBackgroundColor(piece_color(name)))?;
                        self.stdout.queue(Print("  "))?;
                        self.stdout.queue(ResetColor)?;
                    }
                    _ => {
                        self.stdout.queue(Print(" ."))?;
                    }
                }
            }
            self.stdout.queue(Print("|"))?;
        }

        // Side panel.
        let panel_x = field_width + 4;
        self.panel_line(panel_x, 1, &format!("score  {}", score.points()))?;
        self.panel_line(panel_x, 2, &format!("lines  {}", score.lines()))?;
        self.panel_line(panel_x, 3, &format!("level  {}", score.level()))?;

        self.panel_line(panel_x, 5, "hold")?;
        let mut line = 6;
        if let Some(held) = session.hold_preview() {
            line = self.preview(panel_x, line, &held)?;
        }

        self.panel_line(panel_x, line + 1, "next")?;
        let mut line = line + 2;
        for piece in session.queue_preview() {
            line = self.preview(panel_x, line, &piece)?;
        }

        // Status line under the field.
        let hint = match session.status() {
            SessionStatus::Pending => "not initialized",
            SessionStatus::Ready => "enter: start   q: quit",
            SessionStatus::Playing => "arrows move  ,/. rotate  space drop  enter hold  esc pause",
            SessionStatus::Paused => "paused - enter: resume   q: quit",
            SessionStatus::Over => "game over - r: restart   q: quit",
        };
        self.stdout.queue(cursor::MoveTo(0, rows + 2))?;
        self.stdout.queue(Print(hint))?;

        self.stdout.flush()?;
        Ok(())
    }

    fn panel_line(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(x, y))?;
        self.stdout.queue(Print(text))?;
        Ok(())
    }

    /// Paint a trimmed piece preview; returns the next free panel line.
    fn preview(&mut self, x: u16, y: u16, piece: &Tetramino) -> Result<u16> {
        let color = piece_color(piece.name());
        for (dy, row) in piece.matrix().iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(x, y + dy as u16))?;
            for &used in row {
                if used {
                    self.stdout.queue(SetForegroundColor(color))?;
                    self.stdout.queue(Print("[]"))?;
                    self.stdout.queue(ResetColor)?;
                } else {
                    self.stdout.queue(Print("  "))?;
                }
            }
        }
        Ok(y + piece.matrix().len() as u16 + 1)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}
