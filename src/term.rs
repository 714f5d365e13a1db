use crate::{TermInt, Coords};
use crate::apple::Apple;
use crate::error::{GameError, GameResult};
use crate::grid::{Field, Position};
use crate::snake::Snake;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use log::debug;

const BACKGROUND: Color = Color::Rgb { r: 12, g: 121, b: 136 };
const TEXT: Color = Color::Rgb { r: 255, g: 255, b: 200 };
const SNAKE_COLOR: Color = Color::Rgb { r: 60, g: 200, b: 80 };
const APPLE_COLOR: Color = Color::Rgb { r: 220, g: 40, b: 40 };

const SNAKE_BODY: &str = "██";
const APPLE: &str = "()";

/// Pixel x coordinate at which the score is printed in the top border.
const SCORE_X: i32 = 800;

/// Everything the game needs from its output device.
pub trait Screen {
    fn draw_frame(&mut self, snake: &Snake, apple: &Apple, score: usize) -> GameResult;
    fn show_game_over(&mut self, score: usize) -> GameResult;
    /// Waits up to `timeout` for key presses and returns all that are queued.
    fn poll_events(&mut self, timeout: Duration) -> GameResult<Vec<KeyEvent>>;
    fn teardown(&mut self) -> GameResult;
}

/// Draws the field inside a border, every grid cell two characters wide
/// so that cells look roughly square.
pub struct TermManager {
    field: Field,
    origin: Coords,
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new(field: Field) -> GameResult<Self> {
        let (width, height) = terminal::size()?;
        let (need_w, need_h) = frame_size(&field);

        if width < need_w || height < need_h {
            return Err(GameError::TerminalError(format!(
                "terminal is {}x{} but the field needs at least {}x{}",
                width, height, need_w, need_h
            )));
        }

        let origin = ((width - need_w) / 2, (height - need_h) / 2);
        Ok(TermManager { field, origin, stdout: stdout(), active: false })
    }

    pub fn setup(&mut self) -> GameResult {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        debug!("Terminal set up, field origin at {:?}", self.origin);
        Ok(())
    }

    pub fn restore(&mut self) -> GameResult {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self, score: usize) -> GameResult {
        let (width, height) = frame_size(&self.field);
        let (ox, oy) = self.origin;
        let end_x = ox + width - 1;
        let end_y = oy + height - 1;

        queue!(self.stdout, style::ResetColor)?;
        for x in ox..=end_x {
            let ch = if x == ox || x == end_x {'+'} else {'-'};
            self.print_at((x, oy), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in oy + 1..end_y {
            self.print_at((ox, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        let score_cell = (SCORE_X / self.field.cell_size).min(self.field.columns() - 6);
        let score_col = ox + 1 + score_cell as TermInt * 2;
        queue!(
            self.stdout,
            cursor::MoveTo(score_col, oy),
            style::SetForegroundColor(TEXT),
            style::Print(format!(" Score: {} ", score)),
            style::ResetColor
        )?;
        Ok(())
    }

    fn fill_background(&mut self) -> GameResult {
        let blank = " ".repeat(self.field.columns() as usize * 2);
        let (ox, oy) = self.origin;

        queue!(self.stdout, style::SetBackgroundColor(BACKGROUND))?;
        for row in 0..self.field.rows() as TermInt {
            queue!(self.stdout, cursor::MoveTo(ox + 1, oy + 1 + row), style::Print(&blank))?;
        }
        Ok(())
    }

    fn draw_cell(&mut self, pos: &Position, text: &str, color: Color) -> GameResult {
        if let Some(at) = screen_cell(&self.field, self.origin, pos) {
            queue!(
                self.stdout,
                cursor::MoveTo(at.0, at.1),
                style::SetBackgroundColor(BACKGROUND),
                style::SetForegroundColor(color),
                style::Print(text)
            )?;
        }
        Ok(())
    }

    fn show_message(&mut self, lines: &[&str]) -> GameResult {
        let (width, height) = frame_size(&self.field);
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 4) as TermInt;
        let center = (self.origin.0 + width / 2, self.origin.1 + height / 2);
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);

        queue!(self.stdout, style::SetBackgroundColor(BACKGROUND), style::SetForegroundColor(TEXT))?;

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            queue!(self.stdout, cursor::MoveTo(top_left.0, *y), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        queue!(self.stdout, style::ResetColor)?;
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> GameResult {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn flush(&mut self) -> GameResult {
        self.stdout.flush()?;
        Ok(())
    }
}

impl Screen for TermManager {
    fn draw_frame(&mut self, snake: &Snake, apple: &Apple, score: usize) -> GameResult {
        self.draw_borders(score)?;
        self.fill_background()?;
        self.draw_cell(&apple.position(), APPLE, APPLE_COLOR)?;

        for pos in snake.body().iter().skip(1) {
            self.draw_cell(pos, SNAKE_BODY, SNAKE_COLOR)?;
        }
        let head: String = [snake.head_char(); 2].iter().collect();
        self.draw_cell(&snake.head(), &head, SNAKE_COLOR)?;

        queue!(self.stdout, style::ResetColor)?;
        self.flush()
    }

    fn show_game_over(&mut self, score: usize) -> GameResult {
        let title = format!("GAME OVER! Your score is {}", score);
        self.fill_background()?;
        self.show_message(&[
            title.as_str(),
            "",
            "Press ENTER to play again",
            "Press ESC to exit the game",
        ])?;
        self.flush()
    }

    fn poll_events(&mut self, timeout: Duration) -> GameResult<Vec<KeyEvent>> {
        let mut events = vec![];

        if poll(timeout)? {
            loop {
                if let Event::Key(ev) = read()? {
                    events.push(ev);
                }
                if !poll(Duration::from_millis(0))? {
                    break;
                }
            }
        }

        Ok(events)
    }

    fn teardown(&mut self) -> GameResult {
        self.restore()
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        // Only reached with `active` set if the game unwound without teardown.
        let _ = self.restore();
    }
}

/// Terminal columns and rows taken by the field and its border.
fn frame_size(field: &Field) -> Coords {
    ((field.columns() * 2 + 2) as TermInt, (field.rows() + 2) as TermInt)
}

/// Terminal position of the left half of the cell at `pos`, if it is on the field.
fn screen_cell(field: &Field, origin: Coords, pos: &Position) -> Option<Coords> {
    if !field.contains(pos) {
        return None;
    }
    let col = (pos.x / field.cell_size) as TermInt;
    let row = (pos.y / field.cell_size) as TermInt;
    Some((origin.0 + 1 + col * 2, origin.1 + 1 + row))
}
