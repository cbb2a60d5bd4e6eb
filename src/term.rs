use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, read, poll};
use log::{debug, warn};

use crate::config::{Glyph, Theme};
use crate::geometry::Point;
use crate::render::{Frame, Patch};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Ctrl+C. Raw mode keeps it from raising SIGINT.
    Interrupt,
}

/// Everything the game loop needs from a terminal.
pub trait Terminal {
    /// Waits at most `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Key>>;

    fn wait_key(&mut self) -> Result<Key>;

    fn draw_frame(&mut self, frame: &Frame) -> Result<()>;

    fn paint(&mut self, patches: &[Patch]) -> Result<()>;

    /// Centred box of text drawn over whatever is on screen.
    fn show_message(&mut self, lines: &[&str]) -> Result<()>;
}

/// Crossterm-backed terminal. Raw mode, the alternate screen and the hidden
/// cursor last as long as this value; dropping it puts the terminal back.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    theme: Theme,
    active: bool,
}

impl TermManager {
    pub fn open(theme: Theme) -> Result<Self> {
        let (width, height) = terminal::size().context("reading terminal size")?;
        let mut term = TermManager { width, height, stdout: stdout(), theme, active: true };

        // On failure `term` is dropped here, undoing whatever got enabled.
        term.setup().context("setting up terminal")?;
        debug!("terminal ready, {}x{}", width, height);

        Ok(term)
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Idempotent. Attempts every step even if an earlier one fails and
    /// reports the first error.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let results = [
            terminal::disable_raw_mode(),
            execute!(self.stdout, cursor::Show),
            execute!(self.stdout, cursor::EnableBlinking),
            execute!(self.stdout, LeaveAlternateScreen),
        ];

        for res in results.iter() {
            if let Err(e) = res {
                return Err(anyhow::anyhow!("restoring terminal: {}", e));
            }
        }

        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            cursor::Hide,
            cursor::DisableBlinking,
            terminal::Clear(ClearType::All)
        )?;
        Ok(())
    }

    fn queue_glyph(&mut self, glyph: Glyph) -> Result<()> {
        match glyph.color {
            Some(color) => queue!(
                self.stdout,
                style::SetForegroundColor(color),
                style::Print(glyph.ch),
                style::ResetColor
            )?,
            None => queue!(self.stdout, style::Print(glyph.ch))?,
        }
        Ok(())
    }

    fn queue_at(&mut self, pos: Point, glyph: Glyph) -> Result<()> {
        if pos.x < 0 || pos.y < 0 || pos.y >= self.width as i32 || pos.x >= self.height as i32 {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(pos.y as u16, pos.x as u16))?;
        self.queue_glyph(glyph)
    }
}

impl Terminal for TermManager {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Key>> {
        if !poll(timeout)? {
            return Ok(None);
        }

        match read()? {
            Event::Key(ev) => Ok(key_from_event(&ev)),
            _ => Ok(None),
        }
    }

    fn wait_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(ev) = read()? {
                if let Some(key) = key_from_event(&ev) {
                    return Ok(key);
                }
            }
        }
    }

    fn draw_frame(&mut self, frame: &Frame) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        for (row, cells) in frame.rows().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;
            for cell in cells {
                let glyph = self.theme.glyph(*cell);
                self.queue_glyph(glyph)?;
            }
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn paint(&mut self, patches: &[Patch]) -> Result<()> {
        for (pos, cell) in patches {
            let glyph = self.theme.glyph(*cell);
            self.queue_at(*pos, glyph)?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let msg_height = lines.len() as u16 + 2;
        let msg_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 2;
        let left = (self.width / 2).saturating_sub(msg_width / 2);
        let top = (self.height / 2).saturating_sub(msg_height / 2);
        let blank = " ".repeat(msg_width as usize);

        // Top and bottom padding lines
        for y in [top, top + msg_height - 1].iter() {
            queue!(self.stdout, cursor::MoveTo(left, *y), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", line = line, width = msg_width as usize);
            queue!(self.stdout, cursor::MoveTo(left, top + 1 + i as u16), style::Print(padded))?;
        }

        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("{:#}", e);
        }
    }
}

fn key_from_event(ev: &KeyEvent) -> Option<Key> {
    match ev {
        KeyEvent { code: KeyCode::Char('c'), modifiers, .. }
            if modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Key::Interrupt)
        }
        KeyEvent { code: KeyCode::Char(ch), .. } => Some(Key::Char(*ch)),
        _ => None,
    }
}
