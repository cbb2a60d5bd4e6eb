//! Tunable rules, glyph theme and logging setup.

use std::{env, fs::File, str::FromStr};

use anyhow::{Context, Result};
use crossterm::style::Color;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::render::{Border, Cell};

/// Path of the log file. Logging stays off when unset, since stdout is the
/// game screen.
pub const LOG_PATH_ENV: &str = "SNAKE_LOG";
pub const LOG_LEVEL_ENV: &str = "SNAKE_LOG_LEVEL";

/// Speed curve. Speeds are seconds between automatic moves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rules {
    pub initial_speed: f64,
    pub speed_factor: f64,
    pub min_speed: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Rules { initial_speed: 0.5, speed_factor: 0.9, min_speed: 0.05 }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Option<Color>,
}

impl Glyph {
    pub const fn plain(ch: char) -> Self {
        Glyph { ch, color: None }
    }

    pub const fn colored(ch: char, color: Color) -> Self {
        Glyph { ch, color: Some(color) }
    }
}

/// Maps every kind of cell to what gets printed for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub empty: Glyph,
    pub horizontal: Glyph,
    pub vertical: Glyph,
    pub top_left: Glyph,
    pub top_right: Glyph,
    pub bottom_left: Glyph,
    pub bottom_right: Glyph,
    pub body: Glyph,
    pub head: Glyph,
    pub apple: Glyph,
    pub text_color: Option<Color>,
}

impl Theme {
    /// Same glyphs as the default theme, without any colour.
    pub fn plain() -> Self {
        let mut theme = Theme::default();
        theme.body.color = None;
        theme.head.color = None;
        theme.apple.color = None;
        theme.text_color = None;
        theme
    }

    pub fn glyph(&self, cell: Cell) -> Glyph {
        match cell {
            Cell::Empty => self.empty,
            Cell::Border(Border::Horizontal) => self.horizontal,
            Cell::Border(Border::Vertical) => self.vertical,
            Cell::Border(Border::TopLeft) => self.top_left,
            Cell::Border(Border::TopRight) => self.top_right,
            Cell::Border(Border::BottomLeft) => self.bottom_left,
            Cell::Border(Border::BottomRight) => self.bottom_right,
            Cell::Body => self.body,
            Cell::Head => self.head,
            Cell::Apple => self.apple,
            Cell::Text(ch) => Glyph { ch, color: self.text_color },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            empty: Glyph::plain(' '),
            horizontal: Glyph::plain('─'),
            vertical: Glyph::plain('│'),
            top_left: Glyph::plain('╭'),
            top_right: Glyph::plain('╮'),
            bottom_left: Glyph::plain('╰'),
            bottom_right: Glyph::plain('╯'),
            body: Glyph::colored('0', Color::Green),
            head: Glyph::colored('X', Color::Green),
            apple: Glyph::colored('*', Color::Red),
            text_color: None,
        }
    }
}

/// Installs a file logger when `SNAKE_LOG` names a path.
pub fn init_logging() -> Result<()> {
    let path = match env::var_os(LOG_PATH_ENV) {
        Some(path) => path,
        None => return Ok(()),
    };

    let level = match env::var(LOG_LEVEL_ENV) {
        Ok(level) => LevelFilter::from_str(&level)
            .map_err(|_| anyhow::anyhow!("invalid {}: {:?}", LOG_LEVEL_ENV, level))?,
        Err(_) => LevelFilter::Info,
    };

    let file = File::create(&path)
        .with_context(|| format!("creating log file {:?}", path))?;
    WriteLogger::init(level, Config::default(), file)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_has_no_colors() {
        let theme = Theme::plain();
        let cells = [
            Cell::Empty,
            Cell::Border(Border::TopLeft),
            Cell::Body,
            Cell::Head,
            Cell::Apple,
            Cell::Text('S'),
        ];

        for cell in cells.iter() {
            assert_eq!(theme.glyph(*cell).color, None);
        }
        assert_eq!(theme.glyph(Cell::Text('S')).ch, 'S');
    }

    #[test]
    fn default_rules_speed_up_towards_a_floor() {
        let rules = Rules::default();
        assert!(rules.speed_factor < 1.0);
        assert!(rules.min_speed < rules.initial_speed);
    }
}
