//! Frame model shared by the full redraw and the per-step repaints.

use crate::config::Theme;
use crate::game::{Event, Game};
use crate::geometry::{Bounds, Point};

/// Column on the top border where the score text starts.
pub const SCORE_COLUMN: i32 = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Border {
    Horizontal,
    Vertical,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Border(Border),
    Body,
    Head,
    Apple,
    Text(char),
}

/// A single-cell repaint.
pub type Patch = (Point, Cell);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn blank(bounds: Bounds) -> Self {
        let (width, height) = (bounds.width() as usize, bounds.height() as usize);
        Frame { width, height, cells: vec![Cell::Empty; width * height] }
    }

    /// Everything visible for `game` right now.
    pub fn capture<R>(game: &Game<R>) -> Self {
        let bounds = game.bounds();
        let mut frame = Frame::blank(bounds);
        let (last_row, last_col) = (bounds.height() - 1, bounds.width() - 1);

        for col in 0..=last_col {
            frame.set(Point::new(0, col), Cell::Border(Border::Horizontal));
            frame.set(Point::new(last_row, col), Cell::Border(Border::Horizontal));
        }
        for row in 1..last_row {
            frame.set(Point::new(row, 0), Cell::Border(Border::Vertical));
            frame.set(Point::new(row, last_col), Cell::Border(Border::Vertical));
        }
        frame.set(Point::new(0, 0), Cell::Border(Border::TopLeft));
        frame.set(Point::new(0, last_col), Cell::Border(Border::TopRight));
        frame.set(Point::new(last_row, 0), Cell::Border(Border::BottomLeft));
        frame.set(Point::new(last_row, last_col), Cell::Border(Border::BottomRight));

        let snake = game.snake();
        for seg in snake.body().iter() {
            frame.set(*seg, Cell::Body);
        }
        frame.set(game.apple(), Cell::Apple);
        frame.set(snake.head(), Cell::Head);

        frame.apply(&score_patches(bounds, game.score()));
        frame
    }

    pub fn get(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Off-grid points are ignored.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    pub fn apply(&mut self, patches: &[Patch]) {
        for (p, cell) in patches {
            self.set(*p, *cell);
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Glyphs only, colours dropped.
    pub fn to_lines(&self, theme: &Theme) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|cell| theme.glyph(*cell).ch).collect::<String>())
            .collect()
    }

    fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x as usize >= self.height || p.y as usize >= self.width {
            return None;
        }
        Some(p.x as usize * self.width + p.y as usize)
    }
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

/// Score text on the top border, cut short before the right corner.
pub fn score_patches(bounds: Bounds, score: u32) -> Vec<Patch> {
    score_text(score)
        .chars()
        .zip(SCORE_COLUMN..bounds.width() - 1)
        .map(|(ch, col)| (Point::new(0, col), Cell::Text(ch)))
        .collect()
}

/// Cells that changed during a step, given the events it produced.
pub fn repaint(events: &[Event], bounds: Bounds) -> Vec<Patch> {
    let mut patches = Vec::new();

    for event in events {
        match *event {
            Event::Moved { new_head, old_head, old_tail } => {
                // Blank the tail after repainting the old head: for a
                // one-segment snake they are the same cell.
                patches.push((old_head, Cell::Body));
                if let Some(tail) = old_tail {
                    patches.push((tail, Cell::Empty));
                }
                patches.push((new_head, Cell::Head));
            }
            Event::AppleEaten { respawned, score, .. } => {
                if let Some(apple) = respawned {
                    patches.push((apple, Cell::Apple));
                }
                patches.extend(score_patches(bounds, score));
            }
            Event::GameOver(_) => {}
        }
    }

    patches
}
