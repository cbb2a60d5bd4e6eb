use std::collections::VecDeque;

use anyhow::{ensure, Result};

use crate::geometry::Point;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    /// Unit step in (row, col) terms.
    pub fn vector(self) -> Point {
        match self {
            Up => Point::new(-1, 0),
            Down => Point::new(1, 0),
            Left => Point::new(0, -1),
            Right => Point::new(0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Body is stored tail first, head last.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
}

impl Snake {
    pub fn new<I>(body: I, direction: Direction) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let body: VecDeque<Point> = body.into_iter().collect();
        ensure!(!body.is_empty(), "a snake needs at least one segment");

        Ok(Snake { body, direction })
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn head(&self) -> Point {
        *self.body.back().expect("snake body is never empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.front().expect("snake body is never empty")
    }

    pub fn contains(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    /// Whether `p` lies on any segment other than the current head.
    pub fn hits_body(&self, p: Point) -> bool {
        self.body.iter().take(self.body.len() - 1).any(|seg| *seg == p)
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Pushes the new head and drops the tail unless growing. Returns the
    /// dropped tail.
    pub(crate) fn slide(&mut self, new_head: Point, grow: bool) -> Option<Point> {
        self.body.push_back(new_head);

        if grow {
            None
        } else {
            self.body.pop_front()
        }
    }
}
