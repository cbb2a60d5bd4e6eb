use std::ops::Add;

use anyhow::{ensure, Result};

/// A cell on the grid. `x` is the row, `y` is the column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// Size of the playing field, walls included.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    width: i32,
    height: i32,
}

impl Bounds {
    pub fn new(width: u16, height: u16) -> Result<Self> {
        ensure!(
            width >= 3 && height >= 3,
            "grid of {}x{} has no room inside its walls",
            width,
            height
        );

        Ok(Bounds { width: width as i32, height: height as i32 })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// True for the outer ring and anything beyond it.
    pub fn is_wall(&self, p: Point) -> bool {
        p.x <= 0 || p.x >= self.height - 1 || p.y <= 0 || p.y >= self.width - 1
    }

    pub fn interior(&self) -> impl Iterator<Item = Point> {
        let (width, height) = (self.width, self.height);
        (1..height - 1).flat_map(move |x| (1..width - 1).map(move |y| Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_component_wise() {
        assert_eq!(Point::new(4, 3) + Point::new(1, 0), Point::new(5, 3));
        assert_eq!(Point::new(1, 1) + Point::new(0, -1), Point::new(1, 0));
    }

    #[test]
    fn outer_ring_is_wall() {
        let bounds = Bounds::new(10, 6).unwrap();

        for y in 0..10 {
            assert!(bounds.is_wall(Point::new(0, y)));
            assert!(bounds.is_wall(Point::new(5, y)));
        }
        for x in 0..6 {
            assert!(bounds.is_wall(Point::new(x, 0)));
            assert!(bounds.is_wall(Point::new(x, 9)));
        }
        assert!(bounds.is_wall(Point::new(-1, 4)));
        assert!(!bounds.is_wall(Point::new(1, 1)));
        assert!(!bounds.is_wall(Point::new(4, 8)));
    }

    #[test]
    fn interior_skips_walls() {
        let bounds = Bounds::new(5, 4).unwrap();
        let cells: Vec<Point> = bounds.interior().collect();

        assert_eq!(cells.len(), 3 * 2);
        assert!(cells.iter().all(|p| !bounds.is_wall(*p)));
    }

    #[test]
    fn too_small_is_rejected() {
        assert!(Bounds::new(2, 10).is_err());
        assert!(Bounds::new(10, 2).is_err());
    }
}
