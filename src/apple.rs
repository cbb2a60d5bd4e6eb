use crate::geometry::Point;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Apple {
    position: Point,
}

impl Apple {
    pub fn new(position: Point) -> Self {
        Apple { position }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn relocate(&mut self, position: Point) {
        self.position = position;
    }
}
