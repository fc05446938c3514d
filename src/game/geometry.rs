use crate::CELL;

/// Axis-aligned rectangle in board pixels. Edges are half-open:
/// `right()` and `bottom()` are one past the last covered pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from cell-unit position and size.
    pub const fn from_cells(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(x * CELL, y * CELL, w * CELL, h * CELL)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.left().max(other.left());
        let y = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Cells covered by this rectangle, as (column, row) pairs.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x0, y0) = (self.x.div_euclid(CELL), self.y.div_euclid(CELL));
        let (cols, rows) = (self.width / CELL, self.height / CELL);
        (y0..y0 + rows).flat_map(move |row| (x0..x0 + cols).map(move |col| (col, row)))
    }
}

/// One rotation step for a single rectangle: a translation and the size the
/// rectangle takes afterwards, both in cell units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transform {
    pub dx: i32,
    pub dy: i32,
    pub w: i32,
    pub h: i32,
}

impl Transform {
    pub const fn new(dx: i32, dy: i32, w: i32, h: i32) -> Self {
        Self { dx, dy, w, h }
    }

    /// Negated translation, same size.
    pub fn inverted(&self) -> Self {
        Self::new(-self.dx, -self.dy, self.w, self.h)
    }

    pub fn apply(&self, rect: &mut Rect) {
        rect.x += self.dx * CELL;
        rect.y += self.dy * CELL;
        rect.width = self.w * CELL;
        rect.height = self.h * CELL;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const CYAN: Rgb = Rgb(0, 255, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const MAGENTA: Rgb = Rgb(255, 0, 255);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const DARK_GRAY: Rgb = Rgb(64, 64, 64);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn inverted(self) -> Rgb {
        Rgb(255 - self.0, 255 - self.1, 255 - self.2)
    }
}

/// Cursor over a fixed cyclic sequence. Starts at index 0.
#[derive(Clone, Copy, Debug)]
pub struct Cycle<T: Copy + 'static> {
    data: &'static [T],
    current: usize,
}

impl<T: Copy + 'static> Cycle<T> {
    pub fn new(data: &'static [T]) -> Self {
        Self { data, current: 0 }
    }

    pub fn current(&self) -> T {
        self.data[self.current]
    }

    pub fn next(&mut self) -> T {
        self.current = (self.current + 1) % self.data.len();
        self.data[self.current]
    }

    pub fn previous(&mut self) -> T {
        self.current = self.current.checked_sub(1).unwrap_or(self.data.len() - 1);
        self.data[self.current]
    }
}
