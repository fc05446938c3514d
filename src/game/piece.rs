use rand::seq::SliceRandom;
use rand::Rng;

use crate::game::geometry::{Cycle, Rect, Rgb, Transform};
use crate::{CELL, GAME_HEIGHT, GAME_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Z,
    I,
    S,
    O,
    T,
    J,
    L,
}

pub const SHAPES: [Shape; 7] = [
    Shape::Z,
    Shape::I,
    Shape::S,
    Shape::O,
    Shape::T,
    Shape::J,
    Shape::L,
];

/// Constant description of a shape: color, spawn rectangles in cell units
/// `(x, y, w, h)`, and one rotation cycle per rectangle.
pub struct ShapeDescriptor {
    pub color: Rgb,
    pub seeds: &'static [(i32, i32, i32, i32)],
    pub rotations: &'static [&'static [Transform]],
}

const fn t(dx: i32, dy: i32, w: i32, h: i32) -> Transform {
    Transform::new(dx, dy, w, h)
}

// The two-state cycles shared by several shapes.
const LEFT_BAR: &[Transform] = &[t(-2, 1, 2, 1), t(2, -1, 1, 2)];
const RIGHT_BAR: &[Transform] = &[t(0, 1, 2, 1), t(0, -1, 1, 2)];
const TRIPLE_BAR: &[Transform] = &[t(-1, 1, 3, 1), t(1, -1, 1, 3)];

static Z: ShapeDescriptor = ShapeDescriptor {
    color: Rgb::ORANGE,
    seeds: &[(3, 0, 2, 1), (4, 1, 2, 1)],
    rotations: &[LEFT_BAR, RIGHT_BAR],
};

static I: ShapeDescriptor = ShapeDescriptor {
    color: Rgb::RED,
    seeds: &[(3, 0, 4, 1)],
    rotations: &[&[t(-3, 2, 4, 1), t(3, -2, 1, 4)]],
};

static S: ShapeDescriptor = ShapeDescriptor {
    color: Rgb::YELLOW,
    seeds: &[(4, 0, 2, 1), (3, 1, 2, 1)],
    rotations: &[RIGHT_BAR, LEFT_BAR],
};

static O: ShapeDescriptor = ShapeDescriptor {
    color: Rgb::CYAN,
    seeds: &[(4, 0, 2, 2)],
    rotations: &[],
};

static T: ShapeDescriptor = ShapeDescriptor {
    color: Rgb::GREEN,
    seeds: &[(4, 0, 1, 1), (3, 1, 3, 1)],
    rotations: &[
        &[t(1, -1, 1, 1), t(1, 1, 1, 1), t(-1, 1, 1, 1), t(-1, -1, 1, 1)],
        TRIPLE_BAR,
    ],
};

static J: ShapeDescriptor = ShapeDescriptor {
    color: Rgb::MAGENTA,
    seeds: &[(3, 0, 1, 1), (3, 1, 3, 1)],
    rotations: &[
        &[t(0, -2, 1, 1), t(2, 0, 1, 1), t(0, 2, 1, 1), t(-2, 0, 1, 1)],
        TRIPLE_BAR,
    ],
};

static L: ShapeDescriptor = ShapeDescriptor {
    color: Rgb::BLUE,
    seeds: &[(5, 0, 1, 1), (3, 1, 3, 1)],
    rotations: &[
        &[t(2, 0, 1, 1), t(0, 2, 1, 1), t(-2, 0, 1, 1), t(0, -2, 1, 1)],
        TRIPLE_BAR,
    ],
};

impl Shape {
    pub fn descriptor(self) -> &'static ShapeDescriptor {
        match self {
            Shape::Z => &Z,
            Shape::I => &I,
            Shape::S => &S,
            Shape::O => &O,
            Shape::T => &T,
            Shape::J => &J,
            Shape::L => &L,
        }
    }
}

pub fn random_shape<R: Rng + ?Sized>(rng: &mut R) -> Shape {
    *SHAPES.choose(rng).unwrap_or(&Shape::I)
}

#[derive(Clone, Debug)]
pub struct Piece {
    shape: Shape,
    color: Rgb,
    rects: Vec<Rect>,
    rotations: Vec<Cycle<Transform>>,
}

impl Piece {
    pub fn new(shape: Shape) -> Self {
        let desc = shape.descriptor();
        Self {
            shape,
            color: desc.color,
            rects: desc
                .seeds
                .iter()
                .map(|&(x, y, w, h)| Rect::from_cells(x, y, w, h))
                .collect(),
            rotations: desc.rotations.iter().map(|&c| Cycle::new(c)).collect(),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(random_shape(rng))
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub(crate) fn rects_mut(&mut self) -> &mut Vec<Rect> {
        &mut self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn rotate_cw(&mut self) {
        for (rect, cycle) in self.rects.iter_mut().zip(self.rotations.iter_mut()) {
            cycle.next().apply(rect);
        }
    }

    /// Undo the current step's translation, then take the size of the step
    /// before it. `previous()` moves the cursor back as a side effect.
    pub fn rotate_ccw(&mut self) {
        for (rect, cycle) in self.rects.iter_mut().zip(self.rotations.iter_mut()) {
            let undo = cycle.current().inverted();
            let prev = cycle.previous();
            Transform::new(undo.dx, undo.dy, prev.w, prev.h).apply(rect);
        }
    }

    fn shift(&mut self, dx: i32, dy: i32) {
        for r in &mut self.rects {
            r.x += dx;
            r.y += dy;
        }
    }

    pub fn move_up(&mut self) {
        self.shift(0, -CELL);
    }

    pub fn move_down(&mut self) {
        self.shift(0, CELL);
    }

    pub fn move_left(&mut self) {
        self.shift(-CELL, 0);
    }

    pub fn move_right(&mut self) {
        self.shift(CELL, 0);
    }

    pub fn top(&self) -> i32 {
        self.rects.iter().map(Rect::top).fold(GAME_HEIGHT + 1, i32::min)
    }

    pub fn bottom(&self) -> i32 {
        self.rects.iter().map(Rect::bottom).fold(0, i32::max)
    }

    pub fn left(&self) -> i32 {
        self.rects.iter().map(Rect::left).fold(GAME_WIDTH + 1, i32::min)
    }

    pub fn right(&self) -> i32 {
        self.rects.iter().map(Rect::right).fold(0, i32::max)
    }

    pub fn intersects(&self, other: &Piece) -> bool {
        self.rects
            .iter()
            .any(|a| other.rects.iter().any(|b| a.intersects(b)))
    }
}
