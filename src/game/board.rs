use crate::game::geometry::Rect;
use crate::game::Piece;
use crate::{CELL, GAME_HEIGHT, GAME_WIDTH};

/// A single-row band across the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    rect: Rect,
}

impl Line {
    /// The bottom row.
    pub fn bottom() -> Self {
        Self::at_row(GAME_HEIGHT / CELL - 1)
    }

    pub fn at_row(row: i32) -> Self {
        Self {
            rect: Rect::new(0, row * CELL, GAME_WIDTH, CELL),
        }
    }

    pub fn move_up(&mut self) {
        self.rect.y -= CELL;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn row(&self) -> i32 {
        self.rect.y.div_euclid(CELL)
    }
}

/// Playfield bounds plus every piece that has locked into it.
#[derive(Clone, Debug)]
pub struct Board {
    pub playfield: Rect,
    settled: Vec<Piece>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            playfield: Rect::new(0, 0, GAME_WIDTH, GAME_HEIGHT),
            settled: Vec::new(),
        }
    }

    pub fn settled(&self) -> &[Piece] {
        &self.settled
    }

    pub fn settle(&mut self, piece: Piece) {
        self.settled.push(piece);
    }

    pub fn clear(&mut self) {
        self.settled.clear();
    }

    /// Out of bounds below or to the sides, or overlapping a settled piece.
    /// The ceiling is not a bound, so spawns can rotate through it.
    pub fn collision(&self, piece: &Piece) -> bool {
        if piece.bottom() > self.playfield.bottom()
            || piece.left() < self.playfield.left()
            || piece.right() > self.playfield.right()
        {
            return true;
        }
        self.settled.iter().any(|settled| settled.intersects(piece))
    }

    fn covered_width(&self, line: &Line) -> i32 {
        let band = line.rect();
        self.settled
            .iter()
            .flat_map(|p| p.rects())
            .filter_map(|r| band.intersection(r))
            .map(|r| r.width)
            .sum()
    }

    /// Rows whose full width is covered, bottom row first. Keeps scanning
    /// above the ceiling for as long as rows there still hold content.
    pub fn filled_lines(&self) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut line = Line::bottom();
        loop {
            let width = self.covered_width(&line);
            if width == self.playfield.width {
                lines.push(line);
            }
            line.move_up();
            if line.rect().y <= 0 && width == 0 {
                break;
            }
        }
        lines
    }

    /// Remove the cleared bands, drop emptied pieces, then shift everything
    /// at or above each cleared line down one cell, once per line entry.
    pub fn clear_lines(&mut self, lines: &[Line]) {
        for line in lines {
            let band = line.rect();
            for piece in &mut self.settled {
                piece.rects_mut().retain_mut(|r| {
                    if band.intersects(r) {
                        r.height -= CELL;
                    }
                    r.height != 0
                });
            }
        }
        self.settled.retain(|p| !p.is_empty());

        let mut shifts: Vec<Vec<i32>> = self
            .settled
            .iter()
            .map(|p| vec![0; p.rects().len()])
            .collect();
        for line in lines {
            let top = line.rect().top();
            for (piece, counts) in self.settled.iter().zip(shifts.iter_mut()) {
                for (r, n) in piece.rects().iter().zip(counts.iter_mut()) {
                    if r.top() <= top {
                        *n += 1;
                    }
                }
            }
        }
        for (piece, counts) in self.settled.iter_mut().zip(shifts) {
            for (r, n) in piece.rects_mut().iter_mut().zip(counts) {
                r.y += n * CELL;
            }
        }
    }
}
