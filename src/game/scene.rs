use crate::game::geometry::{Rect, Rgb};
use crate::game::Game;

pub const PAUSED_BANNER: &str = "P A U S E D";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaintedPiece {
    pub color: Rgb,
    pub rects: Vec<Rect>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outline {
    pub rect: Rect,
    pub color: Rgb,
}

/// Everything a painter needs for one frame. Built fresh from the game and
/// never written back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Settled pieces in lock order, then the active piece.
    pub pieces: Vec<PaintedPiece>,
    pub debug_outlines: Vec<Outline>,
    pub ghost: Option<Vec<Rect>>,
    pub banner: Option<&'static str>,
    /// Level, score and total lines, one right-aligned line each.
    pub counters: [String; 3],
}

impl Game {
    pub fn scene(&self) -> Scene {
        let paused = self.is_paused();
        let pieces: Vec<PaintedPiece> = self
            .board
            .settled()
            .iter()
            .chain(std::iter::once(&self.active))
            .map(|p| PaintedPiece {
                color: if paused { Rgb::DARK_GRAY } else { p.color() },
                rects: p.rects().to_vec(),
            })
            .collect();

        let debug_outlines = if self.debug_mode {
            self.board
                .settled()
                .iter()
                .chain(std::iter::once(&self.active))
                .flat_map(|p| {
                    let color = p.color().inverted();
                    p.rects().iter().map(move |&rect| Outline { rect, color })
                })
                .collect()
        } else {
            Vec::new()
        };

        Scene {
            pieces,
            debug_outlines,
            ghost: self
                .ghost_enabled()
                .then(|| self.ghost_piece().rects().to_vec()),
            banner: paused.then_some(PAUSED_BANNER),
            counters: [
                format!("Level: {}", self.level),
                format!("Score: {}", self.score),
                format!("Lines: {}", self.total_lines_cleared),
            ],
        }
    }
}
