pub mod board;
pub mod geometry;
pub mod lock;
pub mod piece;
pub mod scene;
pub mod scoring;
pub mod state;
pub mod timer;

pub use board::{Board, Line};
pub use geometry::{Rect, Rgb, Transform};
pub use lock::LockOutcome;
pub use piece::{random_shape, Piece, Shape, SHAPES};
pub use scene::{Outline, PaintedPiece, Scene};
pub use state::{Action, ActionOutcome, Game};
pub use timer::{TimerKind, Timers};
