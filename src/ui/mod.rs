mod render;

pub use render::{draw_game, LossNotice};
