pub mod app;
pub mod config;
pub mod game;
pub mod ui;

pub use config::{
    CELL, BOARD_H, BOARD_W, GAME_HEIGHT, GAME_WIDTH, LINES_PER_LEVEL, LOCK_DELAY, MAX_LEVEL,
    MIN_PANE_HEIGHT, MIN_PANE_WIDTH, PLAY_H, PLAY_W,
};
pub use game::{Action, ActionOutcome, Game, LockOutcome, Scene};
