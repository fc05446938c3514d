// Shared game constants and runtime options.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const CELL: i32 = 30; // grid quantum; every coordinate is a multiple of it
pub const BOARD_W: i32 = 10;
pub const BOARD_H: i32 = 20;
pub const GAME_WIDTH: i32 = BOARD_W * CELL;
pub const GAME_HEIGHT: i32 = BOARD_H * CELL;

pub const LOCK_DELAY: Duration = Duration::from_millis(500);
pub const LINES_PER_LEVEL: usize = 15;
/// Fall interval per level, in milliseconds. Index is the level.
pub const LEVEL_TIMEOUTS_MS: [u64; 15] = [
    800, 700, 600, 500, 400, 350, 300, 200, 150, 100, 75, 65, 50, 30, 15,
];
pub const MAX_LEVEL: usize = LEVEL_TIMEOUTS_MS.len() - 1;

// Terminal layout.
pub const TILE_W: usize = 2; // each board cell is two characters wide
pub const PLAY_W: usize = BOARD_W as usize * TILE_W + 2; // inner width plus side walls
pub const PLAY_H: usize = BOARD_H as usize + 2; // inner height plus ceiling/floor
pub const SIDEBAR_W: u16 = 22;
pub const MIN_PANE_WIDTH: u16 = PLAY_W as u16 + SIDEBAR_W + 2;
pub const MIN_PANE_HEIGHT: u16 = PLAY_H as u16 + 2;
pub const FRAME_BUDGET: Duration = Duration::from_millis(16);

pub fn fall_interval(level: usize) -> Duration {
    Duration::from_millis(LEVEL_TIMEOUTS_MS[level.min(MAX_LEVEL)])
}

/// Falling-block puzzle game for the terminal.
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about, long_about = None)]
pub struct Settings {
    /// Show where the falling piece would land.
    #[arg(short, long)]
    pub ghost: bool,

    /// Seed for the piece sequence; random when omitted.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write logs to this file (filtered with RUST_LOG, default `info`).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
