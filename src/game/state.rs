use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::fall_interval;
use crate::game::timer::{TimerKind, Timers};
use crate::game::{Board, LockOutcome, Piece};

/// Discrete player inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    SoftDrop,
    RotateCw,
    RotateCcw,
    HardDrop,
    ToggleDebug,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The game is paused; nothing happened.
    Ignored,
    Applied,
    /// The move collided and was rolled back.
    Blocked,
    Quit,
}

pub struct Game {
    pub board: Board,
    pub active: Piece,
    pub level: usize,
    /// Lines toward the next level-up.
    pub lines_cleared: usize,
    pub total_lines_cleared: usize,
    pub score: u64,
    pub debug_mode: bool,
    ghost_enabled: bool,
    paused: bool,
    pub(super) timers: Timers,
    pub(super) rng: StdRng,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same seed, same piece sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let active = Piece::random(&mut rng);
        info!("new game, first piece {:?}", active.shape());
        Self {
            board: Board::new(),
            active,
            level: 0,
            lines_cleared: 0,
            total_lines_cleared: 0,
            score: 0,
            debug_mode: false,
            ghost_enabled: false,
            paused: false,
            timers: Timers::falling(fall_interval(0), Instant::now()),
            rng,
        }
    }

    /// Back to a fresh session. Overlay, ghost and pause flags are kept.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = Piece::random(&mut self.rng);
        self.level = 0;
        self.lines_cleared = 0;
        self.total_lines_cleared = 0;
        self.score = 0;
        info!("session reset, first piece {:?}", self.active.shape());
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn ghost_enabled(&self) -> bool {
        self.ghost_enabled
    }

    pub fn set_ghost(&mut self, enabled: bool) {
        debug!("ghost piece {}", if enabled { "on" } else { "off" });
        self.ghost_enabled = enabled;
    }

    pub fn set_paused(&mut self, paused: bool) {
        debug!("{}", if paused { "paused" } else { "resumed" });
        self.paused = paused;
    }

    pub fn restart_fall_timer(&mut self, now: Instant) {
        self.timers.start_fall(fall_interval(self.level), now);
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) -> ActionOutcome {
        if self.paused {
            return ActionOutcome::Ignored;
        }
        match action {
            Action::ToggleDebug => {
                self.debug_mode = !self.debug_mode;
                debug!("debug overlay {}", self.debug_mode);
                ActionOutcome::Applied
            }
            Action::Quit => ActionOutcome::Quit,
            Action::Left => self.try_move(Piece::move_left, Piece::move_right),
            Action::Right => self.try_move(Piece::move_right, Piece::move_left),
            Action::RotateCw => self.try_move(Piece::rotate_cw, Piece::rotate_ccw),
            Action::RotateCcw => self.try_move(Piece::rotate_ccw, Piece::rotate_cw),
            Action::SoftDrop => {
                if self.step_down() {
                    ActionOutcome::Applied
                } else {
                    self.start_lock_delay(now);
                    ActionOutcome::Blocked
                }
            }
            Action::HardDrop => {
                while !self.board.collision(&self.active) {
                    self.active.move_down();
                }
                self.active.move_up();
                self.start_lock_delay(now);
                ActionOutcome::Applied
            }
        }
    }

    fn try_move(&mut self, apply: fn(&mut Piece), undo: fn(&mut Piece)) -> ActionOutcome {
        apply(&mut self.active);
        if self.board.collision(&self.active) {
            undo(&mut self.active);
            ActionOutcome::Blocked
        } else {
            ActionOutcome::Applied
        }
    }

    /// Moves the active piece down one cell unless that collides.
    fn step_down(&mut self) -> bool {
        self.active.move_down();
        if self.board.collision(&self.active) {
            self.active.move_up();
            false
        } else {
            true
        }
    }

    pub(super) fn start_lock_delay(&mut self, now: Instant) {
        if self.timers.start_lock_delay(now) {
            debug!("lock delay armed");
        }
    }

    /// One gravity step. A resting piece arms the lock delay.
    pub fn tick(&mut self, now: Instant) {
        if !self.step_down() {
            self.start_lock_delay(now);
        }
    }

    /// Fires whichever timer is due at `now`. Returns the lock result when the
    /// lock delay expired. While paused the fall timer keeps its period but
    /// does not move the piece, and an expired lock delay waits for resume.
    pub fn on_timer(&mut self, now: Instant) -> Option<LockOutcome> {
        match self.timers.due(now)? {
            TimerKind::Fall => {
                self.timers.rearm(now);
                if !self.paused {
                    self.tick(now);
                }
                None
            }
            TimerKind::LockDelay if self.paused => None,
            TimerKind::LockDelay => Some(self.lock_piece(now)),
        }
    }

    /// Where the active piece would land on a hard drop.
    pub fn ghost_piece(&self) -> Piece {
        let mut ghost = self.active.clone();
        while !self.board.collision(&ghost) {
            ghost.move_down();
        }
        ghost.move_up();
        ghost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Shape;
    use crate::{CELL, LOCK_DELAY};

    fn game_with(shape: Shape) -> Game {
        let mut game = Game::with_seed(1);
        game.active = Piece::new(shape);
        game
    }

    #[test]
    fn lateral_moves_stop_at_walls() {
        let mut game = game_with(Shape::O);
        let now = Instant::now();
        for _ in 0..4 {
            assert_eq!(game.handle_action(Action::Left, now), ActionOutcome::Applied);
        }
        assert_eq!(game.handle_action(Action::Left, now), ActionOutcome::Blocked);
        assert_eq!(game.active.left(), 0);
        assert!(!game.timers.is_lock_pending());
    }

    #[test]
    fn blocked_rotation_rolls_back() {
        let mut game = game_with(Shape::I);
        let now = Instant::now();
        game.handle_action(Action::RotateCw, now);
        for _ in 0..6 {
            assert_eq!(game.handle_action(Action::Left, now), ActionOutcome::Applied);
        }
        // vertical bar against the left wall cannot turn flat
        let before = game.active.rects().to_vec();
        assert_eq!(game.handle_action(Action::RotateCcw, now), ActionOutcome::Blocked);
        assert_eq!(game.active.rects(), before.as_slice());
        assert_eq!(game.handle_action(Action::RotateCw, now), ActionOutcome::Blocked);
        assert_eq!(game.active.rects(), before.as_slice());
    }

    #[test]
    fn soft_drop_on_floor_arms_lock_delay() {
        let mut game = game_with(Shape::O);
        let now = Instant::now();
        for _ in 0..18 {
            assert_eq!(game.handle_action(Action::SoftDrop, now), ActionOutcome::Applied);
        }
        assert!(!game.timers.is_lock_pending());
        assert_eq!(game.handle_action(Action::SoftDrop, now), ActionOutcome::Blocked);
        assert!(game.timers.is_lock_pending());
        assert_eq!(game.timers.deadline(), now + LOCK_DELAY);
    }

    #[test]
    fn hard_drop_lands_and_arms_lock_delay() {
        let mut game = game_with(Shape::I);
        let now = Instant::now();
        game.handle_action(Action::HardDrop, now);
        assert_eq!(game.active.bottom(), 20 * CELL);
        assert!(game.timers.is_lock_pending());
    }

    #[test]
    fn paused_game_ignores_every_action() {
        let mut game = game_with(Shape::T);
        let now = Instant::now();
        game.set_paused(true);
        let before = game.active.rects().to_vec();
        for action in [Action::Left, Action::HardDrop, Action::ToggleDebug, Action::Quit] {
            assert_eq!(game.handle_action(action, now), ActionOutcome::Ignored);
        }
        assert_eq!(game.active.rects(), before.as_slice());
        assert!(!game.debug_mode);
    }

    #[test]
    fn quit_and_debug_toggle() {
        let mut game = game_with(Shape::T);
        let now = Instant::now();
        assert_eq!(game.handle_action(Action::ToggleDebug, now), ActionOutcome::Applied);
        assert!(game.debug_mode);
        assert_eq!(game.handle_action(Action::Quit, now), ActionOutcome::Quit);
    }

    #[test]
    fn fall_timer_moves_piece_down() {
        let mut game = game_with(Shape::O);
        let due = game.timers.deadline();
        assert_eq!(game.on_timer(due), None);
        assert_eq!(game.active.top(), CELL);
        assert_eq!(game.timers.deadline(), due + fall_interval(0));
    }

    #[test]
    fn fall_timer_is_idle_while_paused() {
        let mut game = game_with(Shape::O);
        game.set_paused(true);
        let due = game.timers.deadline();
        game.on_timer(due);
        assert_eq!(game.active.top(), 0);
        assert_eq!(game.timers.deadline(), due + fall_interval(0));
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut game = game_with(Shape::O);
        let early = game.timers.deadline() - std::time::Duration::from_millis(1);
        assert_eq!(game.on_timer(early), None);
        assert_eq!(game.active.top(), 0);
    }

    #[test]
    fn ghost_is_not_committed() {
        let mut game = game_with(Shape::L);
        game.set_ghost(true);
        let ghost = game.ghost_piece();
        assert_eq!(ghost.bottom(), 20 * CELL);
        assert_eq!(game.active.top(), 0);
    }
}
