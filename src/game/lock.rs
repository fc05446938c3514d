use std::time::Instant;

use log::{debug, info};

use crate::config::fall_interval;
use crate::game::scoring::line_clear_points;
use crate::game::{Game, Line, Piece};
use crate::{LINES_PER_LEVEL, MAX_LEVEL};

/// What happened when the lock delay expired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockOutcome {
    /// The piece could fall again, so it keeps falling.
    Aborted,
    Locked { lines: usize, points: u64 },
    /// The next piece had no room. The session has already been reset.
    Lost { score: u64, level: usize, lines: usize },
}

impl Game {
    /// Lock-delay expiry: lock the active piece if it still rests on
    /// something, spawn the next one, clear lines. Always restarts the fall
    /// timer at the resulting level's interval.
    pub fn lock_piece(&mut self, now: Instant) -> LockOutcome {
        // a piece slid off its support during the delay keeps this step
        self.active.move_down();
        let outcome = if self.board.collision(&self.active) {
            self.active.move_up();
            self.settle_and_spawn()
        } else {
            debug!("lock aborted, piece can fall again");
            LockOutcome::Aborted
        };
        self.timers.start_fall(fall_interval(self.level), now);
        outcome
    }

    fn settle_and_spawn(&mut self) -> LockOutcome {
        let next = Piece::random(&mut self.rng);
        let locked = std::mem::replace(&mut self.active, next);
        debug!("locked {:?} at top {}", locked.shape(), locked.top());
        self.board.settle(locked);

        if self.board.collision(&self.active) {
            let lost = LockOutcome::Lost {
                score: self.score,
                level: self.level,
                lines: self.total_lines_cleared,
            };
            info!(
                "game lost with score {} at level {} after {} lines",
                self.score, self.level, self.total_lines_cleared
            );
            self.reset();
            return lost;
        }

        let lines = self.board.filled_lines();
        let points = self.increment_score(lines.len());
        self.board.clear_lines(&lines);
        self.count_lines(lines.len());
        if !lines.is_empty() {
            let rows: Vec<i32> = lines.iter().map(Line::row).collect();
            info!("cleared rows {:?} for {} points", rows, points);
        }
        LockOutcome::Locked {
            lines: lines.len(),
            points,
        }
    }

    fn increment_score(&mut self, line_count: usize) -> u64 {
        let points = line_clear_points(line_count, self.level);
        self.score += points;
        points
    }

    fn count_lines(&mut self, line_count: usize) {
        self.lines_cleared += line_count;
        self.total_lines_cleared += line_count;
        if self.lines_cleared >= LINES_PER_LEVEL {
            self.lines_cleared = 0;
            if self.level < MAX_LEVEL {
                self.level += 1;
                info!("level up to {}", self.level);
            }
        }
    }
}
