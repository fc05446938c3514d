use std::io::{stdout, Stdout};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::{Settings, FRAME_BUDGET};
use crate::ui::{draw_game, LossNotice};
use crate::{ActionOutcome, Game, LockOutcome};

pub mod keymap;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(settings: &Settings) -> Result<()> {
    let mut tui = TuiGuard::new().context("failed to set up the terminal")?;
    run_loop(tui.terminal_mut(), settings)
}

fn run_loop(terminal: &mut Term, settings: &Settings) -> Result<()> {
    let mut game = match settings.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    game.set_ghost(settings.ghost);
    game.restart_fall_timer(Instant::now());
    let mut notice: Option<LossNotice> = None;

    loop {
        let scene = game.scene();
        terminal.draw(|frame| draw_game(frame, &scene, notice.as_ref()))?;

        let wait = if notice.is_some() || game.is_paused() {
            FRAME_BUDGET
        } else {
            game.timers()
                .deadline()
                .saturating_duration_since(Instant::now())
                .min(FRAME_BUDGET)
        };
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if dispatch_key(key, &mut game, &mut notice) {
                    break;
                }
            }
        }

        if notice.is_none() {
            if let Some(LockOutcome::Lost { score, level, lines }) = game.on_timer(Instant::now()) {
                notice = Some(LossNotice { score, level, lines });
            }
        }
    }
    info!("quit with score {}", game.score);
    Ok(())
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        or_undo(Self::enter, || {
            let _ = execute!(stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })
    }

    fn enter() -> Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Runs `setup`, and `undo` if it fails.
fn or_undo<T>(setup: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| undo())
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Returns true when the player asked to quit. Ctrl-C always quits. Any
/// other key only dismisses a loss notice, then play resumes.
fn dispatch_key(key: KeyEvent, game: &mut Game, notice: &mut Option<LossNotice>) -> bool {
    if is_interrupt(&key) {
        return true;
    }
    if notice.take().is_some() {
        game.restart_fall_timer(Instant::now());
        return false;
    }
    handle_key(key, game)
}

/// Returns true when the player asked to quit. Pause and ghost toggles act
/// like menu items and work while paused; everything else goes through the
/// game, which ignores it while paused.
fn handle_key(key: KeyEvent, game: &mut Game) -> bool {
    if is_interrupt(&key) {
        return true;
    }
    match key.code {
        KeyCode::Char('p' | 'P') => {
            game.set_paused(!game.is_paused());
            false
        }
        KeyCode::Char('g' | 'G') => {
            game.set_ghost(!game.ghost_enabled());
            false
        }
        code => match keymap::action_for(code) {
            Some(action) => game.handle_action(action, Instant::now()) == ActionOutcome::Quit,
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn escape_quits_unless_paused() {
        let mut game = Game::with_seed(5);
        game.set_paused(true);
        assert!(!handle_key(press(KeyCode::Esc), &mut game));
        assert!(!handle_key(press(KeyCode::Char('p')), &mut game));
        assert!(!game.is_paused());
        assert!(handle_key(press(KeyCode::Esc), &mut game));
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut game = Game::with_seed(5);
        game.set_paused(true);
        assert!(handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut game
        ));
    }

    #[test]
    fn ctrl_c_quits_through_loss_notice() {
        let mut game = Game::with_seed(5);
        let mut notice = Some(LossNotice {
            score: 10,
            level: 0,
            lines: 1,
        });
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(dispatch_key(ctrl_c, &mut game, &mut notice));
    }

    #[test]
    fn loss_notice_swallows_one_key() {
        let mut game = Game::with_seed(5);
        let mut notice = Some(LossNotice {
            score: 10,
            level: 0,
            lines: 1,
        });
        // Esc only dismisses the notice, the next one quits
        assert!(!dispatch_key(press(KeyCode::Esc), &mut game, &mut notice));
        assert!(notice.is_none());
        assert!(dispatch_key(press(KeyCode::Esc), &mut game, &mut notice));
    }

    #[test]
    fn failed_setup_is_undone() {
        let undone = std::cell::Cell::new(false);
        let result: Result<()> = or_undo(|| Err(anyhow::anyhow!("no tty")), || undone.set(true));
        assert!(result.is_err());
        assert!(undone.get());

        undone.set(false);
        let result = or_undo(|| Ok(7), || undone.set(true));
        assert_eq!(result.ok(), Some(7));
        assert!(!undone.get());
    }

    #[test]
    fn ghost_toggles_while_paused() {
        let mut game = Game::with_seed(5);
        game.set_paused(true);
        handle_key(press(KeyCode::Char('G')), &mut game);
        assert!(game.ghost_enabled());
    }

    #[test]
    fn movement_keys_reach_the_game() {
        let mut game = Game::with_seed(5);
        let left = game.active.left();
        handle_key(press(KeyCode::Left), &mut game);
        assert_eq!(game.active.left(), left - crate::CELL);
    }
}
