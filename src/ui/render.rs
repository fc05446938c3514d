use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::config::SIDEBAR_W;
use crate::game::{Rect as BoardRect, Rgb, Scene};
use crate::{BOARD_H, BOARD_W, MIN_PANE_HEIGHT, MIN_PANE_WIDTH, PLAY_H, PLAY_W};

/// Shown after a loss until the player presses a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LossNotice {
    pub score: u64,
    pub level: usize,
    pub lines: usize,
}

#[derive(Clone, Copy)]
struct Tile {
    glyph: [char; 2],
    style: Style,
}

const EMPTY: Tile = Tile {
    glyph: [' ', ' '],
    style: Style::new(),
};

const CONTROLS: &str = "←/J   left\n→/K   right\n↓     soft drop\n↑/D/X rotate cw\nZ/S   rotate ccw\nSpc/F hard drop\nP pause  G ghost\nF3 debug Esc quit";

pub fn draw_game(frame: &mut Frame, scene: &Scene, notice: Option<&LossNotice>) {
    let area = frame.size();

    if area.width < MIN_PANE_WIDTH || area.height < MIN_PANE_HEIGHT {
        let msg = Paragraph::new(format!(
            "RESIZE PANE (min {}x{})",
            MIN_PANE_WIDTH, MIN_PANE_HEIGHT
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("BRICK STACKER"));
        frame.render_widget(msg, area);
        return;
    }

    // Outer "cabinet" frame.
    let cabinet = Block::default()
        .title("BRICK STACKER")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    let cabinet_inner = cabinet.inner(area);
    frame.render_widget(cabinet, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(PLAY_W as u16), Constraint::Length(SIDEBAR_W)])
        .split(cabinet_inner);

    // Center the fixed-size well within the left column.
    let v_center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PLAY_H as u16),
            Constraint::Min(0),
        ])
        .split(cols[0]);
    let h_center = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PLAY_W as u16),
            Constraint::Min(0),
        ])
        .split(v_center[1]);
    let well_rect = h_center[1];

    draw_well(frame, scene, well_rect);
    draw_sidebar(frame, scene, cols[1]);

    if let Some(notice) = notice {
        draw_notice(frame, notice, well_rect);
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Apply `f` to every tile a board rectangle covers. Rows above the ceiling
/// are not visible.
fn paint(grid: &mut [Vec<Tile>], rect: &BoardRect, mut f: impl FnMut(&mut Tile)) {
    for (col, row) in rect.cells() {
        let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
            continue;
        };
        if let Some(tile) = grid.get_mut(row).and_then(|line| line.get_mut(col)) {
            f(tile);
        }
    }
}

fn well_grid(scene: &Scene) -> Vec<Vec<Tile>> {
    let mut grid = vec![vec![EMPTY; BOARD_W as usize]; BOARD_H as usize];

    for piece in &scene.pieces {
        let style = Style::default().bg(to_color(piece.color));
        for rect in &piece.rects {
            paint(&mut grid, rect, |tile| *tile = Tile { glyph: [' ', ' '], style });
        }
    }

    for outline in &scene.debug_outlines {
        let fg = to_color(outline.color);
        paint(&mut grid, &outline.rect, |tile| {
            tile.glyph = ['[', ']'];
            tile.style = tile.style.fg(fg);
        });
    }

    if let Some(ghost) = &scene.ghost {
        for rect in ghost {
            paint(&mut grid, rect, |tile| {
                tile.glyph = ['·', '·'];
                tile.style = tile.style.fg(Color::White);
            });
        }
    }
    grid
}

fn draw_well(frame: &mut Frame, scene: &Scene, well_rect: Rect) {
    let inner_w = PLAY_W - 2;
    let mut lines: Vec<Line> = Vec::with_capacity(PLAY_H);

    // Border: top/ceiling, sides, heavy floor.
    lines.push(Line::raw(format!("┌{}┐", "─".repeat(inner_w))));
    for row in well_grid(scene) {
        let mut spans = Vec::with_capacity(row.len() + 2);
        spans.push(Span::raw("│"));
        for tile in row {
            spans.push(Span::styled(tile.glyph.iter().collect::<String>(), tile.style));
        }
        spans.push(Span::raw("│"));
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(format!("└{}┘", "═".repeat(inner_w))));

    frame.render_widget(Paragraph::new(lines), well_rect);

    if let Some(banner) = scene.banner {
        let banner_rect = Rect {
            x: well_rect.x + 1,
            y: well_rect.y + well_rect.height / 2,
            width: well_rect.width.saturating_sub(2),
            height: 1,
        };
        let text = Paragraph::new(banner)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
        frame.render_widget(text, banner_rect);
    }
}

fn draw_sidebar(frame: &mut Frame, scene: &Scene, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(10)])
        .split(area);

    let counters: Vec<Line> = scene.counters.iter().map(|c| Line::raw(c.as_str())).collect();
    let stats = Paragraph::new(counters)
        .alignment(Alignment::Right)
        .block(Block::default().title("STATS").borders(Borders::ALL));
    frame.render_widget(stats, chunks[0]);

    let controls = Paragraph::new(CONTROLS)
        .block(Block::default().title("CONTROLS").borders(Borders::ALL));
    frame.render_widget(controls, chunks[2]);
}

fn draw_notice(frame: &mut Frame, notice: &LossNotice, well_rect: Rect) {
    let overlay_w = (PLAY_W as u16).saturating_sub(2);
    let overlay_h = 7u16;
    let popup = Rect {
        x: well_rect.x + well_rect.width.saturating_sub(overlay_w) / 2,
        y: well_rect.y + well_rect.height.saturating_sub(overlay_h) / 2,
        width: overlay_w,
        height: overlay_h,
    };
    let text = format!(
        "You lose!\nScore {}\nLevel {}  Lines {}\n\npress any key",
        notice.score, notice.level, notice.lines
    );
    let overlay = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().title("BRICK STACKER").borders(Borders::ALL));
    frame.render_widget(Clear, popup);
    frame.render_widget(overlay, popup);
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::game::{Piece, Shape};
    use crate::Game;

    fn render(scene: &Scene, notice: Option<&LossNotice>, w: u16, h: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal
            .draw(|frame| draw_game(frame, scene, notice))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn game() -> Game {
        let mut game = Game::with_seed(11);
        game.active = Piece::new(Shape::O);
        game
    }

    #[test]
    fn counters_and_controls_are_drawn() {
        let screen = render(&game().scene(), None, 60, 30);
        assert!(screen.contains("Level: 0"));
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Lines: 0"));
        assert!(screen.contains("CONTROLS"));
        assert!(!screen.contains("P A U S E D"));
    }

    #[test]
    fn paused_banner_is_drawn() {
        let mut game = game();
        game.set_paused(true);
        let screen = render(&game.scene(), None, 60, 30);
        assert!(screen.contains("P A U S E D"));
    }

    #[test]
    fn loss_notice_is_drawn() {
        let notice = LossNotice {
            score: 420,
            level: 1,
            lines: 17,
        };
        let screen = render(&game().scene(), Some(&notice), 60, 30);
        assert!(screen.contains("You lose!"));
        assert!(screen.contains("Score 420"));
    }

    #[test]
    fn small_pane_asks_for_resize() {
        let screen = render(&game().scene(), None, 30, 10);
        assert!(screen.contains("RESIZE"));
    }

    #[test]
    fn grid_marks_active_ghost_and_outline() {
        let mut game = game();
        game.set_ghost(true);
        game.debug_mode = true;
        let grid = well_grid(&game.scene());
        // active O at columns 4-5, rows 0-1, outlined for debug
        assert_eq!(grid[0][4].glyph, ['[', ']']);
        assert_eq!(grid[1][5].style.bg, Some(Color::Rgb(0, 255, 255)));
        // ghost on the floor
        assert_eq!(grid[19][4].glyph, ['·', '·']);
        assert_eq!(grid[17][4].glyph, [' ', ' ']);
    }

    #[test]
    fn cells_above_the_ceiling_are_skipped() {
        let mut game = game();
        game.active = Piece::new(Shape::I);
        game.active.rotate_cw();
        let grid = well_grid(&game.scene());
        assert_eq!(grid[0][6].style.bg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(grid[1][6].style.bg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(grid[2][6].style.bg, None);
    }
}
