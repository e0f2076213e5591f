use ratatui::layout::{Constraint, Direction, Layout, Rect};

use thingy_pet::Viewport;

/// Screen regions of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellRects {
    pub top: Rect,
    pub playfield: Rect,
    pub hud: Rect,
    pub hud_stats: Rect,
    pub hud_log: Rect,
}

/// Split `area` into a one-line title bar, the playfield, and a HUD strip of
/// `hud_height` rows along the bottom (stats left, log right).
pub fn shell_layout(area: Rect, hud_height: u16) -> ShellRects {
    let hud_height = hud_height.max(3).min(area.height.saturating_sub(2).max(3));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(hud_height),
        ])
        .split(area);

    let hud = rows[2];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(hud);

    ShellRects {
        top: rows[0],
        playfield: rows[1],
        hud,
        hud_stats: cols[0],
        hud_log: cols[1],
    }
}

/// The pet's world for a playfield of `area` cells.
///
/// A cell is one pixel wide and two pixels tall, matching the half-block
/// sprite renderer.
pub fn playfield_viewport(area: Rect) -> Viewport {
    Viewport::new(area.width as f32, area.height as f32 * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_and_fill() {
        let rects = shell_layout(Rect::new(0, 0, 100, 40), 8);
        assert_eq!(rects.top.height, 1);
        assert_eq!(rects.hud.height, 8);
        assert_eq!(rects.playfield.y, 1);
        assert_eq!(rects.playfield.height, 31);
        assert_eq!(rects.hud_stats.width + rects.hud_log.width, 100);
    }

    #[test]
    fn hud_shrinks_on_tiny_terminals() {
        let rects = shell_layout(Rect::new(0, 0, 20, 6), 8);
        assert_eq!(rects.hud.height, 4);
        assert!(rects.playfield.height >= 1);
    }

    #[test]
    fn viewport_doubles_rows() {
        let viewport = playfield_viewport(Rect::new(0, 1, 80, 20));
        assert_eq!(viewport, Viewport::new(80.0, 40.0));
    }
}
