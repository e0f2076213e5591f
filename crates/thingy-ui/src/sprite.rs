use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use thingy_sheet::FramePixels;

/// Minimum alpha (0–255) for a pixel to be drawn.
const ALPHA_THRESHOLD: u8 = 128;

/// Draw one sprite frame into `area` at 1:1 scale using half-block cells.
///
/// `center` is the sprite's centre in playfield pixels, where a cell is one
/// pixel wide and two tall (see [`crate::layout::playfield_viewport`]). Parts
/// of the sprite outside `area` are clipped; transparent pixels leave the
/// cell untouched.
pub fn render_sprite(buf: &mut Buffer, area: Rect, pixels: &FramePixels, center: (f32, f32)) {
    if area.width == 0 || area.height == 0 || pixels.width == 0 || pixels.height == 0 {
        return;
    }
    if !center.0.is_finite() || !center.1.is_finite() {
        return;
    }
    match (pixels.width as usize)
        .checked_mul(pixels.height as usize)
        .and_then(|n| n.checked_mul(4))
    {
        Some(n) if pixels.data.len() >= n => {}
        _ => return,
    }

    let w = pixels.width as i64;
    let h = pixels.height as i64;
    let left = (center.0 - pixels.width as f32 / 2.0).round() as i64;
    let top = (center.1 - pixels.height as f32 / 2.0).round() as i64;

    let first_col = left.max(0);
    let last_col = (left + w).min(area.width as i64);
    let first_row = top.div_euclid(2).max(0);
    let last_row = (top + h + 1).div_euclid(2).min(area.height as i64);

    for row in first_row..last_row {
        for col in first_col..last_col {
            let sx = col - left;
            let upper = sample(pixels, sx, row * 2 - top);
            let lower = sample(pixels, sx, row * 2 + 1 - top);
            let x = area.x + col as u16;
            let y = area.y + row as u16;
            let Some(cell) = buf.cell_mut((x, y)) else {
                continue;
            };
            match (upper, lower) {
                (Some(up), Some(down)) => {
                    cell.set_char('▀');
                    cell.set_fg(rgb(up));
                    cell.set_bg(rgb(down));
                }
                (Some(up), None) => {
                    cell.set_char('▀');
                    cell.set_fg(rgb(up));
                }
                (None, Some(down)) => {
                    cell.set_char('▄');
                    cell.set_fg(rgb(down));
                }
                (None, None) => {}
            }
        }
    }
}

/// The opaque RGBA pixel at sprite coordinates `(x, y)`, if any.
fn sample(pixels: &FramePixels, x: i64, y: i64) -> Option<[u8; 4]> {
    if x < 0 || y < 0 || x >= pixels.width as i64 || y >= pixels.height as i64 {
        return None;
    }
    let idx = (y as usize * pixels.width as usize + x as usize) * 4;
    let px: [u8; 4] = pixels.data.get(idx..idx + 4)?.try_into().ok()?;
    (px[3] >= ALPHA_THRESHOLD).then_some(px)
}

fn rgb(px: [u8; 4]) -> Color {
    Color::Rgb(px[0], px[1], px[2])
}
