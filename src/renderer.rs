use std::io;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::runtime::Renderer;
use crate::scene::{Rgb, Scene};
use crate::terminal_runtime::TerminalSession;

/// Terminal columns used per tile so tiles look roughly square.
const COLUMNS_PER_TILE: u16 = 2;

const TILE_GLYPH: &str = "  ";

/// Draws scenes into the alternate screen through ratatui.
pub struct TerminalRenderer {
    session: TerminalSession,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new(session: TerminalSession) -> Self {
        Self { session }
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, scene: &Scene) -> io::Result<()> {
        self.session
            .terminal_mut()
            .draw(|frame| render(frame, scene))?;
        Ok(())
    }
}

/// Renders the full frame from a scene.
pub fn render(frame: &mut Frame<'_>, scene: &Scene) {
    let [field_area, score_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let tile = i64::from(scene.tile_size.max(1));
    let columns = u16::try_from(i64::from(scene.width_px) / tile).unwrap_or(u16::MAX);
    let rows = u16::try_from(i64::from(scene.height_px) / tile).unwrap_or(u16::MAX);
    let field = Rect {
        x: field_area.x,
        y: field_area.y,
        width: field_area
            .width
            .min(columns.saturating_mul(COLUMNS_PER_TILE)),
        height: field_area.height.min(rows),
    };

    let buffer = frame.buffer_mut();
    let background = Style::new().bg(to_color(scene.background));
    for y in field.top()..field.bottom() {
        for x in field.left()..field.right() {
            buffer[(x, y)].set_style(background);
        }
    }

    for filled in &scene.rects {
        let style = Style::new().bg(to_color(filled.color));
        let rect = filled.rect;
        if rect.width == 0 || rect.height == 0 {
            continue;
        }

        let first_col = i64::from(rect.x).div_euclid(tile);
        let last_col = (i64::from(rect.x) + i64::from(rect.width) - 1).div_euclid(tile);
        let first_row = i64::from(rect.y).div_euclid(tile);
        let last_row = (i64::from(rect.y) + i64::from(rect.height) - 1).div_euclid(tile);

        for row in first_row..=last_row {
            for col in first_col..=last_col {
                if let Some((x, y)) = tile_to_terminal(field, col, row) {
                    buffer.set_string(x, y, TILE_GLYPH, style);
                }
            }
        }
    }

    let text_style = Style::new()
        .fg(to_color(scene.text_color))
        .add_modifier(Modifier::BOLD);
    let score = clip_to_width(&scene.score_text, usize::from(score_area.width));
    buffer.set_string(score_area.x, score_area.y, score, text_style);

    if let Some(banner) = &scene.banner {
        let text = clip_to_width(banner, usize::from(field.width));
        let width = u16::try_from(text.width()).unwrap_or(field.width);
        let x = field.x + field.width.saturating_sub(width) / 2;
        let y = field.y + field.height / 2;
        if field.height > 0 {
            buffer.set_string(x, y, text, text_style.bg(Color::Black));
        }
    }
}

fn tile_to_terminal(field: Rect, col: i64, row: i64) -> Option<(u16, u16)> {
    let col = u16::try_from(col).ok()?;
    let row = u16::try_from(row).ok()?;

    let x = field.x.checked_add(col.checked_mul(COLUMNS_PER_TILE)?)?;
    let y = field.y.checked_add(row)?;
    if x.saturating_add(COLUMNS_PER_TILE) > field.right() || y >= field.bottom() {
        return None;
    }

    Some((x, y))
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Truncates `text` to at most `max_width` display columns.
#[must_use]
pub fn clip_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut clipped = String::new();

    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > max_width {
            break;
        }
        used += width;
        clipped.push(ch);
    }

    clipped
}
