//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{CellView, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, PieceColor, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Key help shown in the side panel
const HELP: [(&str, &str); 5] = [
    ("←/→", "move"),
    ("↓", "down"),
    ("ENTER", "start"),
    ("R", "restart"),
    ("Q", "quit"),
];

pub const MAX_CELL_W: u16 = 8;
pub const MAX_CELL_H: u16 = 4;

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Cell size is clamped to `1..=MAX_CELL_W` by `1..=MAX_CELL_H`.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_W),
            cell_h: cell_h.clamp(1, MAX_CELL_H),
        }
    }

    /// Size of the bordered board frame in terminal cells
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16).saturating_mul(self.cell_w).saturating_add(2),
            (BOARD_HEIGHT as u16).saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for y in 0..BOARD_HEIGHT {
            let clearing = snap.is_clearing_row(y as usize);
            for x in 0..BOARD_WIDTH {
                let (ch, style) = cell_glyph(snap.cell_view(x as i8, y as i8), clearing);
                self.fill_cell(fb, start_x, start_y, x as u16, y as u16, ch, style);
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, viewport, panel_x, start_y);

        match snap.status {
            GameStatus::Idle => draw_banner(fb, start_x, start_y, frame_w, frame_h, "PRESS ENTER"),
            GameStatus::GameOver => draw_banner(fb, start_x, start_y, frame_w, frame_h, "GAME OVER"),
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x
            .saturating_add(1)
            .saturating_add(cell_x.saturating_mul(self.cell_w));
        let py = start_y
            .saturating_add(1)
            .saturating_add(cell_y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(14) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "STATUS", label);
        y += 1;
        fb.put_str(panel_x, y, status_text(snap.status), value);
        y += 2;

        if !snap.clearing.is_empty() {
            fb.put_str(panel_x, y, "CLEARING", label);
            y += 1;
            let mut buf = String::new();
            for (i, row) in snap.clearing.iter().enumerate() {
                if i > 0 {
                    buf.push(' ');
                }
                buf.push_str(&row.to_string());
            }
            fb.put_str(panel_x, y, &buf, value);
            y += 2;
        }

        fb.put_str(panel_x, y, "KEYS", label);
        y += 1;
        for (key, what) in HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, key, value);
            fb.put_str(panel_x + 6, y, what, dim);
            y += 1;
        }
    }
}

fn status_text(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle => "IDLE",
        GameStatus::Playing => "PLAYING",
        GameStatus::GameOver => "GAME OVER",
    }
}

/// Display color for a piece color tag.
pub fn color_rgb(color: PieceColor) -> Rgb {
    match color {
        PieceColor::Cyan => Rgb::new(80, 220, 220),
        PieceColor::Yellow => Rgb::new(240, 220, 80),
        PieceColor::Purple => Rgb::new(200, 120, 220),
        PieceColor::Green => Rgb::new(100, 220, 120),
        PieceColor::Red => Rgb::new(220, 80, 80),
        PieceColor::Blue => Rgb::new(80, 120, 220),
        PieceColor::Orange => Rgb::new(255, 165, 0),
    }
}

fn cell_glyph(view: CellView, clearing: bool) -> (char, CellStyle) {
    if clearing {
        // Rows about to be removed flash white.
        return ('▓', CellStyle::new(Rgb::new(255, 255, 255), PLAY_BG).bold());
    }
    match view {
        CellView::Empty => ('·', CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim()),
        CellView::Locked(c) => ('█', CellStyle::new(color_rgb(c), PLAY_BG)),
        CellView::Active(c) => ('█', CellStyle::new(color_rgb(c), PLAY_BG).bold()),
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in x.saturating_add(1)..right {
        fb.put_char(dx, y, '─', style);
        fb.put_char(dx, bottom, '─', style);
    }
    for dy in y.saturating_add(1)..bottom {
        fb.put_char(x, dy, '│', style);
        fb.put_char(right, dy, '│', style);
    }
}

fn draw_banner(fb: &mut FrameBuffer, start_x: u16, start_y: u16, frame_w: u16, frame_h: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let y = start_y.saturating_add(frame_h / 2);
    fb.put_str(x, y, text, CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold());
}
