//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O) and unit-testable. The ghost projection is
//! computed here from the snapshot; it is a rendering aid, not engine state.

use gridfall_core::snapshot::{ClearFlash, GameSnapshot};
use gridfall_core::Shape;

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

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

/// Piece colors indexed by cell value (index 0 is unused padding).
pub type Palette = [Rgb; 9];

/// The default palette, one entry per cell value 1..=8 (T, O, L, J, I, S, Z,
/// garbage).
pub const DEFAULT_PALETTE: Palette = [
    Rgb::new(0, 0, 0),
    Rgb::new(250, 144, 232), // T
    Rgb::new(253, 253, 150), // O
    Rgb::new(241, 185, 120), // L
    Rgb::new(46, 89, 132),   // J
    Rgb::new(180, 224, 209), // I
    Rgb::new(152, 251, 152), // S
    Rgb::new(217, 84, 77),   // Z
    Rgb::new(255, 255, 255), // garbage
];

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    palette: Palette,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            palette: DEFAULT_PALETTE,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            palette: DEFAULT_PALETTE,
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    fn cell_color(&self, value: u8) -> Rgb {
        self.palette
            .get(value as usize)
            .copied()
            .unwrap_or(Rgb::new(120, 120, 120))
    }

    /// Render a snapshot into an existing framebuffer (allocation-free hot
    /// path; callers reuse the framebuffer across frames).
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        flash: Option<ClearFlash>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_px_w = snap.width as u16 * self.cell_w;
        let board_px_h = snap.height as u16 * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(20, 20, 28),
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked board cells.
        for y in 0..snap.height {
            for x in 0..snap.width {
                let value = snap.cell(x, y);
                if value != 0 {
                    self.draw_cell(fb, start_x, start_y, x as u16, y as u16, value, false);
                } else {
                    self.draw_empty_cell(fb, start_x, start_y, x as u16, y as u16);
                }
            }
        }

        // Ghost projection below the active piece.
        let active = &snap.active;
        let ghost_y = ghost_y(snap);
        if ghost_y > active.y {
            let ghost_style = CellStyle {
                fg: Rgb::new(140, 140, 140),
                bg: bg.bg,
                bold: false,
                dim: true,
            };
            self.draw_shape(fb, snap, start_x, start_y, &active.shape, active.x, ghost_y, |_| {
                ('░', ghost_style)
            });
        }

        // Active piece.
        self.draw_shape(
            fb,
            snap,
            start_x,
            start_y,
            &active.shape,
            active.x,
            active.y,
            |value| {
                ('█', CellStyle {
                    fg: self.cell_color(value),
                    bg: bg.bg,
                    bold: true,
                    dim: false,
                })
            },
        );

        // Line-clear flash: highlight the bottom rows and celebrate T-spins.
        if let Some(flash) = flash {
            let highlight = CellStyle {
                fg: Rgb::new(255, 255, 255),
                bg: bg.bg,
                bold: true,
                dim: false,
            };
            for i in 0..flash.rows.min(snap.height as u32) {
                let y = snap.height as u16 - 1 - i as u16;
                for x in 0..snap.width as u16 {
                    self.fill_cell_rect(fb, start_x, start_y, x, y, '▒', highlight);
                }
            }
            if flash.t_spin {
                let style = CellStyle {
                    fg: Rgb::new(255, 0, 255),
                    bg: Rgb::new(0, 0, 0),
                    bold: true,
                    dim: false,
                };
                fb.put_str(start_x + 2, start_y + 2, "T-SPIN!", style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        flash: Option<ClearFlash>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, flash, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_shape(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        start_x: u16,
        start_y: u16,
        shape: &Shape,
        px: i8,
        py: i8,
        style_for: impl Fn(u8) -> (char, CellStyle),
    ) {
        shape.for_each_filled(|sx, sy, value| {
            let x = px + sx as i8;
            let y = py + sy as i8;
            if x >= 0 && x < snap.width as i8 && y >= 0 && y < snap.height as i8 {
                let (ch, style) = style_for(value);
                self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, ch, style);
            }
        });
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(70, 70, 82),
            bg: Rgb::new(20, 20, 28),
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        value: u8,
        bold: bool,
    ) {
        let style = CellStyle {
            fg: self.cell_color(value),
            bg: Rgb::new(20, 20, 28),
            bold,
            dim: false,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match snap.hold {
            Some(kind) => fb.put_str(panel_x, y, kind.as_str(), value),
            None => fb.put_str(panel_x, y, "-", value),
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for kind in snap.next.iter() {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, kind.as_str(), value);
            y = y.saturating_add(1);
        }
    }
}

/// Where the active piece would land, from snapshot data alone.
pub fn ghost_y(snap: &GameSnapshot) -> i8 {
    let active = &snap.active;
    let mut y = active.y;
    while !shape_hits(snap, &active.shape, active.x, y + 1) {
        y += 1;
    }
    y
}

fn shape_hits(snap: &GameSnapshot, shape: &Shape, x: i8, y: i8) -> bool {
    shape.any_filled(|sx, sy| {
        let ax = x + sx as i8;
        let ay = y + sy as i8;
        if ax < 0 || ax >= snap.width as i8 || ay >= snap.height as i8 {
            return true;
        }
        if ay < 0 {
            return false;
        }
        snap.cell(ax as u8, ay as u8) != 0
    })
}
