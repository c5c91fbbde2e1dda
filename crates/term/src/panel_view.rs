//! PanelView: maps the packed monochrome panel into terminal cells.
//!
//! This module is pure (no I/O). Each terminal cell shows two vertically
//! stacked pixels using half-block glyphs, so the 128x64 panel needs 128x32
//! cells.

use monoray_core::FrameBuffer;

use crate::cells::{CellBuffer, Palette, Rgb};
use crate::types::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Terminal columns needed for the panel.
pub const PANEL_COLS: u16 = SCREEN_WIDTH as u16;

/// Terminal rows needed for the panel.
pub const PANEL_ROWS: u16 = (SCREEN_HEIGHT / 2) as u16;

/// Glyph for a (top, bottom) pixel pair.
#[inline]
pub fn half_block(top: bool, bottom: bool) -> char {
    match (top, bottom) {
        (false, false) => ' ',
        (true, false) => '▀',
        (false, true) => '▄',
        (true, true) => '█',
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Panel-to-cells renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelView {
    /// OLED tint
    palette: Palette,
    anchor_y: AnchorY,
}

impl Default for PanelView {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            anchor_y: AnchorY::Center,
        }
    }
}

impl PanelView {
    pub fn new(lit: Rgb, unlit: Rgb) -> Self {
        Self {
            palette: Palette { lit, unlit },
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left cell of the panel inside a `width x height` terminal.
    ///
    /// Terminals smaller than the panel clip it on the right and bottom.
    pub fn origin(&self, width: u16, height: u16) -> (u16, u16) {
        let x = width.saturating_sub(PANEL_COLS) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => height.saturating_sub(PANEL_ROWS) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render the panel into an existing cell buffer.
    ///
    /// Allocation-free: callers reuse one buffer across frames and only resize
    /// it when the terminal size changes.
    pub fn render_into(&self, panel: &FrameBuffer, out: &mut CellBuffer) {
        out.set_palette(self.palette);
        out.clear();

        let (ox, oy) = self.origin(out.width(), out.height());
        for row in 0..PANEL_ROWS {
            let y = oy.saturating_add(row);
            if y >= out.height() {
                break;
            }
            let top = (row * 2) as i16;
            for col in 0..PANEL_COLS {
                let x = ox.saturating_add(col);
                if x >= out.width() {
                    break;
                }
                let ch = half_block(panel.pixel(col as i16, top), panel.pixel(col as i16, top + 1));
                out.set(x, y, ch);
            }
        }
    }
}
