//! Packed monochrome framebuffer
//!
//! The panel is `SCREEN_WIDTH x SCREEN_HEIGHT` pixels stored the way the
//! controller expects them: one byte covers 8 vertically stacked pixels of a
//! single column, bit `y & 7` with the LSB at the top of the group.
//! Byte `x + (y / 8) * SCREEN_WIDTH` therefore holds rows `8 * (y / 8)..+8`
//! of column `x`.
//!
//! All address arithmetic lives here so no caller computes byte offsets itself.

use crate::types::{RENDER_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Size of the packed store in bytes
pub const BUFFER_LEN: usize = SCREEN_WIDTH * SCREEN_HEIGHT / 8;

/// Which part of the panel a draw call may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    /// The whole panel (HUD, text, fades)
    Screen,
    /// The 3D view above the HUD
    Raycast,
}

impl Viewport {
    /// Number of rows writable through this viewport
    pub const fn height(self) -> usize {
        match self {
            Viewport::Screen => SCREEN_HEIGHT,
            Viewport::Raycast => RENDER_HEIGHT,
        }
    }
}

/// Fixed-size packed pixel store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_LEN],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_LEN],
        }
    }

    /// Byte index and bit mask for a pixel, or `None` when it is clipped.
    #[inline(always)]
    fn locate(x: i16, y: i16, height: usize) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as usize >= SCREEN_WIDTH || y as usize >= height {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((x + (y / 8) * SCREEN_WIDTH, 1u8 << (y & 7)))
    }

    #[inline(always)]
    fn group_index(x: usize, y: usize) -> Option<usize> {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        Some(x + (y / 8) * SCREEN_WIDTH)
    }

    /// Set or clear one pixel.
    ///
    /// Pixels outside `[0, SCREEN_WIDTH) x [0, viewport.height())` are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: i16, y: i16, color: bool, viewport: Viewport) {
        if let Some((i, bit)) = Self::locate(x, y, viewport.height()) {
            if color {
                self.bytes[i] |= bit;
            } else {
                self.bytes[i] &= !bit;
            }
        }
    }

    /// Read one pixel; anything off-panel reads as unlit.
    #[inline]
    pub fn pixel(&self, x: i16, y: i16) -> bool {
        match Self::locate(x, y, SCREEN_HEIGHT) {
            Some((i, bit)) => self.bytes[i] & bit != 0,
            None => false,
        }
    }

    /// Read the byte group containing row `y` of column `x`.
    pub fn byte(&self, x: usize, y: usize) -> u8 {
        Self::group_index(x, y).map_or(0, |i| self.bytes[i])
    }

    /// Overwrite the whole byte group containing row `y` of column `x`.
    #[inline]
    pub fn write_byte(&mut self, x: usize, y: usize, byte: u8) {
        if let Some(i) = Self::group_index(x, y) {
            self.bytes[i] = byte;
        }
    }

    /// Replace only the rows selected by `mask` in the group containing row `y`.
    ///
    /// Bits of `bits` outside `mask` are ignored.
    #[inline]
    pub fn write_byte_masked(&mut self, x: usize, y: usize, bits: u8, mask: u8) {
        if let Some(i) = Self::group_index(x, y) {
            self.bytes[i] = (self.bytes[i] & !mask) | (bits & mask);
        }
    }

    pub fn clear(&mut self, color: bool) {
        self.bytes.fill(if color { 0xFF } else { 0x00 });
    }

    /// Raw packed bytes, in the order the panel driver streams them.
    pub fn as_bytes(&self) -> &[u8; BUFFER_LEN] {
        &self.bytes
    }

    /// Number of lit pixels on the whole panel.
    pub fn count_lit(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_pixel_sets_lowest_bit_of_first_byte() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(0, 0, true, Viewport::Screen);

        assert_eq!(fb.as_bytes()[0], 0b0000_0001);
        assert!(fb.as_bytes()[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn rows_in_same_group_are_independent() {
        let mut fb = FrameBuffer::new();
        for y in 8..16 {
            fb.set_pixel(3, y, true, Viewport::Screen);
        }
        fb.set_pixel(3, 11, false, Viewport::Screen);

        assert_eq!(fb.byte(3, 8), 0b1111_0111);
        assert_eq!(fb.byte(2, 8), 0);
        assert_eq!(fb.byte(4, 8), 0);
        assert_eq!(fb.byte(3, 0), 0);
        assert_eq!(fb.byte(3, 16), 0);
    }

    #[test]
    fn raycast_viewport_drops_hud_rows() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(5, RENDER_HEIGHT as i16, true, Viewport::Raycast);
        assert_eq!(fb.count_lit(), 0);

        fb.set_pixel(5, RENDER_HEIGHT as i16, true, Viewport::Screen);
        assert!(fb.pixel(5, RENDER_HEIGHT as i16));
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(-1, 0, true, Viewport::Screen);
        fb.set_pixel(0, -1, true, Viewport::Screen);
        fb.set_pixel(SCREEN_WIDTH as i16, 0, true, Viewport::Screen);
        fb.set_pixel(0, SCREEN_HEIGHT as i16, true, Viewport::Screen);
        fb.write_byte(SCREEN_WIDTH, 0, 0xFF);
        fb.write_byte_masked(0, SCREEN_HEIGHT, 0xFF, 0xFF);

        assert_eq!(fb, FrameBuffer::new());
        assert!(!fb.pixel(-1, -1));
    }

    #[test]
    fn masked_write_keeps_unselected_rows() {
        let mut fb = FrameBuffer::new();
        fb.write_byte(7, 0, 0b1000_0001);
        fb.write_byte_masked(7, 3, 0b0000_0110, 0b0000_1110);

        assert_eq!(fb.byte(7, 0), 0b1000_0111);
    }

    #[test]
    fn clear_fills_every_byte() {
        let mut fb = FrameBuffer::new();
        fb.clear(true);
        assert_eq!(fb.count_lit(), SCREEN_WIDTH * SCREEN_HEIGHT);
        fb.clear(false);
        assert_eq!(fb.count_lit(), 0);
    }
}
