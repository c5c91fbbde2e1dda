//! Renderer: owns the panel, the depth buffer and the shade table
//!
//! Drawing order within a frame is the caller's business, with one rule: the
//! wall pass fills the Z-buffer (and draws its columns) before any sprite is
//! drawn, because sprites only ever read it.

use tracing::debug;

use crate::dither::{DitherTable, GRADIENT};
use crate::framebuffer::{FrameBuffer, Viewport};
use crate::sprite::{EntityDrawRecord, SpriteScale, SpriteSheet};
use crate::types::{RENDER_HEIGHT, RES_DIVIDER, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::zbuffer::ZBuffer;

/// Column strategy, fixed at build time by the `packed-columns` feature.
pub const PACKED_COLUMNS: bool = cfg!(feature = "packed-columns");

#[derive(Debug, Clone)]
pub struct Renderer {
    fb: FrameBuffer,
    zbuffer: ZBuffer,
    dither: &'static DitherTable,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        debug!(
            width = SCREEN_WIDTH,
            height = SCREEN_HEIGHT,
            packed_columns = PACKED_COLUMNS,
            "renderer initialised"
        );
        Self {
            fb: FrameBuffer::new(),
            zbuffer: ZBuffer::new(),
            dither: &GRADIENT,
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    pub fn zbuffer(&self) -> &ZBuffer {
        &self.zbuffer
    }

    pub fn zbuffer_mut(&mut self) -> &mut ZBuffer {
        &mut self.zbuffer
    }

    /// Blank the panel. The Z-buffer is left to the wall pass.
    pub fn clear(&mut self) {
        self.fb.clear(false);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i16, y: i16, color: bool, viewport: Viewport) {
        self.fb.set_pixel(x, y, color, viewport);
    }

    /// Paint `color` over every pixel the shade `level` lights.
    ///
    /// Stepping `level` from 0 to white over a few frames fades the panel out.
    pub fn fade_screen(&mut self, level: u8, color: bool) {
        for x in 0..SCREEN_WIDTH {
            for y in 0..SCREEN_HEIGHT {
                if self.dither.is_lit(x, y, level) {
                    self.fb.set_pixel(x as i16, y as i16, color, Viewport::Screen);
                }
            }
        }
    }

    /// Draw one wall ray as a dithered vertical strip.
    ///
    /// Rows `start_row..=end_row` (in either order, clamped to the raycast
    /// viewport) of columns `x..x + RES_DIVIDER` are written as lit or unlit
    /// according to `shade`. Rows outside the range are left alone.
    pub fn draw_column(&mut self, x: i16, start_row: i16, end_row: i16, shade: u8) {
        let lower = start_row.min(end_row).max(0);
        let higher = start_row.max(end_row).min(RENDER_HEIGHT as i16 - 1);
        if lower > higher {
            return;
        }
        let (lower, higher) = (lower as usize, higher as usize);

        if PACKED_COLUMNS {
            self.draw_column_packed(x, lower, higher, shade);
        } else {
            self.draw_column_per_pixel(x, lower, higher, shade);
        }
    }

    fn ray_columns(x: i16) -> impl Iterator<Item = usize> {
        (0..RES_DIVIDER as i16)
            .map(move |c| x.saturating_add(c))
            .filter(|&col| col >= 0 && (col as usize) < SCREEN_WIDTH)
            .map(|col| col as usize)
    }

    fn draw_column_packed(&mut self, x: i16, lower: usize, higher: usize, shade: u8) {
        for col in Self::ray_columns(x) {
            let mut y = lower;
            while y <= higher {
                let group_end = (y | 7).min(higher);
                let mut bits = 0u8;
                let mut mask = 0u8;
                for row in y..=group_end {
                    let bit = 1u8 << (row & 7);
                    mask |= bit;
                    if self.dither.is_lit(col, row, shade) {
                        bits |= bit;
                    }
                }
                self.fb.write_byte_masked(col, y, bits, mask);
                y = group_end + 1;
            }
        }
    }

    fn draw_column_per_pixel(&mut self, x: i16, lower: usize, higher: usize, shade: u8) {
        for row in lower..=higher {
            for col in Self::ray_columns(x) {
                let lit = self.dither.is_lit(col, row, shade);
                self.fb
                    .set_pixel(col as i16, row as i16, lit, Viewport::Raycast);
            }
        }
    }

    /// Draw a masked sprite scaled for `distance`, with its top-left at `(x, y)`.
    ///
    /// The whole sprite is skipped when the Z-buffer under column `x` holds a
    /// nearer wall. Past that single test, pixels are clipped one by one
    /// against the raycast viewport.
    pub fn draw_sprite(
        &mut self,
        x: i16,
        y: i16,
        sheet: &SpriteSheet<'_>,
        sprite: u8,
        distance: f32,
    ) {
        if self.zbuffer.occludes(x, distance) {
            return;
        }

        let scale = SpriteScale::for_distance(sheet.width, sheet.height, distance);
        let block = scale.block as usize;
        let max_sx = sheet.width.saturating_sub(1) as usize;
        let max_sy = sheet.height.saturating_sub(1) as usize;

        let (width, height) = (scale.width as usize, scale.height as usize);

        for ty in (0..height).step_by(block) {
            let dy = y as i32 + ty as i32;
            if dy < 0 || dy >= RENDER_HEIGHT as i32 {
                continue;
            }
            let sy = ((ty as f32 * scale.step) as usize).min(max_sy);
            // The last block row/column is cut to the scaled size.
            let rows = block.min(height - ty) as i32;

            for tx in (0..width).step_by(block) {
                let dx = x as i32 + tx as i32;
                if dx < 0 || dx >= SCREEN_WIDTH as i32 {
                    continue;
                }
                let sx = ((tx as f32 * scale.step) as usize).min(max_sx);
                let cols = block.min(width - tx) as i32;

                let Some((opaque, color)) = sheet.sample(sprite, sx, sy) else {
                    continue;
                };
                if !opaque {
                    continue;
                }
                for oy in 0..rows {
                    for ox in 0..cols {
                        self.fb.set_pixel(
                            (dx + ox) as i16,
                            (dy + oy) as i16,
                            color,
                            Viewport::Raycast,
                        );
                    }
                }
            }
        }
    }

    pub fn draw_record(&mut self, record: &EntityDrawRecord<'_>) {
        self.draw_sprite(
            record.x,
            record.y,
            record.sheet,
            record.sprite,
            record.distance,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::MIN_SPRITE_DISTANCE;
    use crate::types::{GRADIENT_WHITE, ZBUFFER_SIZE};

    const SOLID_16: [u8; 32] = [0xFF; 32];

    fn solid_sheet() -> SpriteSheet<'static> {
        SpriteSheet::new(&SOLID_16, &SOLID_16, 16, 16)
    }

    fn lit_box(fb: &FrameBuffer) -> Option<(i16, i16, i16, i16)> {
        let mut bounds: Option<(i16, i16, i16, i16)> = None;
        for y in 0..SCREEN_HEIGHT as i16 {
            for x in 0..SCREEN_WIDTH as i16 {
                if fb.pixel(x, y) {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    });
                }
            }
        }
        bounds
    }

    #[test]
    fn unlit_shade_leaves_column_dark() {
        let mut r = Renderer::new();
        r.draw_column(10, 5, 20, 0);
        for y in 5..=20 {
            assert!(!r.framebuffer().pixel(10, y));
        }
    }

    #[test]
    fn unlit_shade_erases_previous_content_in_range_only() {
        let mut r = Renderer::new();
        r.framebuffer_mut().clear(true);
        r.draw_column(10, 5, 20, 0);

        for y in 0..SCREEN_HEIGHT as i16 {
            let in_range = (5..=20).contains(&y);
            assert_eq!(r.framebuffer().pixel(10, y), !in_range, "row {y}");
            assert_eq!(r.framebuffer().pixel(11, y), !in_range, "row {y}");
            assert!(r.framebuffer().pixel(9, y));
            assert!(r.framebuffer().pixel(12, y));
        }
    }

    #[test]
    fn column_covers_res_divider_columns() {
        let mut r = Renderer::new();
        r.draw_column(40, 0, 10, GRADIENT_WHITE);
        assert_eq!(r.framebuffer().count_lit(), 11 * RES_DIVIDER);
    }

    #[test]
    fn column_rows_are_ordered_and_clamped() {
        let mut r = Renderer::new();
        r.draw_column(0, 100, -20, GRADIENT_WHITE);
        assert_eq!(r.framebuffer().count_lit(), RENDER_HEIGHT * RES_DIVIDER);
        assert!(!r.framebuffer().pixel(0, RENDER_HEIGHT as i16));

        let mut r = Renderer::new();
        r.draw_column(0, -10, -2, GRADIENT_WHITE);
        r.draw_column(SCREEN_WIDTH as i16, 0, 10, GRADIENT_WHITE);
        r.draw_column(-(RES_DIVIDER as i16), 0, 10, GRADIENT_WHITE);
        assert_eq!(r.framebuffer().count_lit(), 0);
    }

    #[test]
    fn packed_and_per_pixel_columns_agree() {
        for shade in 0..=GRADIENT_WHITE {
            for (start, end) in [(0, 55), (3, 3), (5, 20), (7, 8), (9, 14), (17, 40)] {
                let mut packed = Renderer::new();
                let mut plain = Renderer::new();
                packed.framebuffer_mut().clear(true);
                plain.framebuffer_mut().clear(true);

                let (lo, hi) = (start as usize, end as usize);
                packed.draw_column_packed(33, lo, hi, shade);
                plain.draw_column_per_pixel(33, lo, hi, shade);

                assert_eq!(packed.framebuffer(), plain.framebuffer(), "shade {shade} {start}..{end}");
            }
        }
    }

    #[test]
    fn fade_white_fills_and_black_is_noop() {
        let mut r = Renderer::new();
        r.fade_screen(0, true);
        assert_eq!(r.framebuffer().count_lit(), 0);

        r.fade_screen(GRADIENT_WHITE, true);
        assert_eq!(r.framebuffer().count_lit(), SCREEN_WIDTH * SCREEN_HEIGHT);

        r.fade_screen(GRADIENT_WHITE / 2, false);
        let lit = r.framebuffer().count_lit();
        assert!(lit > 0 && lit < SCREEN_WIDTH * SCREEN_HEIGHT);
    }

    #[test]
    fn sprite_at_distance_two_is_eight_pixels_square() {
        let mut r = Renderer::new();
        r.draw_sprite(20, 10, &solid_sheet(), 0, 2.0);
        assert_eq!(lit_box(r.framebuffer()), Some((20, 10, 27, 17)));
        assert_eq!(r.framebuffer().count_lit(), 64);
    }

    #[test]
    fn sprite_at_half_distance_is_thirty_two_pixels_square() {
        let mut r = Renderer::new();
        r.draw_sprite(20, 10, &solid_sheet(), 0, 0.5);
        assert_eq!(lit_box(r.framebuffer()), Some((20, 10, 51, 41)));
        assert_eq!(r.framebuffer().count_lit(), 32 * 32);
    }

    #[test]
    fn occluded_sprite_writes_nothing() {
        let mut r = Renderer::new();
        r.framebuffer_mut().write_byte(50, 0, 0b1010_1010);
        r.zbuffer_mut().set_raw(ZBuffer::group_for_column(50), 50);
        let before = r.framebuffer().clone();

        r.draw_sprite(50, 0, &solid_sheet(), 0, 3.0);
        assert_eq!(r.framebuffer(), &before);

        r.draw_sprite(50, 0, &solid_sheet(), 0, 2.0);
        assert_ne!(r.framebuffer(), &before);
    }

    #[test]
    fn occlusion_samples_only_the_anchor_column() {
        let mut r = Renderer::new();
        for g in 0..ZBUFFER_SIZE {
            r.zbuffer_mut().set_raw(g, 0);
        }
        r.zbuffer_mut().set_raw(ZBuffer::group_for_column(60), u8::MAX);

        r.draw_sprite(60, 0, &solid_sheet(), 0, 1.0);
        assert_eq!(r.framebuffer().count_lit(), 256);
    }

    #[test]
    fn sprite_mask_selects_written_pixels() {
        // 8x2: mask covers the left half, bitmap lights alternate pixels.
        let bitmap = [0b1010_1010, 0b1010_1010];
        let mask = [0b1111_0000, 0b1111_0000];
        let sheet = SpriteSheet::new(&bitmap, &mask, 8, 2);

        let mut r = Renderer::new();
        r.framebuffer_mut().clear(true);
        r.draw_sprite(0, 0, &sheet, 0, 1.0);

        let fb = r.framebuffer();
        for y in 0..2 {
            assert!(fb.pixel(0, y));
            assert!(!fb.pixel(1, y));
            assert!(fb.pixel(2, y));
            assert!(!fb.pixel(3, y));
            for x in 4..8 {
                assert!(fb.pixel(x, y), "transparent pixel ({x},{y}) overwritten");
            }
        }
    }

    #[test]
    fn sprite_is_clipped_per_pixel() {
        let mut r = Renderer::new();
        r.draw_sprite(-8, RENDER_HEIGHT as i16 - 8, &solid_sheet(), 0, 1.0);

        assert_eq!(lit_box(r.framebuffer()), Some((0, 48, 7, 55)));
        assert_eq!(r.framebuffer().count_lit(), 64);
    }

    #[test]
    fn sheet_index_selects_cell() {
        // Two 8x1 cells: cell 0 lights x=0, cell 1 lights x=7.
        let bitmap = [0b1000_0000, 0b0000_0001];
        let mask = [0xFF, 0xFF];
        let sheet = SpriteSheet::new(&bitmap, &mask, 8, 1);

        let mut r = Renderer::new();
        r.draw_sprite(0, 0, &sheet, 1, 1.0);
        assert!(r.framebuffer().pixel(7, 0));
        assert!(!r.framebuffer().pixel(0, 0));

        let mut r = Renderer::new();
        r.draw_sprite(0, 0, &sheet, 5, 1.0);
        assert_eq!(r.framebuffer().count_lit(), 0);
    }

    #[test]
    fn degenerate_sprites_draw_nothing() {
        let empty: [u8; 0] = [];
        let sheet = SpriteSheet::new(&empty, &empty, 0, 0);
        let mut r = Renderer::new();
        r.draw_sprite(10, 10, &sheet, 0, 0.0);
        r.draw_sprite(10, 10, &solid_sheet(), 0, 500.0);
        assert_eq!(r.framebuffer().count_lit(), 0);
    }

    #[test]
    fn drawn_extent_matches_scale_and_shrinks_with_distance() {
        let drawn = |distance: f32| {
            let mut r = Renderer::new();
            r.draw_sprite(0, 0, &solid_sheet(), 0, distance);
            let fb = r.framebuffer();
            let width = (0..SCREEN_WIDTH as i16).filter(|&x| fb.pixel(x, 0)).count();
            let height = (0..SCREEN_HEIGHT as i16).filter(|&y| fb.pixel(0, y)).count();
            (width, height)
        };

        let mut prev = drawn(MIN_SPRITE_DISTANCE);
        let mut d = MIN_SPRITE_DISTANCE;
        while d < 4.0 {
            let scale = SpriteScale::for_distance(16, 16, d);
            let (width, height) = drawn(d);
            assert_eq!(width, (scale.width as usize).min(SCREEN_WIDTH), "d={d}");
            assert_eq!(height, (scale.height as usize).min(RENDER_HEIGHT), "d={d}");
            assert!(width <= prev.0 && height <= prev.1, "grew at d={d}");
            prev = (width, height);
            d += 0.001;
        }

        // 16 / 0.143 = 111.8 with 6px blocks; the last block is cut to 111.
        assert_eq!(drawn(0.143).0, 111);
        assert_eq!(drawn(0.3).0, 53);
    }
}
