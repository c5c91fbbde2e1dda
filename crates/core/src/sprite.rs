//! Sprite sheets, perspective scale and draw records
//!
//! A sheet is a bitmap plus an opacity mask of identical layout: 1 bit per
//! pixel, MSB first, row-major, every cell the same size and stacked one
//! after another. Cell `i` starts at byte `i * cell_bytes()`.

/// Distances below this are treated as this (keeps block sizes bounded).
pub const MIN_SPRITE_DISTANCE: f32 = 0.125;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet<'a> {
    pub bitmap: &'a [u8],
    pub mask: &'a [u8],
    /// Cell width in pixels
    pub width: u16,
    /// Cell height in pixels
    pub height: u16,
}

impl<'a> SpriteSheet<'a> {
    pub const fn new(bitmap: &'a [u8], mask: &'a [u8], width: u16, height: u16) -> Self {
        Self {
            bitmap,
            mask,
            width,
            height,
        }
    }

    pub const fn row_bytes(&self) -> usize {
        (self.width as usize + 7) / 8
    }

    pub const fn cell_bytes(&self) -> usize {
        self.row_bytes() * self.height as usize
    }

    /// Number of complete cells in the sheet.
    pub fn cells(&self) -> usize {
        match self.cell_bytes() {
            0 => 0,
            n => self.bitmap.len().min(self.mask.len()) / n,
        }
    }

    /// Mask and bitmap bits for source pixel `(sx, sy)` of cell `index`.
    ///
    /// Returns `None` when the address falls outside the sheet.
    #[inline]
    pub fn sample(&self, index: u8, sx: usize, sy: usize) -> Option<(bool, bool)> {
        let offset = index as usize * self.cell_bytes() + sy * self.row_bytes() + sx / 8;
        let bit = 0x80u8 >> (sx % 8);
        let mask = *self.mask.get(offset)?;
        let pixel = *self.bitmap.get(offset)?;
        Some((mask & bit != 0, pixel & bit != 0))
    }
}

/// Destination size and replication block for a sprite at some distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteScale {
    /// Drawn width in pixels (`native / distance`)
    pub width: u16,
    /// Drawn height in pixels (`native / distance`)
    pub height: u16,
    /// Side of the square each sampled source pixel is replicated into
    pub block: u16,
    /// Source pixels advanced per destination pixel
    pub step: f32,
}

impl SpriteScale {
    /// Nearest-neighbour scale for a `width x height` sprite at `distance`.
    ///
    /// `distance` is clamped to at least [`MIN_SPRITE_DISTANCE`]; NaN counts as the minimum.
    pub fn for_distance(width: u16, height: u16, distance: f32) -> Self {
        let step = if distance >= MIN_SPRITE_DISTANCE {
            distance
        } else {
            MIN_SPRITE_DISTANCE
        };
        Self {
            width: (width as f32 / step) as u16,
            height: (height as f32 / step) as u16,
            block: ((1.0 / step) as u16).max(1),
            step,
        }
    }
}

/// One sprite to draw this frame, as produced by the entity pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityDrawRecord<'a> {
    /// Screen column of the sprite's left edge (also the occlusion anchor)
    pub x: i16,
    /// Screen row of the sprite's top edge
    pub y: i16,
    pub sheet: &'a SpriteSheet<'a>,
    pub sprite: u8,
    /// View distance in cells
    pub distance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_matches_reference_sizes() {
        let far = SpriteScale::for_distance(16, 16, 2.0);
        assert_eq!((far.width, far.height, far.block), (8, 8, 1));

        let near = SpriteScale::for_distance(16, 16, 0.5);
        assert_eq!((near.width, near.height, near.block), (32, 32, 2));
    }

    #[test]
    fn scale_shrinks_as_distance_grows() {
        let mut prev = SpriteScale::for_distance(16, 16, 0.01);
        let mut d = 0.01f32;
        while d < 20.0 {
            let s = SpriteScale::for_distance(16, 16, d);
            assert!(s.width <= prev.width && s.height <= prev.height, "d={d}");
            assert!(s.block >= 1);
            if d >= 1.0 {
                assert_eq!(s.block, 1, "d={d}");
            }
            prev = s;
            d += 0.05;
        }
    }

    #[test]
    fn degenerate_distances_are_clamped() {
        for d in [0.0, -3.0, f32::NAN, f32::NEG_INFINITY] {
            let s = SpriteScale::for_distance(16, 16, d);
            assert_eq!(s.step, MIN_SPRITE_DISTANCE);
            assert_eq!(s.block, 8);
            assert_eq!(s.width, 128);
        }
    }

    #[test]
    fn sheet_addresses_cells_rows_and_columns() {
        // 16x2 cells, two cells: row bytes = 2, cell bytes = 4.
        let bitmap = [0x80, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40];
        let mask = [0xFF; 8];
        let sheet = SpriteSheet::new(&bitmap, &mask, 16, 2);

        assert_eq!(sheet.row_bytes(), 2);
        assert_eq!(sheet.cell_bytes(), 4);
        assert_eq!(sheet.cells(), 2);
        assert_eq!(sheet.sample(0, 0, 0), Some((true, true)));
        assert_eq!(sheet.sample(0, 15, 0), Some((true, true)));
        assert_eq!(sheet.sample(0, 1, 0), Some((true, false)));
        assert_eq!(sheet.sample(1, 9, 1), Some((true, true)));
        assert_eq!(sheet.sample(2, 0, 0), None);
    }
}
