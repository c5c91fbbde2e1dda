//! Ordered-dither shade table
//!
//! A 1-bit panel fakes gray by lighting a fraction of the pixels in a fixed
//! pattern. Each of the `GRADIENT_COUNT` levels is a 16x8 tile (2 bytes per
//! row, MSB = leftmost pixel) that repeats across the whole panel.
//!
//! Intermediate levels come from an 8x8 Bayer matrix, so a pixel lit at one
//! level stays lit at every brighter level.

use crate::types::{GRADIENT_COUNT, GRADIENT_HEIGHT, GRADIENT_WIDTH};

const TILE_BYTES: usize = GRADIENT_WIDTH * GRADIENT_HEIGHT;

/// Bayer threshold matrix, values 0..64.
const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Read-only shade tiles, one per level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitherTable {
    tiles: [[u8; TILE_BYTES]; GRADIENT_COUNT as usize],
}

/// The shade table used by the renderer.
pub static GRADIENT: DitherTable = DitherTable::bayer();

impl DitherTable {
    /// Build the table from the Bayer matrix.
    ///
    /// Level `l` lights every pixel whose threshold is below `l * 64 / (GRADIENT_COUNT - 1)`.
    pub const fn bayer() -> Self {
        let mut tiles = [[0u8; TILE_BYTES]; GRADIENT_COUNT as usize];
        let top = (GRADIENT_COUNT - 1) as usize;
        let mut level = 0;
        while level <= top {
            let threshold = level * 64 / top;
            let mut y = 0;
            while y < GRADIENT_HEIGHT {
                let mut x = 0;
                while x < GRADIENT_WIDTH * 8 {
                    if (BAYER_8X8[y % 8][x % 8] as usize) < threshold {
                        tiles[level][y * GRADIENT_WIDTH + x / 8] |= 0x80 >> (x % 8);
                    }
                    x += 1;
                }
                y += 1;
            }
            level += 1;
        }
        Self { tiles }
    }

    /// Whether pixel `(x, y)` is lit at shade `level`.
    ///
    /// Levels at or above `GRADIENT_COUNT - 1` are fully lit; level 0 is fully unlit.
    #[inline]
    pub fn is_lit(&self, x: usize, y: usize, level: u8) -> bool {
        if level == 0 {
            return false;
        }
        if level >= GRADIENT_COUNT - 1 {
            return true;
        }
        let byte = self.tiles[level as usize]
            [(y % GRADIENT_HEIGHT) * GRADIENT_WIDTH + (x / 8) % GRADIENT_WIDTH];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// Lit pixels in one tile at `level` (out of 128).
    pub fn density(&self, level: u8) -> usize {
        let mut lit = 0;
        for y in 0..GRADIENT_HEIGHT {
            for x in 0..GRADIENT_WIDTH * 8 {
                if self.is_lit(x, y, level) {
                    lit += 1;
                }
            }
        }
        lit
    }
}
