//! Reduced-resolution depth buffer for sprite occlusion
//!
//! One `u8` per `Z_RES_DIVIDER` screen columns, holding the nearest wall
//! distance in `1 / DISTANCE_MULTIPLIER` cell units (saturating at 255).
//!
//! The wall pass must overwrite every entry every frame before any sprite is
//! drawn; sprites only read it. A fresh or [`reset`](ZBuffer::reset) buffer
//! holds 255 everywhere, meaning nothing is in the way.

use crate::types::{DISTANCE_MULTIPLIER, SCREEN_WIDTH, ZBUFFER_SIZE, Z_RES_DIVIDER};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZBuffer {
    depths: [u8; ZBUFFER_SIZE],
}

impl Default for ZBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ZBuffer {
    pub const fn new() -> Self {
        Self {
            depths: [u8::MAX; ZBUFFER_SIZE],
        }
    }

    pub fn reset(&mut self) {
        self.depths.fill(u8::MAX);
    }

    /// Convert a distance in cells to the stored fixed-point unit.
    pub fn quantize(distance: f32) -> u8 {
        if distance.is_nan() {
            return u8::MAX;
        }
        // Float-to-int `as` saturates, so negatives land on 0 and far walls on 255.
        (distance * DISTANCE_MULTIPLIER as f32) as u8
    }

    /// Column group covering screen column `x`, clamped to the panel.
    pub fn group_for_column(x: i16) -> usize {
        (x.clamp(0, SCREEN_WIDTH as i16 - 1) as usize) / Z_RES_DIVIDER
    }

    /// Store a wall distance (in cells) for a column group.
    pub fn set(&mut self, group: usize, distance: f32) {
        self.set_raw(group, Self::quantize(distance));
    }

    pub fn set_raw(&mut self, group: usize, depth: u8) {
        if let Some(slot) = self.depths.get_mut(group) {
            *slot = depth;
        }
    }

    pub fn get(&self, group: usize) -> u8 {
        self.depths.get(group).copied().unwrap_or(u8::MAX)
    }

    /// Whether a wall in front of screen column `x` is strictly nearer than `distance`.
    ///
    /// Only the single group under `x` is sampled.
    pub fn occludes(&self, x: i16, distance: f32) -> bool {
        let depth = self.depths[Self::group_for_column(x)];
        (depth as f32) < distance * DISTANCE_MULTIPLIER as f32
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.depths
    }
}
