//! Glyph grid sent to the terminal.
//!
//! The panel is monochrome, so a frame needs only one color pair. Cells hold
//! bare glyphs and the buffer carries the [`Palette`] they are drawn with.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Lit pixels are the glyph foreground, unlit pixels the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub lit: Rgb,
    pub unlit: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            lit: Rgb::new(120, 200, 255),
            unlit: Rgb::new(0, 0, 0),
        }
    }
}

/// `width x height` glyphs, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBuffer {
    width: u16,
    height: u16,
    palette: Palette,
    glyphs: Vec<char>,
}

impl CellBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            palette: Palette::default(),
            glyphs: vec![' '; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Resize the grid, keeping the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.glyphs.resize((width as usize) * (height as usize), ' ');
    }

    /// One row of glyphs; empty past the bottom edge.
    pub fn row(&self, y: u16) -> &[char] {
        if y >= self.height {
            return &[];
        }
        let start = (y as usize) * (self.width as usize);
        &self.glyphs[start..start + self.width as usize]
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.idx(x, y).map(|i| self.glyphs[i])
    }

    pub fn set(&mut self, x: u16, y: u16, ch: char) {
        if let Some(i) = self.idx(x, y) {
            self.glyphs[i] = ch;
        }
    }

    pub fn clear(&mut self) {
        self.glyphs.fill(' ');
    }
}
