//! 4x6 bitmap font and text drawing
//!
//! Glyphs are stored two per byte: for each glyph row the font holds one
//! byte per glyph pair, the even glyph in the high nibble and the odd glyph
//! in the low nibble (MSB = leftmost pixel).
//!
//! Characters resolve through a 128-entry ASCII table built at compile time.
//! Lower-case letters share the upper-case glyphs. Anything without a glyph
//! draws nothing but still takes up a cell.

use arrayvec::ArrayString;

use crate::framebuffer::Viewport;
use crate::renderer::Renderer;
use crate::types::{CHAR_HEIGHT, CHAR_WIDTH, SCREEN_WIDTH};

/// Characters with a glyph, in font order.
pub const CHAR_MAP: &str = " 0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ.,-_():!?%/";

const GLYPH_COUNT: usize = CHAR_MAP.len();

/// Font bytes per glyph row (two glyphs per byte).
pub const FONT_ROW_BYTES: usize = (GLYPH_COUNT + 1) / 2;

const NO_GLYPH: u8 = u8::MAX;

#[rustfmt::skip]
const GLYPHS: [[&str; CHAR_HEIGHT]; GLYPH_COUNT] = [
    ["....", "....", "....", "....", "....", "...."], // ' '
    ["###.", "#.#.", "#.#.", "#.#.", "###.", "...."], // 0
    [".#..", "##..", ".#..", ".#..", "###.", "...."], // 1
    ["###.", "..#.", "###.", "#...", "###.", "...."], // 2
    ["###.", "..#.", "###.", "..#.", "###.", "...."], // 3
    ["#.#.", "#.#.", "###.", "..#.", "..#.", "...."], // 4
    ["###.", "#...", "###.", "..#.", "###.", "...."], // 5
    ["###.", "#...", "###.", "#.#.", "###.", "...."], // 6
    ["###.", "..#.", "..#.", ".#..", ".#..", "...."], // 7
    ["###.", "#.#.", "###.", "#.#.", "###.", "...."], // 8
    ["###.", "#.#.", "###.", "..#.", "###.", "...."], // 9
    [".#..", "#.#.", "###.", "#.#.", "#.#.", "...."], // A
    ["##..", "#.#.", "##..", "#.#.", "##..", "...."], // B
    [".##.", "#...", "#...", "#...", ".##.", "...."], // C
    ["##..", "#.#.", "#.#.", "#.#.", "##..", "...."], // D
    ["###.", "#...", "##..", "#...", "###.", "...."], // E
    ["###.", "#...", "##..", "#...", "#...", "...."], // F
    [".##.", "#...", "#.#.", "#.#.", ".##.", "...."], // G
    ["#.#.", "#.#.", "###.", "#.#.", "#.#.", "...."], // H
    ["###.", ".#..", ".#..", ".#..", "###.", "...."], // I
    ["..#.", "..#.", "..#.", "#.#.", ".#..", "...."], // J
    ["#.#.", "#.#.", "##..", "#.#.", "#.#.", "...."], // K
    ["#...", "#...", "#...", "#...", "###.", "...."], // L
    ["#.#.", "###.", "###.", "#.#.", "#.#.", "...."], // M
    ["##..", "#.#.", "#.#.", "#.#.", "#.#.", "...."], // N
    [".#..", "#.#.", "#.#.", "#.#.", ".#..", "...."], // O
    ["##..", "#.#.", "##..", "#...", "#...", "...."], // P
    [".#..", "#.#.", "#.#.", "##..", ".##.", "...."], // Q
    ["##..", "#.#.", "##..", "#.#.", "#.#.", "...."], // R
    [".##.", "#...", ".#..", "..#.", "##..", "...."], // S
    ["###.", ".#..", ".#..", ".#..", ".#..", "...."], // T
    ["#.#.", "#.#.", "#.#.", "#.#.", "###.", "...."], // U
    ["#.#.", "#.#.", "#.#.", "#.#.", ".#..", "...."], // V
    ["#.#.", "#.#.", "###.", "###.", "#.#.", "...."], // W
    ["#.#.", "#.#.", ".#..", "#.#.", "#.#.", "...."], // X
    ["#.#.", "#.#.", ".#..", ".#..", ".#..", "...."], // Y
    ["###.", "..#.", ".#..", "#...", "###.", "...."], // Z
    ["....", "....", "....", "....", ".#..", "...."], // .
    ["....", "....", "....", ".#..", ".#..", "#..."], // ,
    ["....", "....", "###.", "....", "....", "...."], // -
    ["....", "....", "....", "....", "....", "###."], // _
    ["..#.", ".#..", ".#..", ".#..", "..#.", "...."], // (
    ["#...", ".#..", ".#..", ".#..", "#...", "...."], // )
    ["....", ".#..", "....", ".#..", "....", "...."], // :
    [".#..", ".#..", ".#..", "....", ".#..", "...."], // !
    ["##..", "..#.", ".#..", "....", ".#..", "...."], // ?
    ["#.#.", "..#.", ".#..", "#...", "#.#.", "...."], // %
    ["..#.", "..#.", ".#..", "#...", "#...", "...."], // /
];

/// Packed font, `FONT_ROW_BYTES` per glyph row.
pub static FONT: [u8; FONT_ROW_BYTES * CHAR_HEIGHT] = pack_font();

/// ASCII code to glyph index, `NO_GLYPH` where unmapped.
static GLYPH_INDEX: [u8; 128] = build_index();

const fn pack_font() -> [u8; FONT_ROW_BYTES * CHAR_HEIGHT] {
    let mut font = [0u8; FONT_ROW_BYTES * CHAR_HEIGHT];
    let mut c = 0;
    while c < GLYPH_COUNT {
        let shift = if c % 2 == 0 { 0 } else { 4 };
        let mut line = 0;
        while line < CHAR_HEIGHT {
            let row = GLYPHS[c][line].as_bytes();
            let mut n = 0;
            while n < CHAR_WIDTH && n < row.len() {
                if row[n] == b'#' {
                    font[line * FONT_ROW_BYTES + c / 2] |= 0x80 >> (shift + n);
                }
                n += 1;
            }
            line += 1;
        }
        c += 1;
    }
    font
}

const fn build_index() -> [u8; 128] {
    let mut index = [NO_GLYPH; 128];
    let map = CHAR_MAP.as_bytes();
    let mut c = 0;
    while c < map.len() {
        let ch = map[c];
        index[ch as usize] = c as u8;
        if ch.is_ascii_uppercase() {
            index[ch.to_ascii_lowercase() as usize] = c as u8;
        }
        c += 1;
    }
    index
}

/// Glyph index for `ch`, or `None` if the font has no glyph for it.
pub fn glyph_index(ch: char) -> Option<usize> {
    let code = ch as u32;
    if code >= 128 {
        return None;
    }
    match GLYPH_INDEX[code as usize] {
        NO_GLYPH => None,
        i => Some(i as usize),
    }
}

impl Renderer {
    /// Draw one glyph with its top-left at `(x, y)`. Only lit pixels are written.
    pub fn draw_char(&mut self, x: i16, y: i16, ch: char) {
        let Some(c) = glyph_index(ch) else {
            return;
        };
        let shift = if c % 2 == 0 { 0 } else { 4 };
        for line in 0..CHAR_HEIGHT {
            let b = FONT[line * FONT_ROW_BYTES + c / 2];
            for n in 0..CHAR_WIDTH {
                if b & (0x80 >> (shift + n)) != 0 {
                    self.set_pixel(
                        x.saturating_add(n as i16),
                        y.saturating_add(line as i16),
                        true,
                        Viewport::Screen,
                    );
                }
            }
        }
    }

    /// Draw `text` left to right, advancing `CHAR_WIDTH + spacing` per character.
    ///
    /// Stops as soon as the cursor moves past the right edge of the panel.
    /// Returns how many characters were laid out.
    pub fn draw_text(&mut self, x: i16, y: i16, text: &str, spacing: u8) -> usize {
        let advance = CHAR_WIDTH as i16 + spacing as i16;
        let mut pos = x;
        let mut emitted = 0;
        for ch in text.chars() {
            self.draw_char(pos, y, ch);
            emitted += 1;
            pos = pos.saturating_add(advance);
            if pos > SCREEN_WIDTH as i16 {
                break;
            }
        }
        emitted
    }

    /// Draw `value` in decimal (up to 3 digits) with the default spacing.
    pub fn draw_number(&mut self, x: i16, y: i16, value: u8) -> usize {
        let mut digits = ArrayString::<3>::new();
        if value >= 100 {
            digits.push(digit(value / 100));
        }
        if value >= 10 {
            digits.push(digit(value / 10 % 10));
        }
        digits.push(digit(value % 10));
        self.draw_text(x, y, &digits, 1)
    }
}

fn digit(d: u8) -> char {
    char::from(b'0' + d)
}
