//! Built-in sprite sheets
//!
//! Art is written as text rows: `#` lit and opaque, `o` unlit but opaque,
//! `.` transparent. Rows are packed at compile time into the MSB-first
//! bitmap/mask layout [`SpriteSheet`] reads.

use crate::sprite::SpriteSheet;

/// Pack text rows into 1-bit rows, setting a bit where the character is in `set`.
const fn pack_rows<const N: usize>(rows: &[&str], width: usize, set: &[u8]) -> [u8; N] {
    let row_bytes = (width + 7) / 8;
    let mut out = [0u8; N];
    let mut r = 0;
    while r < rows.len() {
        let row = rows[r].as_bytes();
        let mut x = 0;
        while x < width && x < row.len() {
            let mut s = 0;
            while s < set.len() {
                if row[x] == set[s] {
                    out[r * row_bytes + x / 8] |= 0x80 >> (x % 8);
                }
                s += 1;
            }
            x += 1;
        }
        r += 1;
    }
    out
}

const LIT: &[u8] = b"#";
const OPAQUE: &[u8] = b"#o";

/// Imp cell: standing.
pub const IMP_STAND: u8 = 0;
/// Imp cell: attacking.
pub const IMP_FIRING: u8 = 1;

#[rustfmt::skip]
const IMP_ART: [&str; 32] = [
    // stand
    "......####......",
    ".....#oooo#.....",
    "....#o#oo#o#....",
    "....#oooooo#....",
    ".....#o##o#.....",
    "......#oo#......",
    "...##########...",
    "..#oooo##oooo#..",
    ".#oo#oooooo#oo#.",
    ".#o#.#oooo#.#o#.",
    "..#..#oooo#..#..",
    ".....#o##o#.....",
    ".....#o#.#o#....",
    "....#o#...#o#...",
    "....#o#....#o#..",
    "...###.....###..",
    // firing
    "......####......",
    ".....#oooo#.....",
    "....#o#oo#o#....",
    "....#oooooo#....",
    ".....#o..o#.....",
    "#.....#oo#.....#",
    "##.##########.##",
    ".#ooooo##ooooo#.",
    "...#oooooooo#...",
    ".....#oooo#.....",
    ".....#oooo#.....",
    ".....#o##o#.....",
    ".....#o#.#o#....",
    "....#o#...#o#...",
    "....#o#....#o#..",
    "...###.....###..",
];

static IMP_BITMAP: [u8; 64] = pack_rows(&IMP_ART, 16, LIT);
static IMP_MASK: [u8; 64] = pack_rows(&IMP_ART, 16, OPAQUE);

/// The enemy, two 16x16 cells.
pub static IMP: SpriteSheet<'static> = SpriteSheet::new(&IMP_BITMAP, &IMP_MASK, 16, 16);

#[rustfmt::skip]
const MEDIKIT_ART: [&str; 8] = [
    "........",
    "..####..",
    ".#oooo#.",
    "#ooo#oo#",
    "#o###oo#",
    "#ooo#oo#",
    "########",
    "........",
];

static MEDIKIT_BITMAP: [u8; 8] = pack_rows(&MEDIKIT_ART, 8, LIT);
static MEDIKIT_MASK: [u8; 8] = pack_rows(&MEDIKIT_ART, 8, OPAQUE);

pub static MEDIKIT: SpriteSheet<'static> =
    SpriteSheet::new(&MEDIKIT_BITMAP, &MEDIKIT_MASK, 8, 8);

#[rustfmt::skip]
const KEY_ART: [&str; 8] = [
    "........",
    ".###....",
    "#ooo#...",
    "#o.o####",
    "#ooo#o#o",
    ".###..#.",
    "........",
    "........",
];

static KEY_BITMAP: [u8; 8] = pack_rows(&KEY_ART, 8, LIT);
static KEY_MASK: [u8; 8] = pack_rows(&KEY_ART, 8, OPAQUE);

pub static KEY: SpriteSheet<'static> = SpriteSheet::new(&KEY_BITMAP, &KEY_MASK, 8, 8);

#[rustfmt::skip]
const FIREBALL_ART: [&str; 8] = [
    "........",
    "...##...",
    "..#oo#..",
    ".#o##o#.",
    ".#o##o#.",
    "..#oo#..",
    "...##...",
    "........",
];

static FIREBALL_BITMAP: [u8; 8] = pack_rows(&FIREBALL_ART, 8, LIT);
static FIREBALL_MASK: [u8; 8] = pack_rows(&FIREBALL_ART, 8, OPAQUE);

pub static FIREBALL: SpriteSheet<'static> =
    SpriteSheet::new(&FIREBALL_BITMAP, &FIREBALL_MASK, 8, 8);
