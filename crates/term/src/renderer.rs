//! TerminalRenderer: flushes panel glyphs to a real terminal.
//!
//! The palette is set once per frame. The first frame (and any frame after a
//! resize or palette change) is a full redraw; otherwise only runs of changed
//! glyphs are sent.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{Color, Colors, ResetColor, SetColors},
    terminal, QueueableCommand,
};

use crate::cells::{CellBuffer, Palette, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen
    shown: Option<CellBuffer>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.flush().context("enter alternate screen")
    }

    /// Undo [`enter`](Self::enter). Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(ResetColor)?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode().context("disable raw mode")
    }

    /// Force a full redraw on the next frame (after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `frame`, then hand the previously shown buffer back through it.
    ///
    /// The caller keeps drawing into the same `CellBuffer` every frame; no
    /// clone is made.
    pub fn draw_swap(&mut self, frame: &mut CellBuffer) -> Result<()> {
        self.out.clear();
        let mut spare = match self.shown.take() {
            Some(shown) if same_layout(&shown, frame) => {
                encode_diff_into(&shown, frame, &mut self.out)?;
                shown
            }
            Some(mut shown) => {
                encode_full_into(frame, &mut self.out)?;
                shown.resize(frame.width(), frame.height());
                shown
            }
            None => {
                encode_full_into(frame, &mut self.out)?;
                CellBuffer::new(frame.width(), frame.height())
            }
        };
        self.flush()?;

        std::mem::swap(&mut spare, frame);
        self.shown = Some(spare);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn same_layout(a: &CellBuffer, b: &CellBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height() && a.palette() == b.palette()
}

/// Encode a full redraw of `frame` into `out`.
pub fn encode_full_into(frame: &CellBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(set_palette(frame.palette()))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        put_glyphs(out, frame.row(y));
    }
    out.queue(ResetColor)?;
    Ok(())
}

/// Encode only the runs of glyphs that differ from `prev` into `out`.
///
/// Emits nothing at all when the frames are identical.
pub fn encode_diff_into(prev: &CellBuffer, next: &CellBuffer, out: &mut Vec<u8>) -> Result<()> {
    if !same_layout(prev, next) {
        return encode_full_into(next, out);
    }

    let mut palette_set = false;
    for_each_changed_run(prev, next, |x, y, len| {
        if !palette_set {
            out.queue(set_palette(next.palette()))?;
            palette_set = true;
        }
        out.queue(cursor::MoveTo(x, y))?;
        let start = x as usize;
        put_glyphs(out, &next.row(y)[start..start + len as usize]);
        Ok(())
    })?;

    if palette_set {
        out.queue(ResetColor)?;
    }
    Ok(())
}

fn put_glyphs(out: &mut Vec<u8>, glyphs: &[char]) {
    let mut utf8 = [0u8; 4];
    for &ch in glyphs {
        out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }
}

fn set_palette(palette: Palette) -> SetColors {
    SetColors(Colors::new(rgb_to_color(palette.lit), rgb_to_color(palette.unlit)))
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for each horizontal run of changed glyphs.
///
/// Both buffers must share a layout.
fn for_each_changed_run(
    prev: &CellBuffer,
    next: &CellBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    for y in 0..next.height() {
        let (old, new) = (prev.row(y), next.row(y));
        let mut x = 0;
        while x < new.len() {
            if old[x] == new[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < new.len() && old[x] != new[x] {
                x += 1;
            }
            f(start as u16, y, (x - start) as u16)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(a: &CellBuffer, b: &CellBuffer) -> Vec<(u16, u16, u16)> {
        let mut runs = Vec::new();
        for_each_changed_run(a, b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        runs
    }

    #[test]
    fn changed_runs_coalesce_adjacent_glyphs() {
        let a = CellBuffer::new(5, 2);
        let mut b = CellBuffer::new(5, 2);
        for x in 1..=3 {
            b.set(x, 0, '█');
        }
        b.set(4, 1, '▄');
        assert_eq!(runs(&a, &b), vec![(1, 0, 3), (4, 1, 1)]);
    }

    #[test]
    fn identical_frames_encode_to_nothing() {
        let a = CellBuffer::new(8, 3);
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn layout_change_falls_back_to_full_redraw() {
        let a = CellBuffer::new(4, 2);
        let b = CellBuffer::new(6, 3);
        let mut diff = Vec::new();
        encode_diff_into(&a, &b, &mut diff).unwrap();
        let mut full = Vec::new();
        encode_full_into(&b, &mut full).unwrap();
        assert_eq!(diff, full);

        let mut c = a.clone();
        c.set_palette(Palette {
            lit: Rgb::new(255, 0, 0),
            unlit: Rgb::new(0, 0, 0),
        });
        let mut diff = Vec::new();
        encode_diff_into(&a, &c, &mut diff).unwrap();
        assert!(String::from_utf8_lossy(&diff).contains("255;0;0"));
    }

    #[test]
    fn diff_output_is_smaller_than_full_redraw() {
        let a = CellBuffer::new(128, 32);
        let mut b = a.clone();
        b.set(10, 10, '▀');

        let mut full = Vec::new();
        encode_full_into(&b, &mut full).unwrap();
        let mut diff = Vec::new();
        encode_diff_into(&a, &b, &mut diff).unwrap();

        assert!(!diff.is_empty());
        assert!(diff.len() < full.len() / 10);
        assert!(String::from_utf8_lossy(&diff).contains('▀'));
    }

    #[test]
    fn palette_is_set_once_per_frame() {
        let mut frame = CellBuffer::new(16, 4);
        frame.set(0, 0, '█');
        frame.set(15, 3, '▄');
        let mut full = Vec::new();
        encode_full_into(&frame, &mut full).unwrap();
        let text = String::from_utf8_lossy(&full);
        assert_eq!(text.matches("38;2;120;200;255").count(), 1);
    }

    #[test]
    fn colors_are_truecolor() {
        assert_eq!(rgb_to_color(Rgb::new(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
