//! Status bar and title card

use monoray_core::Renderer;

use crate::types::{Player, CHAR_WIDTH, RENDER_HEIGHT, SCREEN_WIDTH};

/// First row of the status bar (the divider line).
pub const HUD_TOP: usize = RENDER_HEIGHT;

const TEXT_ROW: i16 = HUD_TOP as i16 + 2;

/// Redraw the status bar below the raycast viewport.
///
/// Shows health and keys; `fps` adds a frame-rate readout on the right.
pub fn draw_hud(renderer: &mut Renderer, player: &Player, fps: Option<f64>) {
    // HUD_TOP is byte aligned: one write per column blanks the bar and draws the divider.
    let fb = renderer.framebuffer_mut();
    for x in 0..SCREEN_WIDTH {
        fb.write_byte(x, HUD_TOP, 0x01);
    }

    let mut x = 2;
    x += advance(renderer.draw_text(x, TEXT_ROW, "HP", 1));
    x += advance(renderer.draw_number(x, TEXT_ROW, player.health));

    x += CHAR_WIDTH as i16 + 1;
    x += advance(renderer.draw_text(x, TEXT_ROW, "KEY", 1));
    renderer.draw_number(x, TEXT_ROW, player.keys);

    if let Some(fps) = fps {
        let value = fps.clamp(0.0, u8::MAX as f64).round() as u8;
        // Right-aligned: at most 3 digits plus the label.
        let right = SCREEN_WIDTH as i16 - 1;
        let label_x = right - advance(6);
        renderer.draw_text(label_x, TEXT_ROW, "FPS", 1);
        renderer.draw_number(label_x + advance(3), TEXT_ROW, value);
    }
}

fn advance(chars: usize) -> i16 {
    chars as i16 * (CHAR_WIDTH as i16 + 1)
}

/// Title card, faded toward black by `fade` (0 = fully visible).
pub fn draw_intro(renderer: &mut Renderer, fade: u8) {
    renderer.clear();
    renderer.draw_text(38, 20, "MONORAY", 2);
    renderer.draw_text(34, 40, "PRESS START", 1);
    renderer.fade_screen(fade, false);
}
