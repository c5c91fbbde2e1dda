//! Rendering core - packed 1-bit framebuffer, shading, sprites, text and pacing
//!
//! Everything a frame needs lives in one [`Renderer`] value that the caller
//! constructs once and passes by `&mut` to every draw call. There is no hidden
//! global state and no heap allocation on any draw path:
//!
//! - **Packed**: the panel is a fixed `[u8; 1024]`, one byte per 8 vertical pixels
//! - **Total**: every draw call clips or clamps its inputs instead of failing
//! - **Deterministic**: the same calls produce the same bytes
//!
//! # Module Structure
//!
//! - [`framebuffer`]: packed pixel store and all bit addressing
//! - [`dither`]: ordered-dither shade table used for fog and fades
//! - [`zbuffer`]: per column-group wall depth used for sprite occlusion
//! - [`renderer`]: column, sprite and fade drawing
//! - [`text`]: 4x6 bitmap font, `draw_text` and `draw_number`
//! - [`sprite`]: sprite sheets, scale selection and draw records
//! - [`assets`]: compile-time packed sprite art
//! - [`clock`]: fixed frame-time pacing
//!
//! # Example
//!
//! ```
//! use monoray_core::{Renderer, Viewport};
//!
//! let mut renderer = Renderer::new();
//! renderer.draw_column(10, 5, 20, 7);
//! assert!(renderer.framebuffer().pixel(10, 12));
//!
//! renderer.draw_text(0, 58, "HP", 1);
//! renderer.set_pixel(127, 63, true, Viewport::Screen);
//! assert!(renderer.framebuffer().pixel(127, 63));
//! ```

pub mod assets;
pub mod clock;
pub mod dither;
pub mod framebuffer;
pub mod renderer;
pub mod sprite;
pub mod text;
pub mod zbuffer;

pub use monoray_types as types;

pub use clock::{Clock, FrameClock, SystemClock};
pub use dither::{DitherTable, GRADIENT};
pub use framebuffer::{FrameBuffer, Viewport, BUFFER_LEN};
pub use renderer::{Renderer, PACKED_COLUMNS};
pub use sprite::{EntityDrawRecord, SpriteScale, SpriteSheet, MIN_SPRITE_DISTANCE};
pub use zbuffer::ZBuffer;
