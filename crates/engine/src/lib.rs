//! Demo engine - level, wall pass, entity pass and HUD on top of the renderer
//!
//! Drives [`monoray_core::Renderer`] the way a game loop would:
//!
//! 1. [`caster::cast_walls`] draws one column per ray group and overwrites the
//!    whole Z-buffer
//! 2. [`projection::project_entities`] turns live entities into draw records,
//!    far to near
//! 3. [`projection::draw_entities`] blits them with Z-buffer occlusion
//! 4. [`hud::draw_hud`] fills the status bar
//!
//! [`Scene`] bundles the steps with player movement and item pickup.
//!
//! # Example
//!
//! ```
//! use monoray_core::Renderer;
//! use monoray_engine::Scene;
//! use monoray_types::Buttons;
//!
//! let mut scene = Scene::demo().unwrap();
//! let mut renderer = Renderer::new();
//!
//! scene.update(Buttons::UP, 1.0);
//! scene.render(&mut renderer, None);
//! assert!(renderer.framebuffer().count_lit() > 0);
//! ```

pub mod caster;
pub mod hud;
pub mod level;
pub mod movement;
pub mod projection;
pub mod scene;

pub use monoray_types as types;

pub use caster::{cast_ray, cast_walls, RayHit, Side};
pub use hud::{draw_hud, draw_intro, HUD_TOP};
pub use level::{Level, LevelError, DEMO_LEVEL};
pub use projection::{draw_entities, project_entities, DrawList};
pub use scene::Scene;
