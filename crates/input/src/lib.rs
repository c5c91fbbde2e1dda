//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the controller [`Buttons`](crate::types::Buttons)
//! layout and keeps a held-button latch that works in terminals without
//! key-release events.

pub mod handler;
pub mod map;

pub use monoray_types as types;

pub use handler::{ButtonLatch, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
pub use map::{map_key, should_quit};
