//! Monoray (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof and holds the demo
//! configuration shared by the binary and its tests.

pub mod config;

pub use monoray_core as core;
pub use monoray_engine as engine;
pub use monoray_input as input;
pub use monoray_term as term;
pub use monoray_types as types;
