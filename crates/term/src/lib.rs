//! Terminal panel driver.
//!
//! Stands in for the physical OLED: the packed panel is converted into
//! half-block character cells and flushed to the terminal with crossterm.
//!
//! - [`cells`]: glyph grid plus its color pair
//! - [`panel_view`]: packed panel to cells (pure, no I/O)
//! - [`renderer`]: raw-mode terminal output with diff redraws

pub mod cells;
pub mod panel_view;
pub mod renderer;

pub use monoray_core as core;
pub use monoray_types as types;

pub use cells::{CellBuffer, Palette, Rgb};
pub use panel_view::{half_block, AnchorY, PanelView, PANEL_COLS, PANEL_ROWS};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
