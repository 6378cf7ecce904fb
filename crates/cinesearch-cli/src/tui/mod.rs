//! TUI module for the interactive movie search.
//!
//! Uses `ratatui` + `crossterm` for rendering.

mod app;
/// Stateless renderers.
pub mod components;
/// Search screen state.
pub mod state;
mod ui;

pub use app::{TuiOptions, run_search_tui};
