//! Tile-grid snake simulation engine.
//!
//! The core (`grid`, `obstacle`, `snake`, `food`, `collision`, `game`) is
//! pure and deterministic given a random source and clock readings. The
//! `runtime` module drives it against abstract input, renderer and
//! scoreboard collaborators; `renderer`, `keyboard` and `terminal_runtime`
//! provide the terminal implementations used by the binary.

pub mod clock;
pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod keyboard;
pub mod obstacle;
pub mod renderer;
pub mod runtime;
pub mod scene;
pub mod snake;
pub mod terminal_runtime;
