//! Canvas Arcade (workspace facade crate).
//!
//! Game widgets for pixel surfaces: a falling-block puzzle engine, a
//! cellular automaton, rectangular rigid bodies and a layer compositor.
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them under short names and hosts the terminal runner's
//! configuration and demo scenes.

pub use arcade_automaton as automaton;
pub use arcade_board as board;
pub use arcade_input as input;
pub use arcade_physics as physics;
pub use arcade_term as term;
pub use arcade_tetris as tetris;
pub use arcade_types as types;

pub mod cli;
pub mod scenes;
