//! Terminal input mapping.
//!
//! Maps `crossterm` key events to [`GameAction`](arcade_types::GameAction)s
//! for the Tetris engine and to [`DemoCommand`]s for the automaton and physics
//! demos. Independent of any UI framework.

pub mod map;

pub use arcade_types as types;

pub use map::{handle_bounce_key, handle_key_event, handle_life_key, is_press, should_quit, DemoCommand};
