//! Falling-block puzzle engine.
//!
//! The engine is a plain state machine: the host feeds it elapsed time
//! ([`GameState::update`]) and input ([`GameState::apply_action`]), drains
//! [`TetrisEvent`]s, and renders from the public getters or a
//! [`GameSnapshot`]. Nothing here draws or reads a clock.
//!
//! ```
//! use arcade_tetris::{GameState, TetrisConfig};
//!
//! let mut game = GameState::new(TetrisConfig::default());
//! game.start();
//! assert!(game.current().is_some());
//! assert!(game.update(1000));
//! assert_eq!(game.current_position().1, 1);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timer;

pub use board::Board;
pub use game_state::{GameState, GameStatus, TetrisConfig, TetrisEvent};
pub use pieces::{Shape, ShapeCells, Tetromino, MAX_SHAPE_SIZE};
pub use rng::PieceGenerator;
pub use scoring::{hard_drop_score, line_clear_score, soft_drop_score};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use timer::TickTimer;

pub use arcade_types as types;
