//! Cellular automaton module - cells, rule sets and the generation stepper
//!
//! - [`rules`]: birth/survival rule sets, B/S notation and the named presets
//! - [`cell`]: one cell with the two-phase calculate/apply update
//! - [`grid`]: [`LifeGrid`], which advances every cell one generation atomically
//!
//! # Example
//!
//! ```
//! use arcade_automaton::{LifeGrid, RuleSet};
//!
//! let mut grid = LifeGrid::new(5, 5, RuleSet::CONWAY);
//! grid.set_alive(1, 2, true);
//! grid.set_alive(2, 2, true);
//! grid.set_alive(3, 2, true);
//!
//! grid.step();
//! assert!(grid.is_alive(2, 1) && grid.is_alive(2, 3));
//! assert!(!grid.is_alive(1, 2));
//! ```

pub mod cell;
pub mod grid;
pub mod rules;

pub use cell::{AutomatonEvent, Cell};
pub use grid::{LifeConfig, LifeGrid};
pub use rules::{NeighborSet, RuleSet};
