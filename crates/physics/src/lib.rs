//! Rectangular rigid bodies for canvas games.
//!
//! ```
//! use arcade_physics::{Bounds, PhysicsBody};
//!
//! let mut ball = PhysicsBody::new(1, 10.0, 10.0, 20.0, 20.0);
//! ball.set_bounds(Bounds::new(0.0, 200.0, 0.0, 200.0));
//! ball.apply_impulse(5.0, 0.0);
//! ball.step();
//! assert!(ball.x() > 10.0);
//! ```

pub mod body;

pub use body::{
    pair_mut, resolve_all, BodyConfig, Bounds, Edge, PhysicsBody, PhysicsEvent, MIN_MASS,
};
