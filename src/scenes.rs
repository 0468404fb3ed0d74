//! Bouncing-bodies scene used by the `bounce` demo.

use crate::cli::BounceConfig;
use crate::physics::{resolve_all, Bounds, PhysicsBody, PhysicsEvent};
use crate::types::SimpleRng;

/// Impulse applied per push command.
pub const PUSH_IMPULSE: f32 = 1.5;

/// Dynamic bodies in a walled arena, with one static platform in the middle.
///
/// Body 0 is the one the player pushes around.
#[derive(Debug, Clone)]
pub struct BounceScene {
    config: BounceConfig,
    bodies: Vec<PhysicsBody>,
    frame: u64,
}

impl BounceScene {
    pub fn new(config: BounceConfig) -> Self {
        let mut scene = Self {
            config,
            bodies: Vec::new(),
            frame: 0,
        };
        scene.reset();
        scene
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, self.config.width, 0.0, self.config.height)
    }

    /// Scatter the bodies again from the configured seed.
    pub fn reset(&mut self) {
        let bounds = self.bounds();
        let cfg = self.config;
        let mut rng = SimpleRng::new(cfg.seed);
        let span_x = (cfg.width - cfg.body.width).max(1.0);
        let span_y = (cfg.height / 2.0 - cfg.body.height).max(1.0);

        self.bodies.clear();
        for id in 0..cfg.count {
            let x = rng.next_f32() * span_x;
            let y = rng.next_f32() * span_y;
            let mut body = PhysicsBody::with_config(id as u32, x, y, &cfg.body);
            body.set_velocity(rng.next_f32() * 2.0 - 1.0, rng.next_f32() - 0.5);
            body.set_bounds(bounds);
            self.bodies.push(body);
        }

        let platform_w = (cfg.width / 4.0).max(1.0);
        let mut platform = PhysicsBody::new(
            cfg.count as u32,
            (cfg.width - platform_w) / 2.0,
            cfg.height * 0.7,
            platform_w,
            2.0,
        );
        platform.set_static(true);
        self.bodies.push(platform);
        self.frame = 0;
    }

    pub fn bodies(&self) -> &[PhysicsBody] {
        &self.bodies
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Kick the controlled body.
    pub fn push(&mut self, dx: i8, dy: i8) {
        if let Some(body) = self.bodies.first_mut() {
            body.apply_impulse(dx as f32 * PUSH_IMPULSE, dy as f32 * PUSH_IMPULSE);
        }
    }

    /// Gravity, integration, then pairwise collision response.
    ///
    /// Returns the number of colliding pairs.
    pub fn step(&mut self) -> usize {
        let gravity = self.config.gravity;
        for body in &mut self.bodies {
            body.apply_force(0.0, gravity * body.mass());
            body.step();
        }
        self.frame += 1;
        resolve_all(&mut self.bodies)
    }

    pub fn drain_events(&mut self) -> Vec<PhysicsEvent> {
        self.bodies
            .iter_mut()
            .flat_map(|b| b.drain_events())
            .collect()
    }
}
