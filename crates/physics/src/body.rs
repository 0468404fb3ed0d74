//! Physics body - integration, AABB collision and elastic response
//!
//! Bodies are axis-aligned rectangles. `update` runs one semi-implicit Euler
//! step:
//!
//! 1. velocity += acceleration * dt
//! 2. velocity *= friction (per component)
//! 3. position += velocity * dt
//! 4. acceleration = 0
//! 5. boundary check (clamp + reflect)
//! 6. `position-change` if the position moved
//!
//! Static bodies never move: force, impulse and update leave them untouched.

use serde::{Deserialize, Serialize};

/// Smallest mass a body can have.
pub const MIN_MASS: f32 = 1e-3;

/// Rectangle a body is kept inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }
}

/// Which bound was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Physics notifications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum PhysicsEvent {
    Collision {
        id: u32,
        other_id: u32,
        x: f32,
        y: f32,
    },
    BoundaryHit {
        id: u32,
        edge: Edge,
        x: f32,
        y: f32,
    },
    PositionChange {
        id: u32,
        old_x: f32,
        old_y: f32,
        x: f32,
        y: f32,
        velocity_x: f32,
        velocity_y: f32,
    },
}

/// Material parameters, settable at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub width: f32,
    pub height: f32,
    pub mass: f32,
    /// Velocity multiplier per update; 1 = no damping.
    pub friction: f32,
    /// Bounce energy retention; 0 = inelastic, 1 = perfectly elastic.
    pub restitution: f32,
    pub is_static: bool,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            mass: 1.0,
            friction: 0.98,
            restitution: 0.8,
            is_static: false,
        }
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn clamp_mass(m: f32) -> f32 {
    if m.is_nan() {
        MIN_MASS
    } else {
        m.max(MIN_MASS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    id: u32,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    velocity_x: f32,
    velocity_y: f32,
    acceleration_x: f32,
    acceleration_y: f32,
    mass: f32,
    friction: f32,
    restitution: f32,
    is_static: bool,
    bounds: Option<Bounds>,
    events: Vec<PhysicsEvent>,
}

impl PhysicsBody {
    /// New dynamic body with default material.
    pub fn new(id: u32, x: f32, y: f32, width: f32, height: f32) -> Self {
        let config = BodyConfig {
            width,
            height,
            ..BodyConfig::default()
        };
        Self::with_config(id, x, y, &config)
    }

    pub fn with_config(id: u32, x: f32, y: f32, config: &BodyConfig) -> Self {
        Self {
            id,
            x,
            y,
            width: config.width.max(0.0),
            height: config.height.max(0.0),
            velocity_x: 0.0,
            velocity_y: 0.0,
            acceleration_x: 0.0,
            acceleration_y: 0.0,
            mass: clamp_mass(config.mass),
            friction: clamp_unit(config.friction),
            restitution: clamp_unit(config.restitution),
            is_static: config.is_static,
            bounds: None,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.velocity_x, self.velocity_y)
    }

    pub fn acceleration(&self) -> (f32, f32) {
        (self.acceleration_x, self.acceleration_y)
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.velocity_x = vx;
        self.velocity_y = vy;
    }

    /// Clamped to at least [`MIN_MASS`].
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = clamp_mass(mass);
    }

    /// Clamped to [0, 1].
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = clamp_unit(friction);
    }

    /// Clamped to [0, 1].
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = clamp_unit(restitution);
    }

    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    pub fn clear_bounds(&mut self) {
        self.bounds = None;
    }

    /// Zero velocity and pending acceleration.
    pub fn stop(&mut self) {
        self.velocity_x = 0.0;
        self.velocity_y = 0.0;
        self.acceleration_x = 0.0;
        self.acceleration_y = 0.0;
    }

    /// Accumulate `force / mass` into acceleration until the next update.
    pub fn apply_force(&mut self, fx: f32, fy: f32) {
        if self.is_static {
            return;
        }
        self.acceleration_x += fx / self.mass;
        self.acceleration_y += fy / self.mass;
    }

    /// Change velocity by `impulse / mass` immediately.
    pub fn apply_impulse(&mut self, ix: f32, iy: f32) {
        if self.is_static {
            return;
        }
        self.velocity_x += ix / self.mass;
        self.velocity_y += iy / self.mass;
    }

    /// One integration step of `dt` time units.
    pub fn update(&mut self, dt: f32) {
        if self.is_static {
            return;
        }
        let (old_x, old_y) = (self.x, self.y);

        self.velocity_x += self.acceleration_x * dt;
        self.velocity_y += self.acceleration_y * dt;

        self.velocity_x *= self.friction;
        self.velocity_y *= self.friction;

        self.x += self.velocity_x * dt;
        self.y += self.velocity_y * dt;

        self.acceleration_x = 0.0;
        self.acceleration_y = 0.0;

        self.check_bounds();

        if self.x != old_x || self.y != old_y {
            self.events.push(PhysicsEvent::PositionChange {
                id: self.id,
                old_x,
                old_y,
                x: self.x,
                y: self.y,
                velocity_x: self.velocity_x,
                velocity_y: self.velocity_y,
            });
        }
    }

    /// `update(1.0)`, one frame.
    pub fn step(&mut self) {
        self.update(1.0);
    }

    fn check_bounds(&mut self) {
        let Some(b) = self.bounds else {
            return;
        };

        if self.x < b.min_x {
            self.x = b.min_x;
            self.velocity_x = -self.velocity_x * self.restitution;
            self.hit(Edge::Left);
        } else if self.x + self.width > b.max_x {
            self.x = b.max_x - self.width;
            self.velocity_x = -self.velocity_x * self.restitution;
            self.hit(Edge::Right);
        }

        if self.y < b.min_y {
            self.y = b.min_y;
            self.velocity_y = -self.velocity_y * self.restitution;
            self.hit(Edge::Top);
        } else if self.y + self.height > b.max_y {
            self.y = b.max_y - self.height;
            self.velocity_y = -self.velocity_y * self.restitution;
            self.hit(Edge::Bottom);
        }
    }

    fn hit(&mut self, edge: Edge) {
        log::trace!("body {} hit {:?} edge at ({}, {})", self.id, edge, self.x, self.y);
        self.events.push(PhysicsEvent::BoundaryHit {
            id: self.id,
            edge,
            x: self.x,
            y: self.y,
        });
    }

    /// AABB overlap. Reports `collision` on a hit; does not resolve it.
    pub fn collides_with(&mut self, other: Option<&PhysicsBody>) -> bool {
        let Some(other) = other else {
            return false;
        };
        let hit = self.overlaps(other);
        if hit {
            self.events.push(PhysicsEvent::Collision {
                id: self.id,
                other_id: other.id,
                x: self.x,
                y: self.y,
            });
        }
        hit
    }

    /// Side-effect-free AABB overlap test (touching edges do not overlap).
    pub fn overlaps(&self, other: &PhysicsBody) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Elastic collision response along the line between centers.
    ///
    /// Skipped when both bodies are static, when the centers coincide, or
    /// when the bodies are already separating. The mass total only counts
    /// non-static bodies while each body's velocity change scales with the
    /// other body's mass, so a static partner acts as a one-sided heavy body.
    pub fn resolve_collision(&mut self, other: &mut PhysicsBody) {
        if self.is_static && other.is_static {
            return;
        }

        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        let (dx, dy) = (bx - ax, by - ay);
        let distance = (dx * dx + dy * dy).sqrt();
        if distance == 0.0 {
            return;
        }
        let (nx, ny) = (dx / distance, dy / distance);

        let rvx = other.velocity_x - self.velocity_x;
        let rvy = other.velocity_y - self.velocity_y;
        let vel_along_normal = rvx * nx + rvy * ny;
        if vel_along_normal > 0.0 {
            return;
        }

        let restitution = self.restitution.min(other.restitution);
        let mut total_mass = 0.0;
        if !self.is_static {
            total_mass += self.mass;
        }
        if !other.is_static {
            total_mass += other.mass;
        }
        let impulse = -(1.0 + restitution) * vel_along_normal / total_mass;

        if !self.is_static {
            self.velocity_x -= impulse * other.mass * nx;
            self.velocity_y -= impulse * other.mass * ny;
        }
        if !other.is_static {
            other.velocity_x += impulse * self.mass * nx;
            other.velocity_y += impulse * self.mass * ny;
        }
    }

    /// Distance between centers.
    pub fn distance_to(&self, other: &PhysicsBody) -> f32 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt()
    }

    /// Bearing from this center to the other's, radians in (-π, π].
    pub fn angle_to(&self, other: &PhysicsBody) -> f32 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (by - ay).atan2(bx - ax)
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<PhysicsEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Borrow two distinct bodies of a slice mutably.
///
/// Returns `None` when `i == j` or either index is out of range.
pub fn pair_mut(
    bodies: &mut [PhysicsBody],
    i: usize,
    j: usize,
) -> Option<(&mut PhysicsBody, &mut PhysicsBody)> {
    if i == j || i >= bodies.len() || j >= bodies.len() {
        return None;
    }
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}

/// Test every pair once; overlapping pairs report `collision` on both bodies
/// and are resolved. Returns the number of colliding pairs.
pub fn resolve_all(bodies: &mut [PhysicsBody]) -> usize {
    let mut hits = 0;
    for i in 0..bodies.len() {
        for j in i + 1..bodies.len() {
            let Some((a, b)) = pair_mut(bodies, i, j) else {
                continue;
            };
            if a.collides_with(Some(&*b)) {
                b.collides_with(Some(&*a));
                a.resolve_collision(b);
                hits += 1;
            }
        }
    }
    hits
}
