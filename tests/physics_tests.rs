//! Physics body integration, bounds and collision response.

use canvas_arcade::physics::{
    resolve_all, BodyConfig, Bounds, Edge, PhysicsBody, PhysicsEvent, MIN_MASS,
};
use proptest::prelude::*;

fn body(id: u32, x: f32, y: f32) -> PhysicsBody {
    let config = BodyConfig {
        width: 10.0,
        height: 10.0,
        friction: 1.0,
        restitution: 1.0,
        ..BodyConfig::default()
    };
    PhysicsBody::with_config(id, x, y, &config)
}

#[test]
fn test_force_integrates_once() {
    let mut b = body(1, 0.0, 0.0);
    b.set_mass(2.0);
    b.apply_force(4.0, 0.0);
    b.step();
    assert_eq!(b.velocity(), (2.0, 0.0));
    assert_eq!(b.x(), 2.0);
    // Acceleration is consumed by the step.
    b.step();
    assert_eq!(b.velocity(), (2.0, 0.0));
    assert_eq!(b.x(), 4.0);
}

#[test]
fn test_friction_damps_velocity() {
    let mut b = PhysicsBody::new(1, 0.0, 0.0, 5.0, 5.0);
    b.set_velocity(10.0, 0.0);
    b.step();
    assert!((b.velocity().0 - 9.8).abs() < 1e-5);
    assert!((b.x() - 9.8).abs() < 1e-5);
}

#[test]
fn test_floor_bounce_reflects_with_restitution() {
    let mut b = body(7, 0.0, 85.0);
    b.set_restitution(0.5);
    b.set_bounds(Bounds::new(0.0, 100.0, 0.0, 100.0));
    b.set_velocity(0.0, 10.0);
    b.step();

    assert_eq!(b.y(), 90.0);
    assert_eq!(b.velocity(), (0.0, -5.0));
    let events = b.drain_events();
    assert_eq!(
        events[0],
        PhysicsEvent::BoundaryHit {
            id: 7,
            edge: Edge::Bottom,
            x: 0.0,
            y: 90.0
        }
    );
    assert!(matches!(
        events[1],
        PhysicsEvent::PositionChange { old_y, y, .. } if old_y == 85.0 && y == 90.0
    ));
}

#[test]
fn test_resting_body_reports_no_motion() {
    let mut b = body(1, 5.0, 5.0);
    b.step();
    assert!(b.drain_events().is_empty());
}

#[test]
fn test_head_on_equal_masses_swap_velocity() {
    let mut bodies = vec![body(1, 0.0, 0.0), body(2, 8.0, 0.0)];
    bodies[0].set_velocity(1.0, 0.0);
    bodies[1].set_velocity(-1.0, 0.0);

    assert_eq!(resolve_all(&mut bodies), 1);
    assert_eq!(bodies[0].velocity(), (-1.0, 0.0));
    assert_eq!(bodies[1].velocity(), (1.0, 0.0));

    let a = bodies[0].drain_events();
    let b = bodies[1].drain_events();
    assert!(matches!(a[..], [PhysicsEvent::Collision { id: 1, other_id: 2, .. }]));
    assert!(matches!(b[..], [PhysicsEvent::Collision { id: 2, other_id: 1, .. }]));
}

#[test]
fn test_separating_bodies_are_left_alone() {
    let mut a = body(1, 0.0, 0.0);
    let mut b = body(2, 8.0, 0.0);
    a.set_velocity(-1.0, 0.0);
    b.set_velocity(1.0, 0.0);
    a.resolve_collision(&mut b);
    assert_eq!(a.velocity(), (-1.0, 0.0));
    assert_eq!(b.velocity(), (1.0, 0.0));
}

#[test]
fn test_static_body_does_not_move_or_push_back() {
    let mut wall = body(9, 8.0, 0.0);
    wall.set_static(true);
    let mut ball = body(1, 0.0, 0.0);
    ball.set_velocity(2.0, 0.0);

    ball.resolve_collision(&mut wall);
    assert!(ball.velocity().0 < 0.0);
    assert_eq!(wall.velocity(), (0.0, 0.0));

    wall.apply_force(100.0, 100.0);
    wall.apply_impulse(100.0, 100.0);
    wall.step();
    assert_eq!((wall.x(), wall.y()), (8.0, 0.0));
}

#[test]
fn test_collision_with_nothing() {
    let mut a = body(1, 0.0, 0.0);
    assert!(!a.collides_with(None));
    let far = body(2, 50.0, 50.0);
    assert!(!a.collides_with(Some(&far)));
    assert!(a.drain_events().is_empty());
}

#[test]
fn test_geometry_helpers() {
    let a = body(1, 0.0, 0.0);
    let b = body(2, 30.0, 40.0);
    assert_eq!(a.center(), (5.0, 5.0));
    assert_eq!(a.distance_to(&b), 50.0);
    let right = body(3, 10.0, 0.0);
    assert_eq!(a.angle_to(&right), 0.0);
}

#[test]
fn test_event_json_shape() {
    let event = PhysicsEvent::BoundaryHit {
        id: 3,
        edge: Edge::Left,
        x: 0.0,
        y: 1.5,
    };
    let json = serde_json::to_value(event).unwrap();
    assert_eq!(json["type"], "boundary-hit");
    assert_eq!(json["edge"], "left");
    assert_eq!(json["y"], 1.5);
}

proptest! {
    #[test]
    fn prop_bounded_body_stays_inside(
        x in 0.0f32..90.0,
        y in 0.0f32..90.0,
        vx in -50.0f32..50.0,
        vy in -50.0f32..50.0,
        steps in 1usize..60,
    ) {
        let mut b = body(1, x, y);
        b.set_bounds(Bounds::new(0.0, 100.0, 0.0, 100.0));
        b.set_velocity(vx, vy);
        for _ in 0..steps {
            b.apply_force(0.0, 0.5);
            b.step();
            prop_assert!(b.x() >= 0.0 && b.x() + b.width() <= 100.0 + 1e-3);
            prop_assert!(b.y() >= 0.0 && b.y() + b.height() <= 100.0 + 1e-3);
        }
    }

    #[test]
    fn prop_static_body_is_immovable(
        fx in -1e3f32..1e3,
        fy in -1e3f32..1e3,
        vx in -10.0f32..10.0,
    ) {
        let mut wall = body(2, 5.0, 0.0);
        wall.set_static(true);
        let mut other = body(1, 0.0, 0.0);
        other.set_velocity(vx, 0.0);

        wall.apply_force(fx, fy);
        wall.apply_impulse(fx, fy);
        wall.step();
        other.resolve_collision(&mut wall);
        wall.resolve_collision(&mut other);

        prop_assert_eq!((wall.x(), wall.y()), (5.0, 0.0));
        prop_assert_eq!(wall.velocity(), (0.0, 0.0));
    }

    #[test]
    fn prop_material_is_clamped(mass in -10.0f32..10.0, f in -2.0f32..2.0, r in -2.0f32..2.0) {
        let mut b = body(1, 0.0, 0.0);
        b.set_mass(mass);
        b.set_friction(f);
        b.set_restitution(r);
        prop_assert!(b.mass() >= MIN_MASS);
        prop_assert!((0.0..=1.0).contains(&b.friction()));
        prop_assert!((0.0..=1.0).contains(&b.restitution()));
    }
}
