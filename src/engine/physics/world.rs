use glam::Vec3;

use super::body::PointMass;
use super::collision::{Bounds, CollisionEvent};
use crate::core::math::approach_zero;

/// Tunable constants for the single-body simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Horizontal speed lost per second while moving
    pub friction: f32,
    /// Below this horizontal speed friction no longer applies
    pub friction_floor: f32,
    /// Fraction of velocity kept (and inverted) on a wall hit
    pub restitution: f32,
    /// Speed under which a viewport resize brings the body to rest
    pub settle_threshold: f32,
    /// Velocity added per frame for each held direction
    pub impulse: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            friction: 1.0,
            friction_floor: 0.001,
            restitution: 0.95,
            settle_threshold: 0.05,
            impulse: 2.0,
        }
    }
}

/// Physics world holding the circle and the rules that move it
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    body: PointMass,
    radius: f32,
}

impl PhysicsWorld {
    /// Create a world with the body at rest at the origin
    pub fn new(config: PhysicsConfig, radius: f32) -> Self {
        Self {
            config,
            body: PointMass::default(),
            radius,
        }
    }

    /// Replace the simulated body
    pub fn with_body(mut self, body: PointMass) -> Self {
        self.body = body;
        self
    }

    /// Advance velocity and position by one explicit Euler step
    ///
    /// Gravity is applied to the velocity before the position update, and
    /// horizontal friction after it.
    pub fn integrate(&mut self, dt: f32) {
        self.body.velocity.y -= self.config.gravity * dt;
        self.body.position += self.body.velocity * dt;
        self.apply_friction(dt);
    }

    /// Slow the horizontal velocity toward zero, never past it
    pub fn apply_friction(&mut self, dt: f32) {
        let vx = self.body.velocity.x;
        if vx.abs() > self.config.friction_floor {
            self.body.velocity.x = approach_zero(vx, self.config.friction * dt);
        }
    }

    /// Add a velocity change in the given direction, scaled by the configured impulse
    pub fn push(&mut self, direction: Vec3) {
        self.body.apply_impulse(direction * self.config.impulse);
    }

    /// Bring a nearly-still body to rest after the viewport changed shape
    ///
    /// Returns true if the velocity was zeroed.
    pub fn settle(&mut self) -> bool {
        if self.body.speed() < self.config.settle_threshold {
            self.body.stop();
            true
        } else {
            false
        }
    }

    /// Zero the velocity unconditionally
    pub fn halt(&mut self) {
        self.body.stop();
    }

    /// Clamp the body back inside `bounds`, reflecting the offending velocity
    pub fn resolve_collisions(&mut self, bounds: &Bounds) -> CollisionEvent {
        bounds.resolve(&mut self.body, self.radius, self.config.restitution)
    }

    pub fn body(&self) -> &PointMass {
        &self.body
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn world_with(velocity: Vec3) -> PhysicsWorld {
        PhysicsWorld::new(PhysicsConfig::default(), 1.0)
            .with_body(PointMass::default().with_velocity(velocity))
    }

    #[test]
    fn test_default_config() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, 9.8);
        assert_eq!(config.friction, 1.0);
        assert_eq!(config.restitution, 0.95);
        assert_eq!(config.settle_threshold, 0.05);
        assert_eq!(config.impulse, 2.0);
    }

    #[test]
    fn test_gravity_applied_before_position() {
        let mut world = world_with(Vec3::ZERO);
        world.integrate(0.1);

        assert_relative_eq!(world.body().velocity.y, -0.98, epsilon = 1e-6);
        // Position uses the already-updated velocity
        assert_relative_eq!(world.body().position.y, -0.098, epsilon = 1e-6);
    }

    #[test]
    fn test_position_uses_pre_friction_velocity() {
        let mut world = world_with(Vec3::new(2.0, 0.0, 0.0));
        world.integrate(0.1);

        assert_relative_eq!(world.body().position.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(world.body().velocity.x, 1.9, epsilon = 1e-6);
    }

    #[test]
    fn test_friction_reduces_magnitude_both_directions() {
        let mut world = world_with(Vec3::new(-3.0, 0.0, 0.0));
        world.apply_friction(0.5);
        assert_relative_eq!(world.body().velocity.x, -2.5, epsilon = 1e-6);

        let mut world = world_with(Vec3::new(3.0, 0.0, 0.0));
        world.apply_friction(0.5);
        assert_relative_eq!(world.body().velocity.x, 2.5, epsilon = 1e-6);
    }

    #[test]
    fn test_friction_never_reverses_sign() {
        let mut world = world_with(Vec3::new(0.03, 0.0, 0.0));
        world.apply_friction(0.1);
        assert_eq!(world.body().velocity.x, 0.0);

        let mut world = world_with(Vec3::new(-0.03, 0.0, 0.0));
        world.apply_friction(0.1);
        assert_eq!(world.body().velocity.x, 0.0);
    }

    #[test]
    fn test_friction_floor_is_idempotent() {
        let mut world = world_with(Vec3::new(0.0005, 0.0, 0.0));
        for _ in 0..10 {
            world.apply_friction(0.1);
            assert_eq!(world.body().velocity.x, 0.0005);
        }
    }

    #[test]
    fn test_friction_ignores_vertical_velocity() {
        let mut world = world_with(Vec3::new(0.0, 5.0, 0.0));
        world.apply_friction(0.1);
        assert_eq!(world.body().velocity.y, 5.0);
    }

    #[test]
    fn test_push_scales_by_impulse() {
        let mut world = world_with(Vec3::ZERO);
        world.push(Vec3::X);
        world.push(-Vec3::Y);

        assert_eq!(world.body().velocity, Vec3::new(2.0, -2.0, 0.0));
    }

    #[test]
    fn test_settle_slow_body() {
        let mut world = world_with(Vec3::new(0.03, 0.03, 0.0));
        assert!(world.settle());
        assert_eq!(world.body().velocity, Vec3::ZERO);
    }

    #[test]
    fn test_settle_leaves_fast_body() {
        let mut world = world_with(Vec3::new(0.04, 0.04, 0.0));
        assert!(!world.settle());
        assert_eq!(world.body().velocity, Vec3::new(0.04, 0.04, 0.0));
    }

    #[test]
    fn test_halt() {
        let mut world = world_with(Vec3::new(10.0, -3.0, 0.0));
        world.halt();
        assert_eq!(world.body().velocity, Vec3::ZERO);
    }

    #[test]
    fn test_falling_body_stays_in_bounds() {
        let bounds = Bounds::new(8.0, 5.0);
        let mut world = world_with(Vec3::new(6.0, 0.0, 0.0));

        for _ in 0..1_000 {
            world.integrate(0.1);
            world.resolve_collisions(&bounds);
            assert!(bounds.contains_circle(world.body().position.truncate(), world.radius()));
        }
    }
}
