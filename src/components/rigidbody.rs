//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity the movement system
//! integrates every frame, plus optional drag and a speed limit.
//!
//! The `frozen` flag takes the body out of integration entirely. The
//! time-stop effect uses [`RigidBody::pin`] / [`RigidBody::unpin`] to hold
//! nearby enemies and projectiles in place while the world is dilated.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Kinematic body storing velocity.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `friction` - Velocity damping factor (0.0 = no friction, higher = more drag)
/// - `max_speed` - Optional maximum speed clamp
/// - `frozen` - When true, movement system skips all calculations for this entity
#[derive(Component, Clone, Debug, PartialEq)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec3,
    /// Velocity damping factor. Applied as: velocity *= (1 - friction * delta).
    pub friction: f32,
    /// Optional maximum speed. If set, velocity magnitude is clamped to this value.
    pub max_speed: Option<f32>,
    /// When true, movement system skips all physics calculations for this entity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity.
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            friction: 0.0,
            max_speed: None,
            frozen: false,
        }
    }

    /// Create a RigidBody moving at `velocity`.
    pub fn with_velocity(velocity: Vec3) -> Self {
        Self {
            velocity,
            ..Self::new()
        }
    }

    /// Create a RigidBody with physics parameters configured.
    ///
    /// # Arguments
    /// * `friction` - Velocity damping (0.0 = none, ~5.0 = responsive, ~10.0 = heavy)
    /// * `max_speed` - Optional velocity magnitude limit
    pub fn with_physics(friction: f32, max_speed: Option<f32>) -> Self {
        Self {
            friction,
            max_speed,
            ..Self::new()
        }
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Stop the body and remove it from integration.
    pub fn pin(&mut self) {
        self.velocity = Vec3::ZERO;
        self.frozen = true;
    }

    /// Hand the body back to the movement system. Velocity stays zero.
    pub fn unpin(&mut self) {
        self.frozen = false;
    }

    /// Apply friction and the speed limit for a step of `dt` seconds.
    pub fn damp(&mut self, dt: f32) {
        if self.friction > 0.0 {
            let factor = (1.0 - self.friction * dt).max(0.0);
            self.velocity *= factor;
        }
        if let Some(max) = self.max_speed {
            self.velocity = self.velocity.clamp_length_max(max.max(0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_rigidbody_new() {
        let rb = RigidBody::new();
        assert_eq!(rb.velocity, Vec3::ZERO);
        assert!(approx_eq(rb.friction, 0.0));
        assert!(rb.max_speed.is_none());
        assert!(!rb.frozen);
    }

    #[test]
    fn test_rigidbody_with_physics() {
        let rb = RigidBody::with_physics(5.0, Some(300.0));
        assert!(approx_eq(rb.friction, 5.0));
        assert_eq!(rb.max_speed, Some(300.0));
        assert!(!rb.frozen);
    }

    #[test]
    fn test_pin_zeroes_velocity_and_freezes() {
        let mut rb = RigidBody::with_velocity(Vec3::new(3.0, -2.0, 1.0));
        rb.pin();
        assert_eq!(rb.velocity, Vec3::ZERO);
        assert!(rb.frozen);
    }

    #[test]
    fn test_unpin_releases_without_restoring_velocity() {
        let mut rb = RigidBody::with_velocity(Vec3::X);
        rb.pin();
        rb.unpin();
        assert!(!rb.frozen);
        assert_eq!(rb.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_freeze_keeps_velocity() {
        let mut rb = RigidBody::with_velocity(Vec3::X);
        rb.freeze();
        assert!(rb.frozen);
        assert_eq!(rb.velocity, Vec3::X);
    }

    #[test]
    fn test_damp_applies_friction() {
        let mut rb = RigidBody::with_physics(2.0, None);
        rb.velocity = Vec3::new(10.0, 0.0, 0.0);
        rb.damp(0.25);
        assert!(approx_eq(rb.velocity.x, 5.0));
    }

    #[test]
    fn test_damp_clamps_speed() {
        let mut rb = RigidBody::with_physics(0.0, Some(5.0));
        rb.velocity = Vec3::new(3.0, 4.0, 12.0);
        rb.damp(0.016);
        assert!((rb.velocity.length() - 5.0).abs() < 1e-4);
    }
}
