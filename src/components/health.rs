//! Hit points of an entity.
//!
//! [`Health`] is the vitals accessor the recall system reads (snapshots) and
//! writes (interpolated playback). After taking damage the owner is
//! invincible for a short while; the [`health_system`] counts that down.
//!
//! [`health_system`]: crate::systems::health::health_system

use bevy_ecs::prelude::Component;

/// Default invincibility window after being hit, in seconds.
pub const DEFAULT_INVINCIBILITY: f32 = 1.5;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Health {
    /// Current hit points, always in `[0, max]`.
    pub current: i32,
    /// Upper bound for `current`.
    pub max: i32,
    /// Length of the invincibility window started by a hit.
    pub invincibility: f32,
    invincible_remaining: f32,
}

impl Health {
    /// Full health with the default invincibility window.
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Health {
            current: max,
            max,
            invincibility: DEFAULT_INVINCIBILITY,
            invincible_remaining: 0.0,
        }
    }

    pub fn with_invincibility(mut self, seconds: f32) -> Self {
        self.invincibility = seconds.max(0.0);
        self
    }

    /// Write a new value, clamped to `[0, max]`.
    pub fn set_clamped(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    /// Apply a hit. Ignored while invincible; returns whether it landed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.set_clamped(self.current - amount);
        self.invincible_remaining = self.invincibility;
        true
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_remaining > 0.0
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Count the invincibility window down by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.invincible_remaining = (self.invincible_remaining - dt).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_full() {
        let hp = Health::new(10);
        assert_eq!(hp.current, 10);
        assert_eq!(hp.max, 10);
        assert!(!hp.is_invincible());
    }

    #[test]
    fn test_take_damage_starts_invincibility() {
        let mut hp = Health::new(10);
        assert!(hp.take_damage(3));
        assert_eq!(hp.current, 7);
        assert!(hp.is_invincible());
        assert!(!hp.take_damage(3));
        assert_eq!(hp.current, 7);
    }

    #[test]
    fn test_invincibility_wears_off() {
        let mut hp = Health::new(10).with_invincibility(1.0);
        hp.take_damage(1);
        hp.tick(0.6);
        assert!(hp.is_invincible());
        hp.tick(0.6);
        assert!(!hp.is_invincible());
        assert!(hp.take_damage(1));
        assert_eq!(hp.current, 8);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut hp = Health::new(3);
        hp.take_damage(10);
        assert_eq!(hp.current, 0);
        assert!(hp.is_depleted());
    }

    #[test]
    fn test_set_clamped() {
        let mut hp = Health::new(10);
        hp.set_clamped(42);
        assert_eq!(hp.current, 10);
        hp.set_clamped(-5);
        assert_eq!(hp.current, 0);
    }
}
