//! Re-trigger lockout for the recall ability.
//!
//! A [`CooldownGate`] counts down from its duration to zero. The ability may
//! only fire while the gate is ready (`remaining == 0`). The gate does not
//! re-validate on [`CooldownGate::trigger`]; callers check
//! [`CooldownGate::is_ready`] first.

use bevy_ecs::prelude::Component;

/// Single countdown timer gating the recall trigger.
///
/// Invariant: `0 <= remaining <= duration`.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct CooldownGate {
    remaining: f32,
    duration: f32,
}

impl CooldownGate {
    /// Create a ready gate. Negative durations are treated as zero.
    pub fn new(duration: f32) -> Self {
        CooldownGate {
            remaining: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Count down by `dt` seconds, clamped to `[0, duration]`.
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).clamp(0.0, self.duration);
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Normalized progress for UI: 0 just after a trigger, 1 when ready.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
    }

    /// Restart the countdown from the full duration.
    pub fn trigger(&mut self) {
        self.remaining = self.duration;
    }

    /// Seconds until the gate is ready again.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn duration(&self) -> f32 {
        self.duration
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
    fn test_new_gate_is_ready() {
        let gate = CooldownGate::new(10.0);
        assert!(gate.is_ready());
        assert!(approx_eq(gate.remaining(), 0.0));
        assert!(approx_eq(gate.progress(), 1.0));
    }

    #[test]
    fn test_trigger_resets_to_duration() {
        let mut gate = CooldownGate::new(10.0);
        gate.trigger();
        assert!(!gate.is_ready());
        assert!(approx_eq(gate.remaining(), 10.0));
        assert!(approx_eq(gate.progress(), 0.0));
    }

    #[test]
    fn test_tick_counts_down_and_reports_progress() {
        let mut gate = CooldownGate::new(10.0);
        gate.trigger();
        gate.tick(2.5);
        assert!(approx_eq(gate.remaining(), 7.5));
        assert!(approx_eq(gate.progress(), 0.25));
    }

    #[test]
    fn test_tick_clamps_at_zero() {
        let mut gate = CooldownGate::new(1.0);
        gate.trigger();
        gate.tick(5.0);
        assert!(gate.is_ready());
        assert!(approx_eq(gate.remaining(), 0.0));
    }

    #[test]
    fn test_negative_tick_never_exceeds_duration() {
        let mut gate = CooldownGate::new(1.0);
        gate.trigger();
        gate.tick(-3.0);
        assert!(approx_eq(gate.remaining(), 1.0));
    }

    #[test]
    fn test_zero_duration_gate_is_always_ready() {
        let mut gate = CooldownGate::new(0.0);
        gate.trigger();
        assert!(gate.is_ready());
        assert!(approx_eq(gate.progress(), 1.0));
        let negative = CooldownGate::new(-4.0);
        assert!(approx_eq(negative.duration(), 0.0));
    }
}
