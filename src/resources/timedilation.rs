//! Time-stop effect: global slowdown plus pinned bodies.
//!
//! [`TimeDilation`] holds at most one [`DilationSession`] for the whole world.
//! Starting a session leases the global [`TimeScale`], installs the dilated
//! rate and pins every affected body. The session then runs on the real
//! (undilated) clock; when its duration has passed the saved rate is restored
//! and the bodies are released.
//!
//! A session is started by the same trigger as a recall but is not tied to
//! it. Whichever finishes first, the other keeps running on its own timer.

use bevy_ecs::prelude::{Entity, Resource};
use log::debug;
use rustc_hash::FxHashSet;

use crate::resources::worldtime::{DilationError, TimeScale, TimeScaleLease};

/// Pin/unpin access to bodies by entity.
pub trait BodyPins {
    /// Zero the body's velocity and take it out of integration.
    fn pin(&mut self, body: Entity);
    /// Return the body to integration.
    fn unpin(&mut self, body: Entity);
}

/// A running time-stop.
#[derive(Debug)]
pub struct DilationSession {
    lease: TimeScaleLease,
    elapsed: f32,
    duration: f32,
    affected: FxHashSet<Entity>,
}

impl DilationSession {
    pub fn saved_rate(&self) -> f32 {
        self.lease.saved_rate()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn affected(&self) -> &FxHashSet<Entity> {
        &self.affected
    }
}

/// Owner of the single time-stop session.
#[derive(Resource, Debug, Default)]
pub struct TimeDilation {
    session: Option<DilationSession>,
}

impl TimeDilation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DilationSession> {
        self.session.as_ref()
    }

    /// Real seconds left before the rate is restored.
    pub fn remaining(&self) -> f32 {
        self.session
            .as_ref()
            .map_or(0.0, |s| (s.duration - s.elapsed).max(0.0))
    }

    /// Start a time-stop at `rate` for `duration` real seconds.
    ///
    /// Fails without touching anything if a session is already running or
    /// the scale is leased elsewhere.
    pub fn start(
        &mut self,
        scale: &mut TimeScale,
        rate: f32,
        duration: f32,
        affected: FxHashSet<Entity>,
        bodies: &mut impl BodyPins,
    ) -> Result<(), DilationError> {
        if self.session.is_some() {
            return Err(DilationError::AlreadyActive);
        }
        let lease = scale.lease(rate)?;
        for &body in &affected {
            bodies.pin(body);
        }
        debug!(
            "Time dilation started: rate {} -> {}, {} bodies pinned for {}s",
            lease.saved_rate(),
            rate,
            affected.len(),
            duration
        );
        self.session = Some(DilationSession {
            lease,
            elapsed: 0.0,
            duration,
            affected,
        });
        Ok(())
    }

    /// Advance the session by `real_dt` unscaled seconds.
    ///
    /// Returns true on the tick that ends the session.
    pub fn tick(&mut self, real_dt: f32, scale: &mut TimeScale, bodies: &mut impl BodyPins) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.elapsed += real_dt;
        if session.elapsed < session.duration {
            return false;
        }
        let Some(session) = self.session.take() else {
            return false;
        };
        for &body in &session.affected {
            bodies.unpin(body);
        }
        scale.restore(session.lease);
        debug!(
            "Time dilation ended after {}s, rate restored to {}",
            session.elapsed,
            scale.rate()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    /// Records pin state per entity.
    #[derive(Default)]
    struct PinLog {
        pinned: FxHashMap<Entity, bool>,
        pins: usize,
        unpins: usize,
    }

    impl BodyPins for PinLog {
        fn pin(&mut self, body: Entity) {
            self.pinned.insert(body, true);
            self.pins += 1;
        }
        fn unpin(&mut self, body: Entity) {
            self.pinned.insert(body, false);
            self.unpins += 1;
        }
    }

    fn bodies(n: usize) -> FxHashSet<Entity> {
        let mut world = bevy_ecs::world::World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn test_start_dilates_and_pins() {
        let mut dilation = TimeDilation::new();
        let mut scale = TimeScale::default();
        let mut log = PinLog::default();

        dilation
            .start(&mut scale, 0.05, 0.5, bodies(3), &mut log)
            .unwrap();

        assert!(dilation.is_active());
        assert_eq!(scale.rate(), 0.05);
        assert_eq!(log.pins, 3);
        assert!(log.pinned.values().all(|&p| p));
        assert_eq!(dilation.session().unwrap().saved_rate(), 1.0);
    }

    #[test]
    fn test_tick_restores_after_real_duration() {
        let mut dilation = TimeDilation::new();
        let mut scale = TimeScale::default();
        let mut log = PinLog::default();
        dilation
            .start(&mut scale, 0.05, 0.5, bodies(2), &mut log)
            .unwrap();

        assert!(!dilation.tick(0.3, &mut scale, &mut log));
        assert_eq!(scale.rate(), 0.05);
        assert!((dilation.remaining() - 0.2).abs() < 1e-6);

        assert!(dilation.tick(0.3, &mut scale, &mut log));
        assert!(!dilation.is_active());
        assert_eq!(scale.rate(), 1.0);
        assert!(!scale.is_leased());
        assert_eq!(log.unpins, 2);
        assert!(log.pinned.values().all(|&p| !p));
    }

    #[test]
    fn test_double_start_is_rejected_and_saved_rate_survives() {
        let mut dilation = TimeDilation::new();
        let mut scale = TimeScale::default();
        let mut log = PinLog::default();
        dilation
            .start(&mut scale, 0.05, 1.0, bodies(1), &mut log)
            .unwrap();

        let second = dilation.start(&mut scale, 0.5, 1.0, bodies(4), &mut log);

        assert_eq!(second, Err(DilationError::AlreadyActive));
        assert_eq!(log.pins, 1);
        assert_eq!(scale.rate(), 0.05);
        dilation.tick(1.0, &mut scale, &mut log);
        assert_eq!(scale.rate(), 1.0);
    }

    #[test]
    fn test_start_fails_when_scale_leased_elsewhere() {
        let mut dilation = TimeDilation::new();
        let mut scale = TimeScale::default();
        let mut log = PinLog::default();
        let _other = scale.lease(0.2).unwrap();

        let result = dilation.start(&mut scale, 0.05, 1.0, bodies(2), &mut log);

        assert!(matches!(result, Err(DilationError::ScaleLeased { .. })));
        assert!(!dilation.is_active());
        assert_eq!(log.pins, 0);
    }

    #[test]
    fn test_tick_without_session_is_noop() {
        let mut dilation = TimeDilation::new();
        let mut scale = TimeScale::default();
        let mut log = PinLog::default();
        assert!(!dilation.tick(1.0, &mut scale, &mut log));
        assert_eq!(scale.rate(), 1.0);
        assert_eq!(dilation.remaining(), 0.0);
    }

    #[test]
    fn test_zero_duration_ends_on_first_tick() {
        let mut dilation = TimeDilation::new();
        let mut scale = TimeScale::default();
        let mut log = PinLog::default();
        dilation
            .start(&mut scale, 0.05, 0.0, bodies(1), &mut log)
            .unwrap();
        assert!(dilation.tick(0.0, &mut scale, &mut log));
        assert_eq!(scale.rate(), 1.0);
    }

    #[test]
    fn test_restart_after_end() {
        let mut dilation = TimeDilation::new();
        let mut scale = TimeScale::default();
        let mut log = PinLog::default();
        dilation
            .start(&mut scale, 0.05, 0.1, bodies(1), &mut log)
            .unwrap();
        dilation.tick(0.2, &mut scale, &mut log);
        assert!(
            dilation
                .start(&mut scale, 0.25, 0.1, bodies(1), &mut log)
                .is_ok()
        );
        assert_eq!(scale.rate(), 0.25);
    }
}
