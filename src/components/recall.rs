//! Recall (temporal rewind) state machine.
//!
//! [`RecallCoordinator`] has two states, [`RecallState::Idle`] and
//! [`RecallState::Recalling`], and cycles between them forever.
//!
//! # Lifecycle
//!
//! 1. While idle, [`RecallCoordinator::try_start`] is called when a recall
//!    request arrives. It needs a ready [`CooldownGate`] and a non-empty
//!    [`HistoryBuffer`]; otherwise nothing changes.
//! 2. On success the current state becomes the session `start`, the snapshot
//!    nearest to `now - window` becomes the `target`, and the gate is armed.
//! 3. Each tick [`RecallCoordinator::advance`] moves the normalized progress
//!    `t` forward and returns the interpolated [`RecallFrame`] to write back.
//!    When `t` reaches 1 the session ends and the coordinator is idle again.
//!
//! The coupled time dilation effect is owned by
//! [`TimeDilation`](crate::resources::timedilation::TimeDilation) and has its
//! own timer; the recall system only asks for it to start.

use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

use super::cooldown::CooldownGate;
use super::history::HistoryBuffer;
use super::snapshot::Snapshot;

/// Coordinator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecallState {
    Idle,
    Recalling,
}

/// Why a recall request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RecallRejected {
    #[error("a recall is already in progress")]
    AlreadyRecalling,
    #[error("recall is cooling down ({remaining:.2}s left)")]
    CoolingDown { remaining: f32 },
    #[error("no recorded history to recall to")]
    EmptyHistory,
}

/// Interpolation in flight. Exists only while recalling.
#[derive(Clone, Copy, Debug)]
pub struct RecallSession {
    start: Snapshot,
    target: Snapshot,
    elapsed: f32,
}

impl RecallSession {
    pub fn start(&self) -> &Snapshot {
        &self.start
    }

    pub fn target(&self) -> &Snapshot {
        &self.target
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// State to write back to the entity after one recall tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecallFrame {
    pub position: Vec3,
    pub rotation: Quat,
    pub health: i32,
    /// Normalized progress in `[0, 1]`.
    pub t: f32,
    /// True on the tick that completes the session.
    pub finished: bool,
}

/// Orchestrates one entity's rewind: trigger guards, session bookkeeping
/// and interpolation.
#[derive(Component, Clone, Debug)]
pub struct RecallCoordinator {
    /// How far back a recall reaches, in seconds.
    pub window: f32,
    /// Length of the interpolated playback, in seconds.
    pub recall_duration: f32,
    session: Option<RecallSession>,
}

impl RecallCoordinator {
    pub fn new(window: f32, recall_duration: f32) -> Self {
        RecallCoordinator {
            window,
            recall_duration,
            session: None,
        }
    }

    pub fn state(&self) -> RecallState {
        if self.session.is_some() {
            RecallState::Recalling
        } else {
            RecallState::Idle
        }
    }

    pub fn is_recalling(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&RecallSession> {
        self.session.as_ref()
    }

    /// Current interpolation fraction, if a recall is playing.
    pub fn progress(&self) -> Option<f32> {
        self.session.as_ref().map(|s| self.fraction(s.elapsed))
    }

    /// Handle a recall request.
    ///
    /// `current` is the entity's state right now; its timestamp is taken as
    /// `now`. On success the gate is armed and the chosen target snapshot is
    /// returned. On rejection nothing is modified.
    pub fn try_start(
        &mut self,
        current: Snapshot,
        history: &HistoryBuffer,
        cooldown: &mut CooldownGate,
    ) -> Result<Snapshot, RecallRejected> {
        if self.session.is_some() {
            return Err(RecallRejected::AlreadyRecalling);
        }
        if !cooldown.is_ready() {
            return Err(RecallRejected::CoolingDown {
                remaining: cooldown.remaining(),
            });
        }
        let target = history
            .nearest(current.timestamp() - self.window)
            .ok_or(RecallRejected::EmptyHistory)?;

        self.session = Some(RecallSession {
            start: current,
            target,
            elapsed: 0.0,
        });
        cooldown.trigger();
        Ok(target)
    }

    /// Advance the playing session by `dt` seconds.
    ///
    /// Returns `None` while idle. Health is rounded half-to-even and clamped
    /// to `[0, max_health]`. The finishing frame lands exactly on the target.
    pub fn advance(&mut self, dt: f32, max_health: i32) -> Option<RecallFrame> {
        let session = self.session.as_mut()?;
        session.elapsed += dt;
        let elapsed = session.elapsed;
        let (start, target) = (session.start, session.target);

        let t = self.fraction(elapsed);
        let finished = t >= 1.0;
        let (position, rotation, health) = if finished {
            (target.position(), target.rotation(), target.health())
        } else {
            (
                start.position().lerp(target.position(), t),
                start.rotation().slerp(target.rotation(), t),
                start.health() + (target.health() - start.health()) * t,
            )
        };
        let health = (health.round_ties_even() as i32).clamp(0, max_health.max(0));

        if finished {
            self.session = None;
        }

        Some(RecallFrame {
            position,
            rotation,
            health,
            t,
            finished,
        })
    }

    fn fraction(&self, elapsed: f32) -> f32 {
        if self.recall_duration <= 0.0 {
            return 1.0;
        }
        (elapsed / self.recall_duration).clamp(0.0, 1.0)
    }
}
