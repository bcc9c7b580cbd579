//! Simulation clock and the global time scale.
//!
//! [`WorldTime`] carries two clocks: the scaled simulation clock (`elapsed`,
//! `delta`) that gameplay systems use, and the real clock (`real_elapsed`,
//! `real_delta`) that is never dilated.
//!
//! The rate multiplier lives in [`TimeScale`]. Anyone may change it through
//! [`TimeScale::set`] as long as nobody holds a lease. A time dilation effect
//! takes a [`TimeScaleLease`] instead; the lease remembers the previous rate
//! and is the only handle that can put it back, so two writers can never
//! clobber each other's saved rate.

use bevy_ecs::prelude::Resource;

/// Errors from writing the global time scale.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DilationError {
    /// A dilation session is already running.
    #[error("a time dilation session is already active")]
    AlreadyActive,
    /// The time scale is held by a lease and cannot be written.
    #[error("time scale is leased (saved rate {saved})")]
    ScaleLeased { saved: f32 },
}

/// Proof of exclusive ownership of the time scale.
///
/// Created only by [`TimeScale::lease`] and consumed by
/// [`TimeScale::restore`]. Not `Clone`.
#[derive(Debug)]
pub struct TimeScaleLease {
    saved: f32,
}

impl TimeScaleLease {
    /// Rate that will be put back on restore.
    pub fn saved_rate(&self) -> f32 {
        self.saved
    }
}

/// Global simulation rate multiplier.
#[derive(Debug, PartialEq)]
pub struct TimeScale {
    rate: f32,
    leased_from: Option<f32>,
}

impl Default for TimeScale {
    fn default() -> Self {
        TimeScale {
            rate: 1.0,
            leased_from: None,
        }
    }
}

impl TimeScale {
    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn is_leased(&self) -> bool {
        self.leased_from.is_some()
    }

    /// Change the rate outside of any dilation effect.
    pub fn set(&mut self, rate: f32) -> Result<(), DilationError> {
        if let Some(saved) = self.leased_from {
            return Err(DilationError::ScaleLeased { saved });
        }
        self.rate = rate.max(0.0);
        Ok(())
    }

    /// Save the current rate and install `rate` until the lease is restored.
    pub fn lease(&mut self, rate: f32) -> Result<TimeScaleLease, DilationError> {
        if let Some(saved) = self.leased_from {
            return Err(DilationError::ScaleLeased { saved });
        }
        let saved = self.rate;
        self.leased_from = Some(saved);
        self.rate = rate.max(0.0);
        Ok(TimeScaleLease { saved })
    }

    /// Put the saved rate back and end the lease.
    pub fn restore(&mut self, lease: TimeScaleLease) {
        self.rate = lease.saved;
        self.leased_from = None;
    }
}

#[derive(Resource, Debug, Default)]
pub struct WorldTime {
    /// Scaled seconds since start.
    pub elapsed: f32,
    /// Scaled seconds of the current frame.
    pub delta: f32,
    /// Unscaled seconds since start.
    pub real_elapsed: f32,
    /// Unscaled seconds of the current frame.
    pub real_delta: f32,
    /// Frames advanced so far.
    pub frame_count: u64,
    pub scale: TimeScale,
}

impl WorldTime {
    pub fn time_scale(&self) -> f32 {
        self.scale.rate()
    }
}
