//! Point-in-time record of an entity's physical and vital state.
//!
//! A [`Snapshot`] is written once per tick into the owner's
//! [`HistoryBuffer`](super::history::HistoryBuffer) and never modified
//! afterwards. The recall coordinator also captures one as the start of a
//! rewind.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Immutable position/rotation/health sample taken at `timestamp`.
///
/// `timestamp` is read from the scaled world clock
/// ([`WorldTime::elapsed`](crate::resources::worldtime::WorldTime)).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    position: Vec3,
    rotation: Quat,
    health: f32,
    timestamp: f32,
}

impl Snapshot {
    pub fn new(position: Vec3, rotation: Quat, health: f32, timestamp: f32) -> Self {
        Snapshot {
            position,
            rotation,
            health,
            timestamp,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn timestamp(&self) -> f32 {
        self.timestamp
    }
}
