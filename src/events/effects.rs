//! Fire-and-forget visual effect requests.
//!
//! Gameplay systems write [`EffectCmd`] messages; the effect bridge forwards
//! them to the effect thread. Nothing waits for a reply, and a missing
//! bridge simply drops the request.

use bevy_ecs::message::Message;
use glam::Vec3;

/// Commands sent *to* the effect thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum EffectCmd {
    /// Burst played where a recall was triggered. Replaces any burst still
    /// playing.
    RecallBurst {
        position: Vec3,
        color: [f32; 4],
        duration: f32,
    },
    /// Stop every effect and exit the thread.
    Shutdown,
}
