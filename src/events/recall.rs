//! Recall requests and notifications.
//!
//! - [`RecallRequest`] is the edge-triggered "ability requested" signal. It is
//!   a message so each press is read exactly once by the recall system.
//! - [`RecallStarted`] carries a successful trigger over to the time dilation
//!   system, which owns the time-stop.
//! - [`RecallStartedEvent`] and [`RecallFinishedEvent`] are observer events for
//!   UI, logging and other listeners.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::info;

/// Ask `entity` to recall. One message per button press.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecallRequest {
    pub entity: Entity,
}

/// A recall was accepted; start the time-stop around `origin`.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct RecallStarted {
    pub entity: Entity,
    pub origin: Vec3,
}

/// Triggered when an entity begins rewinding.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RecallStartedEvent {
    /// The rewinding entity.
    pub entity: Entity,
    /// Timestamp of the snapshot it is rewinding to.
    pub target_time: f32,
}

/// Triggered on the tick a rewind completes.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RecallFinishedEvent {
    pub entity: Entity,
    pub position: Vec3,
    pub health: i32,
}

/// Observer that logs recall starts.
pub fn log_recall_started(trigger: On<RecallStartedEvent>) {
    info!(
        "Entity {:?} recalling to t={:.3}",
        trigger.entity, trigger.target_time
    );
}

/// Observer that logs recall completions.
pub fn log_recall_finished(trigger: On<RecallFinishedEvent>) {
    info!(
        "Entity {:?} recall finished at ({:.2}, {:.2}, {:.2}) hp={}",
        trigger.entity,
        trigger.position.x,
        trigger.position.y,
        trigger.position.z,
        trigger.health
    );
}
