//! Message queue maintenance.
//!
//! Bevy ECS' [`Messages`] API requires calling `update()` once per frame so
//! stale messages are dropped. Run this first in the frame.

use bevy_ecs::prelude::*;

use crate::events::recall::{RecallRequest, RecallStarted};

/// Advance the recall message queues.
pub fn update_recall_messages(
    mut requests: ResMut<Messages<RecallRequest>>,
    mut started: ResMut<Messages<RecallStarted>>,
) {
    requests.update();
    started.update();
}
