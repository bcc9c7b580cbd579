//! Recall system.
//!
//! Runs the per-entity rewind pipeline once per frame, in this order:
//!
//! 1. record the current position/rotation/health into the
//!    [`HistoryBuffer`] (also while recalling)
//! 2. trim the buffer to the history window
//! 3. update the [`RecallCoordinator`]: advance a playing rewind and write the
//!    interpolated state back, or handle a pending [`RecallRequest`]
//! 4. count the [`CooldownGate`] down
//!
//! An accepted request writes a [`RecallStarted`] message for the time
//! dilation system, triggers [`RecallStartedEvent`] and asks the effect
//! thread for a burst. Rejected requests change nothing.
//!
//! Entities that carry the recall components but lack a transform or health
//! are skipped, with a single warning per entity.

use bevy_ecs::prelude::*;
use log::{debug, warn};
use rustc_hash::FxHashSet;

use crate::components::cooldown::CooldownGate;
use crate::components::health::Health;
use crate::components::history::HistoryBuffer;
use crate::components::mapposition::MapPosition;
use crate::components::recall::RecallCoordinator;
use crate::components::rotation::Rotation;
use crate::components::snapshot::Snapshot;
use crate::events::effects::EffectCmd;
use crate::events::recall::{
    RecallFinishedEvent, RecallRequest, RecallStarted, RecallStartedEvent,
};
use crate::resources::recallconfig::RecallConfig;
use crate::resources::worldtime::WorldTime;

type RecallQuery = (
    Entity,
    &'static mut HistoryBuffer,
    &'static mut CooldownGate,
    &'static mut RecallCoordinator,
    Option<&'static mut MapPosition>,
    Option<&'static mut Rotation>,
    Option<&'static mut Health>,
);

pub fn recall_system(
    time: Res<WorldTime>,
    config: Option<Res<RecallConfig>>,
    mut requests: MessageReader<RecallRequest>,
    mut started: MessageWriter<RecallStarted>,
    mut effects: Option<ResMut<Messages<EffectCmd>>>,
    mut query: Query<RecallQuery>,
    mut commands: Commands,
    mut warned: Local<FxHashSet<Entity>>,
) {
    let now = time.elapsed;
    let dt = time.delta;
    let requested: FxHashSet<Entity> = requests.read().map(|r| r.entity).collect();

    for (entity, mut history, mut cooldown, mut coordinator, position, rotation, health) in
        query.iter_mut()
    {
        let (Some(mut position), Some(mut rotation), Some(mut health)) =
            (position, rotation, health)
        else {
            if warned.insert(entity) {
                warn!(
                    "Entity {:?} has recall components but no MapPosition/Rotation/Health; skipping",
                    entity
                );
            }
            continue;
        };

        let current = Snapshot::new(position.pos, rotation.quat, health.current as f32, now);
        history.record(current);
        history.trim(now, coordinator.window);

        if coordinator.is_recalling() {
            if requested.contains(&entity) {
                debug!("Recall request for {:?} ignored: already recalling", entity);
            }
            if let Some(frame) = coordinator.advance(dt, health.max) {
                position.pos = frame.position;
                rotation.quat = frame.rotation;
                health.set_clamped(frame.health);
                if frame.finished {
                    commands.trigger(RecallFinishedEvent {
                        entity,
                        position: frame.position,
                        health: health.current,
                    });
                }
            }
        } else if requested.contains(&entity) {
            match coordinator.try_start(current, &history, &mut cooldown) {
                Ok(target) => {
                    started.write(RecallStarted {
                        entity,
                        origin: position.pos,
                    });
                    commands.trigger(RecallStartedEvent {
                        entity,
                        target_time: target.timestamp(),
                    });
                    if let (Some(effects), Some(config)) = (effects.as_mut(), config.as_ref()) {
                        effects.write(EffectCmd::RecallBurst {
                            position: position.pos,
                            color: config.effect_color,
                            duration: config.effect_duration,
                        });
                    }
                }
                Err(reason) => debug!("Recall request for {:?} ignored: {}", entity, reason),
            }
        }

        cooldown.tick(dt);
    }
}
