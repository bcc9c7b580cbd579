//! Scene setup and frame schedule.
//!
//! [`setup_world`] inserts every resource the systems expect and registers
//! the observers. [`spawn_player`] and [`spawn_hostiles`] populate a small
//! arena. [`build_update_schedule`] wires the systems in their fixed frame
//! order:
//!
//! messages → movement → recall → time dilation → health → effects
//!
//! Run it once per frame right after
//! [`update_world_time`](crate::systems::time::update_world_time).

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use fastrand::Rng;
use glam::Vec3;

use crate::components::cooldown::CooldownGate;
use crate::components::group::Group;
use crate::components::health::Health;
use crate::components::history::HistoryBuffer;
use crate::components::mapposition::MapPosition;
use crate::components::recall::RecallCoordinator;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::events::damage::damage_observer;
use crate::events::effects::EffectCmd;
use crate::events::recall::{
    RecallRequest, RecallStarted, log_recall_finished, log_recall_started,
};
use crate::resources::recallconfig::RecallConfig;
use crate::resources::timedilation::TimeDilation;
use crate::resources::worldtime::WorldTime;
use crate::systems::effects::{forward_effect_cmds, update_effect_cmds};
use crate::systems::health::health_system;
use crate::systems::messages::update_recall_messages;
use crate::systems::movement::movement;
use crate::systems::recall::recall_system;
use crate::systems::timedilation::time_dilation_system;

/// Nominal simulation step used to size history buffers.
pub const NOMINAL_TICK: f32 = 1.0 / 60.0;

/// Hostile group names and the share of spawns that get each.
const HOSTILE_GROUPS: &[&str] = &["enemy", "enemy", "projectile"];

/// Insert resources and observers the schedule depends on.
pub fn setup_world(world: &mut World, config: RecallConfig) {
    world.insert_resource(WorldTime::default());
    world.insert_resource(TimeDilation::new());
    world.insert_resource(config);
    world.init_resource::<Messages<RecallRequest>>();
    world.init_resource::<Messages<RecallStarted>>();
    if !world.contains_resource::<Messages<EffectCmd>>() {
        world.init_resource::<Messages<EffectCmd>>();
    }

    world.spawn(Observer::new(damage_observer));
    world.spawn(Observer::new(log_recall_started));
    world.spawn(Observer::new(log_recall_finished));
    // Observers must be registered before any system can trigger events.
    world.flush();
}

/// History, cooldown and coordinator for one recall-capable entity.
pub fn recall_components(
    config: &RecallConfig,
) -> (HistoryBuffer, CooldownGate, RecallCoordinator) {
    (
        HistoryBuffer::with_capacity_for(config.record_duration, NOMINAL_TICK),
        CooldownGate::new(config.cooldown),
        RecallCoordinator::new(config.record_duration, config.recall_duration),
    )
}

/// Spawn the player at `position` with full health and the recall ability.
pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    let config = world.resource::<RecallConfig>().clone();
    world
        .spawn((
            Group::new("player"),
            MapPosition::from_vec(position),
            Rotation::default(),
            RigidBody::with_physics(0.0, Some(20.0)),
            Health::new(config.max_health).with_invincibility(config.invincibility),
            recall_components(&config),
        ))
        .id()
}

/// Spawn `count` enemies and projectiles scattered around `center`.
pub fn spawn_hostiles(world: &mut World, rng: &mut Rng, center: Vec3, count: usize) -> Vec<Entity> {
    (0..count)
        .map(|_| {
            let group = HOSTILE_GROUPS[rng.usize(..HOSTILE_GROUPS.len())];
            let offset = Vec3::new(rng.f32() * 2.0 - 1.0, rng.f32() * 2.0 - 1.0, 0.0) * 120.0;
            let speed = if group == "projectile" { 40.0 } else { 6.0 };
            let heading = Vec3::new(rng.f32() * 2.0 - 1.0, rng.f32() * 2.0 - 1.0, 0.0)
                .normalize_or_zero();
            world
                .spawn((
                    Group::new(group),
                    MapPosition::from_vec(center + offset),
                    RigidBody::with_velocity(heading * speed),
                ))
                .id()
        })
        .collect()
}

/// Build the per-frame schedule in its fixed order.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_recall_messages,
            update_effect_cmds,
            movement,
            recall_system,
            time_dilation_system,
            health_system,
            forward_effect_cmds,
        )
            .chain(),
    );
    update
}
