//! Time dilation system.
//!
//! Each frame, after the recall system:
//!
//! 1. ticks the running [`TimeDilation`] session with the **real** frame
//!    delta, restoring the time scale and releasing bodies when it expires
//! 2. starts a new session for each [`RecallStarted`] message, pinning the
//!    bodies in range whose [`Group`] is listed in the config
//!
//! Ticking first lets a session that expires this frame make room for a new
//! one. A start while another session is still active is rejected and
//! logged; the saved rate of the running session is never overwritten.

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{info, warn};
use rustc_hash::FxHashSet;

use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::events::recall::RecallStarted;
use crate::resources::recallconfig::RecallConfig;
use crate::resources::timedilation::{BodyPins, TimeDilation};
use crate::resources::worldtime::WorldTime;

impl BodyPins for Query<'_, '_, &mut RigidBody> {
    fn pin(&mut self, body: Entity) {
        if let Ok(mut rb) = self.get_mut(body) {
            rb.pin();
        }
    }

    fn unpin(&mut self, body: Entity) {
        // Despawned bodies are simply gone.
        if let Ok(mut rb) = self.get_mut(body) {
            rb.unpin();
        }
    }
}

/// Select bodies within `radius` of `origin` whose group is in `groups`.
pub fn bodies_in_radius<'a>(
    candidates: impl IntoIterator<Item = (Entity, Vec3, &'a Group)>,
    origin: Vec3,
    radius: f32,
    groups: &[String],
) -> FxHashSet<Entity> {
    let radius_sq = radius * radius;
    candidates
        .into_iter()
        .filter(|(_, pos, group)| {
            group.is_any_of(groups) && pos.distance_squared(origin) <= radius_sq
        })
        .map(|(entity, _, _)| entity)
        .collect()
}

pub fn time_dilation_system(
    mut time: ResMut<WorldTime>,
    mut dilation: ResMut<TimeDilation>,
    config: Res<RecallConfig>,
    mut started: MessageReader<RecallStarted>,
    candidates: Query<(Entity, &MapPosition, &Group)>,
    mut bodies: Query<&mut RigidBody>,
) {
    let real_dt = time.real_delta;
    if dilation.tick(real_dt, &mut time.scale, &mut bodies) {
        info!("Time stop over, time scale back to {}", time.time_scale());
    }

    for request in started.read() {
        // Bodies frozen by someone else are not ours to release later.
        let affected = bodies_in_radius(
            candidates
                .iter()
                .filter(|(entity, _, _)| *entity != request.entity)
                .filter(|(entity, _, _)| bodies.get(*entity).is_ok_and(|rb| !rb.frozen))
                .map(|(entity, position, group)| (entity, position.pos, group)),
            request.origin,
            config.timestop_radius,
            &config.timestop_groups,
        );
        let pinned = affected.len();
        match dilation.start(
            &mut time.scale,
            config.timestop_scale,
            config.timestop_duration,
            affected,
            &mut bodies,
        ) {
            Ok(()) => info!(
                "Time stop by {:?}: scale {} for {}s, {} bodies pinned",
                request.entity, config.timestop_scale, config.timestop_duration, pinned
            ),
            Err(e) => warn!("Time stop by {:?} rejected: {}", request.entity, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bodies_in_radius_filters_by_distance_and_group() {
        let mut world = World::new();
        let near_enemy = world.spawn_empty().id();
        let far_enemy = world.spawn_empty().id();
        let near_pickup = world.spawn_empty().id();
        let enemy = Group::new("enemy");
        let pickup = Group::new("pickup");
        let groups = vec!["enemy".to_string(), "projectile".to_string()];

        let found = bodies_in_radius(
            [
                (near_enemy, Vec3::new(3.0, 4.0, 0.0), &enemy),
                (far_enemy, Vec3::new(30.0, 0.0, 0.0), &enemy),
                (near_pickup, Vec3::new(1.0, 0.0, 0.0), &pickup),
            ],
            Vec3::ZERO,
            5.0,
            &groups,
        );

        assert_eq!(found.len(), 1);
        assert!(found.contains(&near_enemy));
    }

    #[test]
    fn test_bodies_in_radius_empty_groups_matches_nothing() {
        let mut world = World::new();
        let e = world.spawn_empty().id();
        let enemy = Group::new("enemy");
        let found = bodies_in_radius([(e, Vec3::ZERO, &enemy)], Vec3::ZERO, 10.0, &[]);
        assert!(found.is_empty());
    }
}
