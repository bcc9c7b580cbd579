use bevy_ecs::prelude::*;

use crate::components::health::Health;
use crate::resources::worldtime::WorldTime;

/// Count down invincibility windows on every [`Health`].
pub fn health_system(mut query: Query<&mut Health>, time: Res<WorldTime>) {
    let dt = time.delta;
    for mut health in query.iter_mut() {
        if health.is_invincible() {
            health.tick(dt);
        }
    }
}
