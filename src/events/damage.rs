//! Damage events.
//!
//! Anything that hurts an entity triggers a [`DamageEvent`]; the
//! [`damage_observer`] applies it to the target's
//! [`Health`](crate::components::health::Health), honoring its invincibility
//! window.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::health::Health;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEvent {
    /// The entity being hit.
    pub entity: Entity,
    /// Hit points to remove.
    pub amount: i32,
}

/// Observer that applies a [`DamageEvent`] to the target's health.
pub fn damage_observer(trigger: On<DamageEvent>, mut query: Query<&mut Health>) {
    let Ok(mut health) = query.get_mut(trigger.entity) else {
        debug!("DamageEvent for {:?} without Health", trigger.entity);
        return;
    };
    if health.take_damage(trigger.amount) {
        info!(
            "Entity {:?} hit for {}, hp {}/{}",
            trigger.entity, trigger.amount, health.current, health.max
        );
        if health.is_depleted() {
            info!("Entity {:?} is down", trigger.entity);
        }
    }
}
