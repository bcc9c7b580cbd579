//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying the current time scale to the provided
//! delta while keeping the unscaled clock alongside.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance both clocks on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The scaled
/// `delta` drives gameplay; `real_delta` drives effects that must ignore
/// dilation.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale();
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.real_elapsed += dt;
    wt.real_delta = dt;
    wt.frame_count += 1;
}
