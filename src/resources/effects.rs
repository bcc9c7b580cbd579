//! ECS resource that bridges the main thread with the background effect
//! thread.
//!
//! Use [`setup_effects`] once during initialization to spawn the thread and
//! insert the [`EffectBridge`] and `Messages<EffectCmd>` resources. Call
//! [`shutdown_effects`] during teardown to stop the thread.

use crate::events::effects::EffectCmd;
use crate::systems::effects::effect_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Sender, unbounded};

/// Shared bridge between the ECS world and the effect thread.
#[derive(Resource)]
pub struct EffectBridge {
    /// Sender for [`EffectCmd`] messages (ECS -> effect thread).
    pub tx_cmd: Sender<EffectCmd>,
    /// Join handle for the background thread, if one was spawned.
    pub handle: Option<std::thread::JoinHandle<()>>,
}

/// Spawn the effect thread and register bridge resources.
pub fn setup_effects(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<EffectCmd>();

    let handle = std::thread::spawn(move || effect_thread(rx_cmd));

    world.insert_resource(EffectBridge {
        tx_cmd,
        handle: Some(handle),
    });
    world.insert_resource(Messages::<EffectCmd>::default());
}

/// Request shutdown of the effect thread and join it.
pub fn shutdown_effects(world: &mut World) {
    if let Some(mut bridge) = world.remove_resource::<EffectBridge>() {
        let _ = bridge.tx_cmd.send(EffectCmd::Shutdown);
        if let Some(handle) = bridge.handle.take() {
            let _ = handle.join();
        }
    }
}
