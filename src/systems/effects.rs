//! Effect thread and the systems that feed it.
//!
//! - [`effect_thread`] runs on its own OS thread and plays the requested
//!   effects. Rendering is outside this crate, so "playing" means tracking
//!   the active burst and logging its lifecycle.
//! - [`forward_effect_cmds`] drains ECS [`EffectCmd`] messages into the
//!   bridge channel each frame.
//! - [`update_effect_cmds`] advances the ECS message queue.
//!
//! Sends are fire-and-forget: a closed channel or missing bridge drops the
//! request without affecting gameplay.

use std::time::{Duration, Instant};

use crate::events::effects::EffectCmd;
use crate::resources::effects::EffectBridge;
use bevy_ecs::prelude::{MessageReader, Messages, Res, ResMut};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use glam::Vec3;
use log::{debug, info};

/// Extra lifetime of a burst after its nominal duration.
pub const EFFECT_LINGER: f32 = 0.5;

/// Poll interval of the effect thread.
const EFFECT_TICK: Duration = Duration::from_millis(16);

/// Forward ECS EffectCmd messages to the effect thread via the bridge.
pub fn forward_effect_cmds(
    bridge: Option<Res<EffectBridge>>,
    mut reader: MessageReader<EffectCmd>,
) {
    let Some(bridge) = bridge else {
        // Nobody listening; consume so the cursor keeps up.
        reader.clear();
        return;
    };
    for cmd in reader.read() {
        // Ignore send error on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for EffectCmd.
pub fn update_effect_cmds(mut msgs: ResMut<Messages<EffectCmd>>) {
    msgs.update();
}

/// A burst currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEffect {
    pub position: Vec3,
    pub color: [f32; 4],
    /// Seconds until the burst is destroyed.
    pub remaining: f32,
}

/// Effect bookkeeping owned by the effect thread.
#[derive(Debug, Default)]
pub struct EffectPlayer {
    active: Option<ActiveEffect>,
}

impl EffectPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveEffect> {
        self.active.as_ref()
    }

    /// Apply one command. Returns false when the thread should exit.
    pub fn handle(&mut self, cmd: EffectCmd) -> bool {
        match cmd {
            EffectCmd::RecallBurst {
                position,
                color,
                duration,
            } => {
                if let Some(previous) = self.active.take() {
                    debug!("[effects] stopping burst at {:?}", previous.position);
                }
                info!(
                    "[effects] recall burst at ({:.2}, {:.2}, {:.2}) color={:?} for {}s",
                    position.x, position.y, position.z, color, duration
                );
                self.active = Some(ActiveEffect {
                    position,
                    color,
                    remaining: duration.max(0.0) + EFFECT_LINGER,
                });
                true
            }
            EffectCmd::Shutdown => {
                self.active = None;
                false
            }
        }
    }

    /// Age the active burst by `dt` seconds and destroy it when done.
    pub fn advance(&mut self, dt: f32) {
        let expired = match self.active.as_mut() {
            Some(effect) => {
                effect.remaining -= dt;
                effect.remaining <= 0.0
            }
            None => false,
        };
        if expired {
            debug!("[effects] burst finished");
            self.active = None;
        }
    }
}

/// Entry point of the dedicated effect thread.
///
/// Blocks until it receives [`EffectCmd::Shutdown`] or the sender is
/// dropped.
pub fn effect_thread(rx_cmd: Receiver<EffectCmd>) {
    debug!(
        "[effects] thread starting (id={:?})",
        std::thread::current().id()
    );
    let mut player = EffectPlayer::new();
    let mut last = Instant::now();

    loop {
        match rx_cmd.recv_timeout(EFFECT_TICK) {
            Ok(cmd) => {
                if !player.handle(cmd) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        let now = Instant::now();
        player.advance(now.duration_since(last).as_secs_f32());
        last = now;
    }

    debug!("[effects] thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst(x: f32) -> EffectCmd {
        EffectCmd::RecallBurst {
            position: Vec3::new(x, 0.0, 0.0),
            color: [1.0, 1.0, 1.0, 1.0],
            duration: 0.5,
        }
    }

    #[test]
    fn test_burst_lives_for_duration_plus_linger() {
        let mut player = EffectPlayer::new();
        assert!(player.handle(burst(1.0)));
        player.advance(0.9);
        assert!(player.active().is_some());
        player.advance(0.2);
        assert!(player.active().is_none());
    }

    #[test]
    fn test_new_burst_replaces_active_one() {
        let mut player = EffectPlayer::new();
        player.handle(burst(1.0));
        player.advance(0.5);
        player.handle(burst(2.0));
        let active = player.active().unwrap();
        assert_eq!(active.position.x, 2.0);
        assert!((active.remaining - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_shutdown_stops_thread_loop() {
        let mut player = EffectPlayer::new();
        player.handle(burst(1.0));
        assert!(!player.handle(EffectCmd::Shutdown));
        assert!(player.active().is_none());
    }

    #[test]
    fn test_effect_thread_exits_on_shutdown() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = std::thread::spawn(move || effect_thread(rx));
        tx.send(burst(0.0)).unwrap();
        tx.send(EffectCmd::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
