//! Rewind Engine main entry point.
//!
//! A headless driver for the recall ability built on:
//! - **bevy_ecs** for entity-component-system architecture
//! - **glam** for vectors and quaternions
//! - **crossbeam-channel** for the effect thread bridge
//!
//! The executable runs a scripted scenario at a fixed frame rate: the player
//! walks, takes periodic hits, and requests recalls at the given times while
//! enemies and projectiles drift around it.
//!
//! # Main Loop
//!
//! 1. Load `recall.ini` (or the `--config` path), falling back to defaults
//! 2. Start the effect thread, build the world and spawn the scene
//! 3. Each frame: apply scripted input, advance time, run the schedule
//! 4. Optionally dump the player's history as JSON, then stop the effect thread
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --recall-at 4 --recall-at 16
//! ```

mod components;
mod events;
mod game;
mod resources;
mod systems;

use crate::components::cooldown::CooldownGate;
use crate::components::health::Health;
use crate::components::history::HistoryBuffer;
use crate::components::mapposition::MapPosition;
use crate::components::recall::RecallCoordinator;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::events::damage::DamageEvent;
use crate::events::recall::RecallRequest;
use crate::resources::effects::{setup_effects, shutdown_effects};
use crate::resources::recallconfig::RecallConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::time::update_world_time;
use bevy_ecs::prelude::*;
use clap::Parser;
use glam::{Quat, Vec3};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Seconds between HUD log lines.
const HUD_INTERVAL: f32 = 0.5;
/// Seconds between scripted hits on the player.
const DAMAGE_INTERVAL: f32 = 3.0;
/// Player walking speed in units per second.
const WALK_SPEED: f32 = 8.0;
/// Player turn rate in radians per second.
const TURN_RATE: f32 = 0.6;

/// Rewind Engine
#[derive(Parser)]
#[command(version, about = "Headless driver for the recall ability")]
struct Cli {
    /// INI file with recall, time stop, effect and player settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 20.0)]
    seconds: f32,

    /// Fixed frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Scaled time at which the player presses recall. Repeatable.
    #[arg(long = "recall-at", value_name = "SECONDS")]
    recall_at: Vec<f32>,

    /// Number of enemies and projectiles to spawn.
    #[arg(long, default_value_t = 12)]
    enemies: usize,

    /// Global simulation rate before any time stop (1.0 = normal speed).
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    /// Seed for the scene layout.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Write the player's history buffer as JSON on exit.
    #[arg(long, value_name = "PATH")]
    dump_history: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.fps == 0 {
        error!("--fps must be greater than zero");
        std::process::exit(1);
    }

    let mut config = match &cli.config {
        Some(path) => RecallConfig::with_path(path),
        None => RecallConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("Using default recall settings: {}", e);
    }

    info!("Hello, world! This is the Rewind Engine!");

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    setup_effects(&mut world); // must go before setup_world so the bridge owns the queue
    game::setup_world(&mut world, config);
    if let Err(e) = world.resource_mut::<WorldTime>().scale.set(cli.time_scale) {
        warn!("Ignoring --time-scale: {}", e);
    }

    let player = game::spawn_player(&mut world, Vec3::ZERO);
    let mut rng = fastrand::Rng::with_seed(cli.seed);
    let hostiles = game::spawn_hostiles(&mut world, &mut rng, Vec3::ZERO, cli.enemies);
    info!("Spawned player {:?} and {} hostiles", player, hostiles.len());

    let mut update = game::build_update_schedule();

    let mut pending_recalls = cli.recall_at.clone();
    pending_recalls.sort_by(f32::total_cmp);
    pending_recalls.reverse();

    let dt = 1.0 / cli.fps as f32;
    let mut next_damage = DAMAGE_INTERVAL;
    let mut next_hud = 0.0;

    // --------------- Main loop ---------------
    while world.resource::<WorldTime>().real_elapsed < cli.seconds {
        let now = world.resource::<WorldTime>().elapsed;

        drive_player(&mut world, player, now);

        if now >= next_damage {
            next_damage += DAMAGE_INTERVAL;
            world.trigger(DamageEvent {
                entity: player,
                amount: 2,
            });
        }

        while pending_recalls.last().is_some_and(|at| *at <= now) {
            pending_recalls.pop();
            info!("Recall pressed at t={:.2}", now);
            world
                .resource_mut::<Messages<RecallRequest>>()
                .write(RecallRequest { entity: player });
        }

        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame

        let real = world.resource::<WorldTime>().real_elapsed;
        if real >= next_hud {
            next_hud += HUD_INTERVAL;
            log_hud(&mut world, player);
        }
    }

    if let Some(path) = &cli.dump_history {
        if let Err(e) = dump_history(&world, player, path) {
            error!("Failed to dump history: {}", e);
        } else {
            info!("History written to {}", path.display());
        }
    }

    shutdown_effects(&mut world);
}

/// Scripted input: walk in a slow circle unless a recall owns the transform.
fn drive_player(world: &mut World, player: Entity, now: f32) {
    let Ok(mut entity) = world.get_entity_mut(player) else {
        return;
    };
    let recalling = entity
        .get::<RecallCoordinator>()
        .is_some_and(RecallCoordinator::is_recalling);
    let heading = Quat::from_rotation_z(now * TURN_RATE);
    if let Some(mut body) = entity.get_mut::<RigidBody>() {
        body.velocity = if recalling {
            Vec3::ZERO
        } else {
            heading * Vec3::X * WALK_SPEED
        };
    }
    if !recalling {
        if let Some(mut rotation) = entity.get_mut::<Rotation>() {
            rotation.quat = heading;
        }
    }
}

fn log_hud(world: &mut World, player: Entity) {
    let scale = world.resource::<WorldTime>().time_scale();
    let mut query = world.query::<(
        &MapPosition,
        &Health,
        &CooldownGate,
        &RecallCoordinator,
        &HistoryBuffer,
    )>();
    let Ok((pos, health, gate, coordinator, history)) = query.get(world, player) else {
        return;
    };
    info!(
        "pos=({:.1}, {:.1}) hp={}/{} cooldown={:.0}% recalling={} history={} scale={:.2}",
        pos.pos.x,
        pos.pos.y,
        health.current,
        health.max,
        gate.progress() * 100.0,
        coordinator.is_recalling(),
        history.len(),
        scale
    );
}

fn dump_history(world: &World, player: Entity, path: &Path) -> Result<(), String> {
    let history = world
        .get::<HistoryBuffer>(player)
        .ok_or_else(|| format!("entity {:?} has no history", player))?;
    let json = serde_json::to_string_pretty(history).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| format!("{}: {}", path.display(), e))
}
