//! Engine systems.
//!
//! This module groups all ECS systems that advance the simulation.
//!
//! Submodules overview
//! - [`effects`] – bridge with the effect thread (update/forward message queues)
//! - [`health`] – tick invincibility windows
//! - [`messages`] – swap recall message buffers once per frame
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`recall`] – record history, start and drive recalls, tick cooldowns
//! - [`time`] – update simulation time and delta
//! - [`timedilation`] – start and expire time-stop sessions
pub mod effects;
pub mod health;
pub mod messages;
pub mod movement;
pub mod recall;
pub mod time;
pub mod timedilation;
