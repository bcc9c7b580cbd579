//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the simulated world. Components hold per-entity state for placement,
//! physics, health and the recall ability.
//!
//! Submodules overview:
//! - [`cooldown`] – countdown gate that blocks re-triggering an ability
//! - [`group`] – tag component for grouping entities by name
//! - [`health`] – integer hit points with a post-hit invincibility window
//! - [`history`] – rolling, time-bounded buffer of recorded snapshots
//! - [`mapposition`] – world-space position for an entity
//! - [`recall`] – recall state machine and per-frame interpolation
//! - [`rigidbody`] – kinematic body storing velocity and a frozen flag
//! - [`rotation`] – orientation stored as a quaternion
//! - [`snapshot`] – immutable record of transform and health at one instant

pub mod cooldown;
pub mod group;
pub mod health;
pub mod history;
pub mod mapposition;
pub mod recall;
pub mod rigidbody;
pub mod rotation;
pub mod snapshot;
