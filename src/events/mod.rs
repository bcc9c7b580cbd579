//! Event and message types used by the engine.
//!
//! Submodules:
//! - [`damage`] – hits applied to health through an observer
//! - [`effects`] – fire-and-forget effect spawn requests
//! - [`recall`] – recall requests, the time-stop hand-off and notifications
pub mod damage;
pub mod effects;
pub mod recall;
