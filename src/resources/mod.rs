//! ECS resources made available to systems.
//!
//! Overview
//! - `effects` – bridge and channel for the background effect thread
//! - `recallconfig` – tunables for recall, time stop and effects, INI backed
//! - `timedilation` – the single active time-stop session
//! - `worldtime` – simulation time, real time and the leased time scale
pub mod effects;
pub mod recallconfig;
pub mod timedilation;
pub mod worldtime;
