//! Local steering of agents once the [crate::prelude::FlowField] has told
//! them where to go. Each agent blends its desired velocity with repulsion
//! from nearby agents and static obstacles, every agent is resolved
//! independently from a snapshot of the crowd so the work can be split
//! across threads
//!

pub mod agent;
pub mod avoidance;
pub mod obstacles;
