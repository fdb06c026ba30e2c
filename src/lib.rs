//! This is a plugin for Bevy game engine to calculate FlowFields over a
//! hexagonal grid and steer a crowd of actors along them while they avoid
//! each other and static obstacles
//!

pub mod bundle;
pub mod error;
pub mod flowfields;
pub mod plugin;
pub mod settings;
pub mod simulation;
pub mod steering;

pub mod prelude;
