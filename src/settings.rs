//! Tunable values of the grid, the agents and the avoidance resolver. Every
//! section has defaults so a settings file only needs to name what it changes
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Shape of the hexagonal map
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct GridSettings {
	/// Number of rings of cells around the origin
	pub radius: u32,
	/// Distance from the centre of a cell to its vertices
	pub cell_size: f32,
	/// Pointy or flat topped cells
	pub orientation: HexOrientation,
	/// A cell is an obstacle when a static obstacle overlaps a circle of this
	/// radius at the cell centre
	pub obstacle_check_radius: f32,
}

impl Default for GridSettings {
	fn default() -> Self {
		GridSettings {
			radius: 10,
			cell_size: 1.0,
			orientation: HexOrientation::Pointy,
			obstacle_check_radius: 0.4,
		}
	}
}

impl GridSettings {
	/// Build the [HexLayout] described by these settings
	pub fn layout(&self) -> HexLayout {
		HexLayout::new(self.cell_size, self.orientation)
	}
}

/// Defaults given to newly spawned agents
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct AgentSettings {
	/// How many agents [SimulationDriver::spawn_agents] creates
	pub count: usize,
	/// Body radius of an agent
	pub radius: f32,
	/// Speed limit of an agent
	pub max_speed: f32,
	/// Scales every repulsive force applied to an agent
	pub avoidance_strength: f32,
}

impl Default for AgentSettings {
	fn default() -> Self {
		AgentSettings {
			count: 100,
			radius: 0.5,
			max_speed: 5.0,
			avoidance_strength: 2.0,
		}
	}
}

/// Parameters of the avoidance resolver shared by all agents
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct AvoidanceSettings {
	/// Neighbours closer than this push an agent away
	pub radius: f32,
	/// How strongly the final velocity is pulled toward the flow direction, `0..=1`
	pub flow_weight: f32,
	/// Number of agents resolved by each parallel task
	pub batch_size: usize,
}

impl Default for AvoidanceSettings {
	fn default() -> Self {
		AvoidanceSettings {
			radius: 2.0,
			flow_weight: 0.7,
			batch_size: 32,
		}
	}
}

/// Everything needed to build a [SimulationDriver]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct HexFlowSettings {
	/// Shape of the map
	pub grid: GridSettings,
	/// Defaults of spawned agents
	pub agents: AgentSettings,
	/// Resolver tuning
	pub avoidance: AvoidanceSettings,
	/// Seed of the generator which picks directions for agents outside of the grid
	pub seed: u64,
}

impl Default for HexFlowSettings {
	fn default() -> Self {
		HexFlowSettings {
			grid: GridSettings::default(),
			agents: AgentSettings::default(),
			avoidance: AvoidanceSettings::default(),
			seed: 0,
		}
	}
}

impl HexFlowSettings {
	/// From a `ron` file generate the [HexFlowSettings]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, HexFlowError> {
		let file = std::fs::File::open(path)
			.map_err(|e| HexFlowError::Settings(format!("{}: {}", path, e)))?;
		let settings: HexFlowSettings = ron::de::from_reader(file)
			.map_err(|e| HexFlowError::Settings(format!("{}: {}", path, e)))?;
		settings.validate()?;
		Ok(settings)
	}
	/// Check every value can build a grid and drive the resolver. Sizes,
	/// radii and speeds must be positive finite numbers and the flow weight
	/// must be finite
	pub fn validate(&self) -> Result<(), HexFlowError> {
		let positive = [
			("grid.cell_size", self.grid.cell_size),
			("grid.obstacle_check_radius", self.grid.obstacle_check_radius),
			("agents.max_speed", self.agents.max_speed),
			("avoidance.radius", self.avoidance.radius),
		];
		for (name, value) in positive {
			if !value.is_finite() || value <= 0.0 {
				return Err(HexFlowError::Settings(format!(
					"{} must be a positive number, got {}",
					name, value
				)));
			}
		}
		if !self.avoidance.flow_weight.is_finite() {
			return Err(HexFlowError::Settings(format!(
				"avoidance.flow_weight must be finite, got {}",
				self.avoidance.flow_weight
			)));
		}
		if i32::try_from(self.grid.radius).is_err() {
			return Err(HexFlowError::Settings(format!(
				"grid.radius is too large, got {}",
				self.grid.radius
			)));
		}
		Ok(())
	}
	/// The avoidance parameters the resolver works with
	pub fn avoidance_params(&self) -> AvoidanceParams {
		AvoidanceParams::new(self.avoidance.radius, self.avoidance.flow_weight)
	}
}
