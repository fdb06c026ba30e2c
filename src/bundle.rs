//! Spawn a simulation into the world
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Running totals of the ticks a [SimulationDriver] has performed
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct TickStats {
	/// Number of ticks
	ticks: u64,
	/// Number of successfully generated fields
	regenerations: u32,
	/// Number of failed field generations
	failures: u32,
	/// Agents outside of the grid during the last tick
	fallback_agents: usize,
}

impl TickStats {
	/// Fold the outcome of a tick into the totals
	pub fn record(&mut self, report: &TickReport) {
		self.ticks += 1;
		if report.get_regenerated().is_some() {
			self.regenerations += 1;
		}
		if report.get_failure().is_some() {
			self.failures += 1;
		}
		self.fallback_agents = report.get_fallback_agents();
	}
	pub fn get_ticks(&self) -> u64 {
		self.ticks
	}
	pub fn get_regenerations(&self) -> u32 {
		self.regenerations
	}
	pub fn get_failures(&self) -> u32 {
		self.failures
	}
	pub fn get_fallback_agents(&self) -> usize {
		self.fallback_agents
	}
}

#[derive(Bundle)]
pub struct HexFlowFieldBundle {
	/// Grid, field and obstacles
	driver: SimulationDriver,
	/// Totals of the driver's ticks
	stats: TickStats,
}

impl HexFlowFieldBundle {
	/// Create a new instance of [HexFlowFieldBundle] with a grid built around
	/// the static `obstacles`
	pub fn new(settings: HexFlowSettings, obstacles: StaticObstacles) -> Self {
		let mut driver = SimulationDriver::new(settings);
		driver.initialise(obstacles);
		HexFlowFieldBundle {
			driver,
			stats: TickStats::default(),
		}
	}
	/// Create a new instance of [HexFlowFieldBundle] where the [HexFlowSettings] are read from disk
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str, obstacles: StaticObstacles) -> Result<Self, HexFlowError> {
		let settings = HexFlowSettings::from_ron(path)?;
		Ok(HexFlowFieldBundle::new(settings, obstacles))
	}
	pub fn get_driver(&self) -> &SimulationDriver {
		&self.driver
	}
}
