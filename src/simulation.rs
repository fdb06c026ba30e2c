//! Drives a tick of the crowd: regenerate the [HexFlowField] when the target
//! changes cell, refresh the desired velocity of every agent from the field,
//! resolve avoidance in parallel and finally move the agents.
//!
//! The driver moves through [SimulationState]s:
//!
//! ```text
//! Idle --initialise--> GridReady --target seen--> FieldGenerated --> Running
//!                                                       ^               |
//!                                                       +-target moves--+
//! ```
//!

use std::f32::consts::TAU;

use crate::prelude::*;
use bevy::prelude::*;
use bevy::tasks::TaskPool;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Lifecycle of a [SimulationDriver]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum SimulationState {
	/// No grid exists, ticks do nothing
	#[default]
	Idle,
	/// The grid is built but no field has been generated
	GridReady,
	/// A field was generated during the current tick
	FieldGenerated,
	/// Agents are following a generated field
	Running,
}

/// What happened during a single [SimulationDriver::tick]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
	/// Target of a field generated this tick
	regenerated: Option<HexCoord>,
	/// Why a generation attempted this tick failed
	failure: Option<HexFlowError>,
	/// Number of agents outside of the grid which were given a random direction
	fallback_agents: usize,
}

impl TickReport {
	pub fn get_regenerated(&self) -> Option<HexCoord> {
		self.regenerated
	}
	pub fn get_failure(&self) -> Option<&HexFlowError> {
		self.failure.as_ref()
	}
	pub fn get_fallback_agents(&self) -> usize {
		self.fallback_agents
	}
}

/// Owns the grid, the field and the obstacle snapshot of a simulation and
/// steps a crowd of [Agent]s through them
#[derive(Component)]
pub struct SimulationDriver {
	/// Configuration the driver was built with
	settings: HexFlowSettings,
	/// Where in its lifecycle the driver is
	state: SimulationState,
	/// Map of cells, [None] until initialised
	grid: Option<HexGrid>,
	/// Fields of the current target, [None] until initialised
	field: Option<HexFlowField>,
	/// Obstacles pushing agents away
	obstacles: StaticObstacles,
	/// Resolver tuning derived from the settings
	params: AvoidanceParams,
	/// Source of directions for agents outside of the grid
	rng: StdRng,
}

impl SimulationDriver {
	/// Create a new instance of [SimulationDriver] in the [SimulationState::Idle] state
	pub fn new(settings: HexFlowSettings) -> Self {
		let params = settings.avoidance_params();
		let rng = StdRng::seed_from_u64(settings.seed);
		SimulationDriver {
			settings,
			state: SimulationState::Idle,
			grid: None,
			field: None,
			obstacles: StaticObstacles::default(),
			params,
			rng,
		}
	}
	/// Build the grid. Obstacles further than twice the grid radius from the
	/// origin are discarded, the rest mark every cell whose centre lies
	/// within the obstacle check radius of them
	pub fn initialise(&mut self, obstacles: StaticObstacles) {
		let grid_settings = self.settings.grid;
		let range = 2.0 * grid_settings.radius as f32 * grid_settings.cell_size;
		let obstacles = obstacles.within(range);
		let grid = HexGrid::new(grid_settings.radius, grid_settings.layout(), |p| {
			obstacles.overlaps_circle(p, grid_settings.obstacle_check_radius)
		});
		self.set_grid(grid, obstacles);
	}
	/// Build the grid with cells flagged by `is_obstacle`, `obstacles` are
	/// only used to push agents away
	pub fn initialise_with_predicate<F>(&mut self, obstacles: StaticObstacles, is_obstacle: F)
	where
		F: Fn(Vec2) -> bool,
	{
		let grid_settings = self.settings.grid;
		let grid = HexGrid::new(grid_settings.radius, grid_settings.layout(), is_obstacle);
		self.set_grid(grid, obstacles);
	}
	/// Replace the grid and any field generated for the old one
	fn set_grid(&mut self, grid: HexGrid, obstacles: StaticObstacles) {
		self.field = Some(HexFlowField::new(&grid));
		self.grid = Some(grid);
		self.obstacles = obstacles;
		self.state = SimulationState::GridReady;
		debug!(
			"SimulationDriver grid ready with {} static obstacles",
			self.obstacles.len()
		);
	}
	pub fn get_state(&self) -> SimulationState {
		self.state
	}
	pub fn get_settings(&self) -> &HexFlowSettings {
		&self.settings
	}
	pub fn get_grid(&self) -> Option<&HexGrid> {
		self.grid.as_ref()
	}
	pub fn get_flow_field(&self) -> Option<&HexFlowField> {
		self.field.as_ref()
	}
	pub fn get_obstacles(&self) -> &StaticObstacles {
		&self.obstacles
	}
	/// Direction of the cell containing a world position. Zero when the
	/// position is outside of the grid, there's no field yet, or the cell has
	/// no route
	pub fn get_flow_direction(&self, position: Vec2) -> Vec2 {
		match (&self.grid, &self.field) {
			(Some(grid), Some(field)) => field
				.get_flow_direction(grid, position)
				.unwrap_or(Vec2::ZERO),
			_ => Vec2::ZERO,
		}
	}
	/// Create the configured number of agents on the centres of walkable
	/// cells in grid order, more agents than cells share cells
	pub fn spawn_agents(&self) -> Vec<Agent> {
		let Some(grid) = &self.grid else {
			warn!("Cannot spawn agents before the SimulationDriver is initialised");
			return Vec::new();
		};
		let walkable: Vec<Vec2> = grid
			.get_cells()
			.iter()
			.filter(|c| !c.is_obstacle())
			.map(|c| c.get_position())
			.collect();
		if walkable.is_empty() {
			warn!("Cannot spawn agents, every cell is an obstacle");
			return Vec::new();
		}
		walkable
			.iter()
			.cycle()
			.take(self.settings.agents.count)
			.map(|p| Agent::new(*p, &self.settings.agents))
			.collect()
	}
	/// Step the simulation by `dt` seconds toward `target`. Avoidance is
	/// resolved across `task_pool` and the agents are moved once every one
	/// of them has been resolved
	pub fn tick(
		&mut self,
		target: Vec2,
		agents: &mut [Agent],
		dt: f32,
		task_pool: &TaskPool,
	) -> TickReport {
		let mut report = TickReport::default();
		let (Some(grid), Some(field)) = (&self.grid, &mut self.field) else {
			trace!("SimulationDriver is idle, skipping tick");
			return report;
		};
		// regenerate when the target changes cell
		let target_coord = grid.world_to_axial(target);
		if field.needs_regeneration(target_coord) {
			match field.generate(grid, target_coord) {
				Ok(()) => {
					self.state = SimulationState::FieldGenerated;
					report.regenerated = Some(target_coord);
				}
				Err(e) => report.failure = Some(e),
			}
		}
		// desired velocities
		let mut snapshots = Vec::with_capacity(agents.len());
		for agent in agents.iter_mut() {
			match field.get_flow_direction(grid, agent.get_position()) {
				Some(direction) => {
					agent.steer(direction);
					snapshots.push(agent.snapshot(direction));
				}
				None => {
					report.fallback_agents += 1;
					agent.steer(random_direction(&mut self.rng));
					snapshots.push(agent.snapshot(Vec2::ZERO));
				}
			}
		}
		let velocities = resolve_velocities(
			&snapshots,
			self.obstacles.get(),
			&self.params,
			self.settings.avoidance.batch_size,
			task_pool,
		);
		for (agent, velocity) in agents.iter_mut().zip(velocities) {
			agent.set_velocity(velocity);
			agent.integrate(dt);
		}
		if field.is_generated() {
			self.state = SimulationState::Running;
		}
		trace!(
			"Ticked {} agents, {} outside of the grid",
			agents.len(),
			report.fallback_agents
		);
		report
	}
}

/// A unit vector in a random direction
fn random_direction(rng: &mut StdRng) -> Vec2 {
	Vec2::from_angle(rng.random_range(0.0..TAU))
}
