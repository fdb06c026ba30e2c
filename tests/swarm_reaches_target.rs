//! Drive a crowd across a walled map and check it gathers around the target
//!

use bevy::prelude::*;
use bevy::tasks::TaskPool;
use bevy_hexflow_plugin::prelude::*;

/// Mean distance of the agents from a point
fn mean_distance(agents: &[Agent], point: Vec2) -> f32 {
	agents
		.iter()
		.map(|a| a.get_position().distance(point))
		.sum::<f32>()
		/ agents.len() as f32
}

#[test]
fn crowd_moves_around_wall_toward_target() {
	let mut settings = HexFlowSettings::default();
	settings.grid.radius = 8;
	settings.agents.count = 12;
	settings.seed = 7;
	// a wall of obstacles down the middle of the map with a gap at the top
	let obstacles = StaticObstacles::new(
		(-6..4)
			.map(|i| StaticObstacle::new(Vec2::new(0.0, i as f32 * 1.5), 0.5))
			.collect(),
	);
	let mut driver = SimulationDriver::new(settings);
	driver.initialise(obstacles);
	let grid = driver.get_grid().unwrap();
	let target = grid.axial_to_world(HexCoord::new(4, 0));
	assert!(!grid.is_obstacle(HexCoord::new(4, 0)));
	// start everyone on the far side of the wall
	let start = grid.axial_to_world(HexCoord::new(-5, 0));
	let mut agents: Vec<Agent> = (0..12)
		.map(|i| {
			let offset = Vec2::new((i % 4) as f32, (i / 4) as f32) * 0.6;
			Agent::new(start + offset, &driver.get_settings().agents)
		})
		.collect();
	let before = mean_distance(&agents, target);
	let pool = TaskPool::new();
	let first = driver.tick(target, &mut agents, 1.0 / 30.0, &pool);
	assert_eq!(Some(HexCoord::new(4, 0)), first.get_regenerated());
	for _ in 0..600 {
		let report = driver.tick(target, &mut agents, 1.0 / 30.0, &pool);
		assert_eq!(None, report.get_failure());
	}
	let after = mean_distance(&agents, target);
	assert!(after < before * 0.5, "before {} after {}", before, after);
	for agent in agents.iter() {
		assert!(agent.get_velocity().length() <= agent.get_max_speed() + 1e-4);
	}
}

#[test]
fn flow_field_descends_everywhere() {
	let mut driver = SimulationDriver::new(HexFlowSettings::default());
	driver.initialise(StaticObstacles::new(vec![
		StaticObstacle::new(Vec2::new(3.0, 3.0), 1.2),
		StaticObstacle::new(Vec2::new(-4.0, 1.0), 2.0),
	]));
	let pool = TaskPool::new();
	driver.tick(Vec2::new(-8.0, -6.0), &mut [], 0.0, &pool);
	let grid = driver.get_grid().unwrap();
	let field = driver.get_flow_field().unwrap();
	let spacing = grid.get_layout().get_neighbour_spacing();
	for cell in grid.get_cells() {
		let cost = field.get_cost(grid, cell.get_coord()).unwrap();
		let direction = field.get_direction(grid, cell.get_coord()).unwrap();
		if cost == 0 || cost == COST_UNREACHABLE {
			assert_eq!(Vec2::ZERO, direction);
			continue;
		}
		let next = grid.world_to_axial(cell.get_position() + direction * spacing);
		assert_eq!(Some(cost - 1), field.get_cost(grid, next));
	}
	assert_eq!(
		field.max_reachable_cost(),
		grid.get_cells()
			.iter()
			.filter_map(|c| field.get_cost(grid, c.get_coord()))
			.filter(|c| *c != COST_UNREACHABLE)
			.max()
	);
}
