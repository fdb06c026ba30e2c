//! Resolve the velocity of every agent from a snapshot of the crowd.
//!
//! For an agent the resolver:
//!
//! 1. Sums a repulsive force from every other agent within the avoidance
//!    radius, fading linearly from full strength when touching to nothing at
//!    the edge of the radius
//! 2. Adds a repulsive force from every static obstacle closer than the
//!    avoidance radius plus the combined body radii, at twice the strength
//! 3. Adds the forces to the desired velocity and clamps the result to the
//!    maximum speed
//! 4. Pulls the velocity toward the flow direction of the agent's cell by the
//!    flow weight, as long as the cell has a direction
//!
//! Agents closer than [MIN_SEPARATION] to each other (or to an obstacle
//! centre) exert no force, there's no meaningful direction to push in.
//!
//! Each agent only reads the shared snapshots and writes its own output so
//! the agents can be resolved in parallel batches in any order.
//!

use crate::prelude::*;
use bevy::prelude::*;
use bevy::tasks::{ParallelSliceMut, TaskPool};

/// Tuning of the resolver shared by every agent
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct AvoidanceParams {
	/// Agents within this distance push each other apart
	radius: f32,
	/// Blend factor toward the flow direction, `0` ignores it and `1` follows it exactly
	flow_weight: f32,
}

impl AvoidanceParams {
	/// Create a new instance of [AvoidanceParams]. The `radius` must be positive
	/// and the `flow_weight` finite
	pub fn new(radius: f32, flow_weight: f32) -> Self {
		if !radius.is_finite() || radius <= 0.0 {
			panic!("Avoidance radius must be a positive number, got {}", radius);
		}
		if !flow_weight.is_finite() {
			panic!("Avoidance flow weight must be finite, got {}", flow_weight);
		}
		AvoidanceParams {
			radius,
			flow_weight: flow_weight.clamp(0.0, 1.0),
		}
	}
	pub fn get_radius(&self) -> f32 {
		self.radius
	}
	pub fn get_flow_weight(&self) -> f32 {
		self.flow_weight
	}
}

impl Default for AvoidanceParams {
	fn default() -> Self {
		let settings = AvoidanceSettings::default();
		AvoidanceParams::new(settings.radius, settings.flow_weight)
	}
}

/// Calculate the new velocity of the agent at `index`
pub fn resolve_agent(
	index: usize,
	agents: &[AgentSnapshot],
	obstacles: &[StaticObstacle],
	params: &AvoidanceParams,
) -> Vec2 {
	let agent = &agents[index];
	let radius = params.radius;
	let mut avoidance_force = Vec2::ZERO;
	// other agents
	for (i, other) in agents.iter().enumerate() {
		if i == index {
			continue;
		}
		let to_other = other.get_position() - agent.get_position();
		let distance = to_other.length();
		if distance < radius && distance > MIN_SEPARATION {
			let magnitude = agent.get_avoidance_strength() * ((radius - distance) / radius).max(0.0);
			avoidance_force -= to_other / distance * magnitude;
		}
	}
	// static obstacles
	for obstacle in obstacles.iter() {
		let to_obstacle = obstacle.get_position() - agent.get_position();
		let distance = to_obstacle.length();
		let min_distance = agent.get_radius() + obstacle.get_radius();
		if distance < radius + min_distance && distance > MIN_SEPARATION {
			let magnitude = agent.get_avoidance_strength()
				* 2.0 * ((radius + min_distance - distance) / radius).max(0.0);
			avoidance_force -= to_obstacle / distance * magnitude;
		}
	}
	let mut velocity =
		(agent.get_desired_velocity() + avoidance_force).clamp_length_max(agent.get_max_speed());
	let flow_direction = agent.get_flow_direction();
	if flow_direction.length_squared() > 0.1 {
		velocity = velocity.lerp(
			flow_direction * agent.get_max_speed(),
			params.flow_weight,
		);
	}
	velocity
}

/// Resolve every agent across the `task_pool`, each task handles a batch of
/// `batch_size` consecutive agents. Returns once every batch has finished,
/// the velocity of agent `i` is at index `i`
pub fn resolve_velocities(
	agents: &[AgentSnapshot],
	obstacles: &[StaticObstacle],
	params: &AvoidanceParams,
	batch_size: usize,
	task_pool: &TaskPool,
) -> Vec<Vec2> {
	let batch_size = batch_size.max(1);
	let mut velocities = vec![Vec2::ZERO; agents.len()];
	velocities.par_chunk_map_mut(task_pool, batch_size, |batch, slots| {
		let start = batch * batch_size;
		for (offset, slot) in slots.iter_mut().enumerate() {
			*slot = resolve_agent(start + offset, agents, obstacles, params);
		}
	});
	velocities
}

/// Resolve every agent one after another on the calling thread
pub fn resolve_velocities_serial(
	agents: &[AgentSnapshot],
	obstacles: &[StaticObstacle],
	params: &AvoidanceParams,
) -> Vec<Vec2> {
	(0..agents.len())
		.map(|i| resolve_agent(i, agents, obstacles, params))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Snapshot of an agent with default settings heading in `desired` with
	/// the given cell flow direction
	fn snapshot(position: Vec2, desired: Vec2, flow: Vec2) -> AgentSnapshot {
		let mut agent = Agent::new(position, &AgentSettings::default());
		agent.steer(desired);
		agent.snapshot(flow)
	}
	/// A loose crowd in a ring heading for the middle
	fn crowd(count: usize) -> Vec<AgentSnapshot> {
		(0..count)
			.map(|i| {
				let angle = i as f32 * 0.7;
				let position = Vec2::new(angle.cos(), angle.sin()) * (1.0 + i as f32 * 0.15);
				let heading = -position.normalize();
				snapshot(position, heading, heading)
			})
			.collect()
	}

	#[test]
	fn lone_agent_keeps_desired_velocity() {
		let agents = vec![snapshot(Vec2::ZERO, Vec2::X, Vec2::ZERO)];
		let result = resolve_velocities_serial(&agents, &[], &AvoidanceParams::default());
		assert_eq!(vec![Vec2::new(5.0, 0.0)], result);
	}
	#[test]
	fn head_on_agents_repel_laterally() {
		// slightly offset so the push has a sideways component
		let agents = vec![
			snapshot(Vec2::new(-0.5, -0.1), Vec2::X, Vec2::ZERO),
			snapshot(Vec2::new(0.5, 0.1), -Vec2::X, Vec2::ZERO),
		];
		let result = resolve_velocities_serial(&agents, &[], &AvoidanceParams::default());
		assert!(result[0].y < 0.0);
		assert!(result[1].y > 0.0);
		for v in result.iter() {
			assert!(v.length() <= 5.0 + 1e-5);
			// slowed down by the repulsion
			assert!(v.x.abs() < 5.0);
		}
	}
	#[test]
	fn push_from_behind_is_clamped() {
		let agents = vec![
			snapshot(Vec2::ZERO, Vec2::X, Vec2::ZERO),
			snapshot(Vec2::new(-0.5, 0.0), Vec2::X, Vec2::ZERO),
		];
		let result = resolve_velocities_serial(&agents, &[], &AvoidanceParams::default());
		assert!((result[0] - Vec2::new(5.0, 0.0)).length() < 1e-5);
	}
	#[test]
	fn coincident_agents_exert_no_force() {
		let agents = vec![
			snapshot(Vec2::ONE, Vec2::ZERO, Vec2::ZERO),
			snapshot(Vec2::ONE, Vec2::ZERO, Vec2::ZERO),
		];
		let result = resolve_velocities_serial(&agents, &[], &AvoidanceParams::default());
		assert_eq!(vec![Vec2::ZERO, Vec2::ZERO], result);
	}
	#[test]
	fn agents_beyond_radius_are_ignored() {
		let agents = vec![
			snapshot(Vec2::ZERO, Vec2::Y, Vec2::ZERO),
			snapshot(Vec2::new(2.5, 0.0), Vec2::Y, Vec2::ZERO),
		];
		let result = resolve_velocities_serial(&agents, &[], &AvoidanceParams::default());
		assert_eq!(Vec2::new(0.0, 5.0), result[0]);
	}
	#[test]
	fn obstacle_pushes_agent_away() {
		let agents = vec![snapshot(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO)];
		let obstacles = vec![StaticObstacle::new(Vec2::new(1.0, 0.0), 0.5)];
		let result = resolve_velocities_serial(&agents, &obstacles, &AvoidanceParams::default());
		// 2 * strength * (R + combined - d) / R = 2 * 2 * (2 + 1 - 1) / 2
		assert!((result[0] - Vec2::new(-4.0, 0.0)).length() < 1e-5);
	}
	#[test]
	fn flow_direction_blend() {
		let agents = vec![snapshot(Vec2::ZERO, Vec2::ZERO, Vec2::Y)];
		let result = resolve_velocities_serial(&agents, &[], &AvoidanceParams::new(2.0, 0.7));
		assert!((result[0] - Vec2::new(0.0, 3.5)).length() < 1e-5);
	}
	#[test]
	fn weak_flow_direction_is_ignored() {
		let agents = vec![snapshot(Vec2::ZERO, Vec2::X, Vec2::new(0.0, 0.3))];
		let result = resolve_velocities_serial(&agents, &[], &AvoidanceParams::default());
		assert_eq!(Vec2::new(5.0, 0.0), result[0]);
	}
	#[test]
	fn resolving_twice_is_deterministic() {
		let agents = crowd(40);
		let params = AvoidanceParams::default();
		let first = resolve_velocities_serial(&agents, &[], &params);
		let second = resolve_velocities_serial(&agents, &[], &params);
		assert_eq!(first, second);
	}
	#[test]
	fn result_does_not_depend_on_processing_order() {
		let agents = crowd(25);
		let params = AvoidanceParams::default();
		let forward: Vec<Vec2> = (0..agents.len())
			.map(|i| resolve_agent(i, &agents, &[], &params))
			.collect();
		let mut backward: Vec<Vec2> = (0..agents.len())
			.rev()
			.map(|i| resolve_agent(i, &agents, &[], &params))
			.collect();
		backward.reverse();
		assert_eq!(forward, backward);
	}
	#[test]
	fn parallel_matches_serial() {
		let agents = crowd(100);
		let obstacles = vec![StaticObstacle::new(Vec2::new(0.5, 0.5), 0.3)];
		let params = AvoidanceParams::default();
		let pool = TaskPool::new();
		let serial = resolve_velocities_serial(&agents, &obstacles, &params);
		for batch_size in [1, 7, 32, 500] {
			let parallel = resolve_velocities(&agents, &obstacles, &params, batch_size, &pool);
			assert_eq!(serial, parallel);
		}
	}
	#[test]
	#[should_panic]
	fn zero_radius() {
		AvoidanceParams::new(0.0, 0.7);
	}
	#[test]
	#[should_panic]
	fn nan_flow_weight() {
		AvoidanceParams::new(2.0, f32::NAN);
	}
}
