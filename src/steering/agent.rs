//! A mobile actor of the crowd
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Motion state of an actor. The position is on the `(x, y)` plane of the
/// [HexGrid], the plugin mirrors it onto the entity `Transform`
#[derive(Component, Clone, Copy, Debug, PartialEq, Reflect)]
pub struct Agent {
	/// Current position
	position: Vec2,
	/// Velocity produced by the avoidance resolver on the last tick
	velocity: Vec2,
	/// Flow direction scaled by the maximum speed
	desired_velocity: Vec2,
	/// Body radius
	radius: f32,
	/// Speed limit
	max_speed: f32,
	/// Scales the repulsive forces acting on this agent
	avoidance_strength: f32,
}

impl Agent {
	/// Create a new instance of [Agent] at rest
	pub fn new(position: Vec2, settings: &AgentSettings) -> Self {
		Agent {
			position,
			velocity: Vec2::ZERO,
			desired_velocity: Vec2::ZERO,
			radius: settings.radius,
			max_speed: settings.max_speed,
			avoidance_strength: settings.avoidance_strength,
		}
	}
	pub fn get_position(&self) -> Vec2 {
		self.position
	}
	pub fn set_position(&mut self, position: Vec2) {
		self.position = position;
	}
	pub fn get_velocity(&self) -> Vec2 {
		self.velocity
	}
	pub fn set_velocity(&mut self, velocity: Vec2) {
		self.velocity = velocity;
	}
	pub fn get_desired_velocity(&self) -> Vec2 {
		self.desired_velocity
	}
	pub fn get_radius(&self) -> f32 {
		self.radius
	}
	pub fn get_max_speed(&self) -> f32 {
		self.max_speed
	}
	pub fn get_avoidance_strength(&self) -> f32 {
		self.avoidance_strength
	}
	/// Point the agent along `direction` at full speed
	pub fn steer(&mut self, direction: Vec2) {
		self.desired_velocity = direction * self.max_speed;
	}
	/// Read-only copy of the agent handed to the avoidance resolver.
	/// `flow_direction` is the direction of the cell the agent stands in
	pub fn snapshot(&self, flow_direction: Vec2) -> AgentSnapshot {
		AgentSnapshot {
			position: self.position,
			desired_velocity: self.desired_velocity,
			flow_direction,
			radius: self.radius,
			max_speed: self.max_speed,
			avoidance_strength: self.avoidance_strength,
		}
	}
	/// Advance the position by the current velocity over `dt` seconds
	pub fn integrate(&mut self, dt: f32) {
		self.position += self.velocity * dt;
	}
}

/// The state of an [Agent] at the start of a tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSnapshot {
	/// Position at the start of the tick
	position: Vec2,
	/// Velocity the flow field asks for
	desired_velocity: Vec2,
	/// Direction of the cell the agent stands in, zero when there is none
	flow_direction: Vec2,
	/// Body radius
	radius: f32,
	/// Speed limit
	max_speed: f32,
	/// Repulsion scale
	avoidance_strength: f32,
}

impl AgentSnapshot {
	pub fn get_position(&self) -> Vec2 {
		self.position
	}
	pub fn get_desired_velocity(&self) -> Vec2 {
		self.desired_velocity
	}
	pub fn get_flow_direction(&self) -> Vec2 {
		self.flow_direction
	}
	pub fn get_radius(&self) -> f32 {
		self.radius
	}
	pub fn get_max_speed(&self) -> f32 {
		self.max_speed
	}
	pub fn get_avoidance_strength(&self) -> f32 {
		self.avoidance_strength
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn new_agent_is_at_rest() {
		let agent = Agent::new(Vec2::new(1.0, 2.0), &AgentSettings::default());
		assert_eq!(Vec2::ZERO, agent.get_velocity());
		assert_eq!(0.5, agent.get_radius());
		assert_eq!(5.0, agent.get_max_speed());
	}
	#[test]
	fn steer_scales_by_max_speed() {
		let mut agent = Agent::new(Vec2::ZERO, &AgentSettings::default());
		agent.steer(Vec2::new(0.0, -1.0));
		assert_eq!(Vec2::new(0.0, -5.0), agent.get_desired_velocity());
	}
	#[test]
	fn integrate_is_explicit_euler() {
		let mut agent = Agent::new(Vec2::new(1.0, 1.0), &AgentSettings::default());
		agent.set_velocity(Vec2::new(2.0, -4.0));
		agent.integrate(0.25);
		assert_eq!(Vec2::new(1.5, 0.0), agent.get_position());
	}
}
