//! Logic relating to stepping the [SimulationDriver] each frame
//!

use crate::prelude::*;
use bevy::prelude::*;
use bevy::tasks::{ComputeTaskPool, TaskPool};

/// Marks the entity agents are steered toward, only one should exist
#[derive(Component, Default, Reflect)]
pub struct FlowTarget;

/// A new [HexFlowField] was generated
#[derive(Event)]
pub struct EventFlowFieldRegenerated {
	/// Entity holding the [SimulationDriver]
	driver: Entity,
	/// Cell the field leads to
	target: HexCoord,
}

impl EventFlowFieldRegenerated {
	pub fn new(driver: Entity, target: HexCoord) -> Self {
		EventFlowFieldRegenerated { driver, target }
	}
	pub fn get_driver(&self) -> Entity {
		self.driver
	}
	pub fn get_target(&self) -> HexCoord {
		self.target
	}
}

/// Generating a [HexFlowField] failed, the previous one is still in use
#[derive(Event)]
pub struct EventFlowFieldFailed {
	/// Entity holding the [SimulationDriver]
	driver: Entity,
	/// Reason
	error: HexFlowError,
}

impl EventFlowFieldFailed {
	pub fn new(driver: Entity, error: HexFlowError) -> Self {
		EventFlowFieldFailed { driver, error }
	}
	pub fn get_driver(&self) -> Entity {
		self.driver
	}
	pub fn get_error(&self) -> &HexFlowError {
		&self.error
	}
}

/// Tick the [SimulationDriver] toward the [FlowTarget] with every [Agent].
/// Agents are read from their `Transform`, handled in [Entity] order so that
/// the fallback directions repeat between runs, then written back to the
/// [Agent] components
#[cfg(not(tarpaulin_include))]
pub fn step_simulation(
	mut driver_q: Query<(Entity, &mut SimulationDriver, &mut TickStats)>,
	target_q: Query<&Transform, With<FlowTarget>>,
	mut agent_q: Query<(Entity, &mut Agent, &Transform), Without<FlowTarget>>,
	time: Res<Time>,
	mut regenerated: EventWriter<EventFlowFieldRegenerated>,
	mut failed: EventWriter<EventFlowFieldFailed>,
) {
	let Ok((driver_entity, mut driver, mut stats)) = driver_q.single_mut() else {
		trace!("Expected a single SimulationDriver, skipping step");
		return;
	};
	let Ok(target_transform) = target_q.single() else {
		trace!("Expected a single FlowTarget, skipping step");
		return;
	};
	let target = steering_layer::to_plane(target_transform.translation);
	// stable order
	let mut entries: Vec<(Entity, Agent)> = agent_q
		.iter()
		.map(|(entity, agent, transform)| {
			let mut agent = *agent;
			agent.set_position(steering_layer::to_plane(transform.translation));
			(entity, agent)
		})
		.collect();
	entries.sort_by_key(|(entity, _)| *entity);
	let mut agents: Vec<Agent> = entries.iter().map(|(_, agent)| *agent).collect();

	let task_pool: &TaskPool = ComputeTaskPool::get_or_init(TaskPool::default);
	let report = driver.tick(target, &mut agents, time.delta_secs(), task_pool);

	for ((entity, _), updated) in entries.iter().zip(agents) {
		if let Ok((_, mut agent, _)) = agent_q.get_mut(*entity) {
			*agent = updated;
		}
	}
	if let Some(coord) = report.get_regenerated() {
		debug!("FlowField regenerated for target {:?}", coord.get());
		regenerated.write(EventFlowFieldRegenerated::new(driver_entity, coord));
	}
	if let Some(error) = report.get_failure() {
		failed.write(EventFlowFieldFailed::new(driver_entity, error.clone()));
	}
	stats.record(&report);
}
