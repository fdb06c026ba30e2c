//! Defines the Bevy [Plugin] for hexagonal FlowFields
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod flow_layer;
pub mod steering_layer;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Regenerate fields and move agents
	Simulate,
	/// Mirror agents onto their transforms
	Present,
}

pub struct HexFlowFieldPlugin;

impl Plugin for HexFlowFieldPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<HexCoord>()
			.register_type::<HexDirection>()
			.register_type::<HexOrientation>()
			.register_type::<HexLayout>()
			.register_type::<Agent>()
			.register_type::<StaticObstacles>()
			.register_type::<TickStats>()
			.register_type::<SimulationState>()
			.register_type::<HexFlowSettings>()
			.register_type::<flow_layer::FlowTarget>()
			.add_event::<flow_layer::EventFlowFieldRegenerated>()
			.add_event::<flow_layer::EventFlowFieldFailed>()
			.configure_sets(
				Update,
				(OrderingSet::Simulate, OrderingSet::Present).chain(),
			)
			.add_systems(
				Update,
				(
					flow_layer::step_simulation.in_set(OrderingSet::Simulate),
					steering_layer::write_agent_transforms.in_set(OrderingSet::Present),
				),
			);
	}
}
