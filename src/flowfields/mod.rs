//! Flowfields are a means of handling pathfinding for a crowd of actors.
//!
//! [Fixing Pathfinding Once and For All](https://web.archive.org/web/20150905073624/http://www.ai-blog.net/archives/000152.html)
//!
//! [jdxdev](https://www.jdxdev.com/blog/2020/05/03/flowfields/)
//!
//! [leifnode](https://leifnode.com/2013/12/flow-field-pathfinding/)
//!
//! [Red Blob Games - Hexagonal Grids](https://www.redblobgames.com/grids/hexagons/)
//!
//! The map is a hexagonal [HexGrid] of cells with a single target cell. Two
//! fields are calculated for the target and every actor on the map reads from
//! the same pair, which is what makes the approach cheap for large crowds.
//!
//! Definitions:
//!
//! * Cell - a hexagon of the grid addressed by an axial [HexCoord], it is either walkable or an obstacle
//! * Cost field - the number of hex steps from each cell to the target, [COST_UNREACHABLE] for obstacles and cells that are walled off
//! * Flow field - a unit vector per cell pointing at its cheapest neighbour, zero at the target and wherever there is no route
//!
//! Whenever the target moves into a different cell both fields are rebuilt
//! from scratch into fresh buffers and swapped in once complete, so readers
//! only ever see a whole field.
//!

pub mod fields;
pub mod grid;
pub mod utilities;

use crate::prelude::*;
use bevy::prelude::*;

/// The cost and flow fields of a grid for the most recent target
#[derive(Clone, Debug)]
pub struct HexFlowField {
	/// Target coordinate the current fields were generated for
	target: Option<HexCoord>,
	/// Target coordinate of the most recent generation attempt, successful or not
	requested: Option<HexCoord>,
	/// Distances to `target`
	cost_field: CostField,
	/// Directions toward `target`
	flow_field: FlowField,
}

impl HexFlowField {
	/// Create a new instance of [HexFlowField] sized for `grid` which hasn't
	/// been generated yet, every cell is unreachable with a zero direction
	pub fn new(grid: &HexGrid) -> Self {
		HexFlowField {
			target: None,
			requested: None,
			cost_field: CostField::new(grid),
			flow_field: FlowField::new(grid),
		}
	}
	/// Whether a field has been successfully generated
	pub fn is_generated(&self) -> bool {
		self.target.is_some()
	}
	/// Target of the current fields
	pub fn get_target(&self) -> Option<HexCoord> {
		self.target
	}
	/// Target of the most recent generation attempt
	pub fn get_requested_target(&self) -> Option<HexCoord> {
		self.requested
	}
	pub fn get_cost_field(&self) -> &CostField {
		&self.cost_field
	}
	pub fn get_flow_field(&self) -> &FlowField {
		&self.flow_field
	}
	/// Whether `target` differs from the last target generation was attempted
	/// for. A failed attempt counts so that an unreachable target isn't
	/// retried until it moves again
	pub fn needs_regeneration(&self, target: HexCoord) -> bool {
		self.requested != Some(target)
	}
	/// Rebuild both fields for `target`. On failure the previous fields are
	/// left untouched
	pub fn generate(&mut self, grid: &HexGrid, target: HexCoord) -> Result<(), HexFlowError> {
		self.requested = Some(target);
		let Some(target_index) = grid.get_cell_index(target) else {
			warn!(
				"Target {:?} is outside of the grid, keeping the previous FlowField",
				target.get()
			);
			return Err(HexFlowError::TargetOutsideGrid(target));
		};
		if grid.get_cells()[target_index].is_obstacle() {
			warn!(
				"Target {:?} is an obstacle, keeping the previous FlowField",
				target.get()
			);
			return Err(HexFlowError::TargetIsObstacle(target));
		}
		let mut cost_field = CostField::new(grid);
		cost_field.calculate(grid, target_index);
		let mut flow_field = FlowField::new(grid);
		flow_field.calculate(grid, &cost_field, target_index);
		// swap in the complete pair
		self.cost_field = cost_field;
		self.flow_field = flow_field;
		self.target = Some(target);
		debug!("Generated FlowField for target {:?}", target.get());
		Ok(())
	}
	/// Get the cost of a cell, [None] if it isn't part of the grid
	pub fn get_cost(&self, grid: &HexGrid, coord: HexCoord) -> Option<u32> {
		grid.get_cell_index(coord)
			.map(|i| self.cost_field.get_cell_value(i))
	}
	/// Get the direction of a cell, [None] if it isn't part of the grid
	pub fn get_direction(&self, grid: &HexGrid, coord: HexCoord) -> Option<Vec2> {
		grid.get_cell_index(coord)
			.map(|i| self.flow_field.get_cell_value(i))
	}
	/// Get the direction of the cell containing a world position, [None] if
	/// the position lies outside of the grid
	pub fn get_flow_direction(&self, grid: &HexGrid, position: Vec2) -> Option<Vec2> {
		self.get_direction(grid, grid.world_to_axial(position))
	}
	/// The largest cost of any cell that can reach the target
	pub fn max_reachable_cost(&self) -> Option<u32> {
		self.cost_field.max_reachable()
	}
}
