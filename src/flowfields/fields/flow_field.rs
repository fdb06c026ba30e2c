//! A [FlowField] holds a unit direction for every cell of a [HexGrid]. The
//! direction points at the neighbouring cell with the lowest [CostField]
//! value, so an actor which keeps following the directions walks a shortest
//! path to the target. A steering pipeline should read the direction of the
//! cell an actor stands in and turn it into a velocity.
//!
//! A zero vector means there is nowhere to go: the cell is the target, an
//! obstacle, or cannot reach the target.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Steepest descent direction of each cell
#[derive(Clone, Debug, PartialEq)]
pub struct FlowField(Vec<Vec2>);

impl Field<Vec2> for FlowField {
	/// Get a reference to the field array
	fn get(&self) -> &[Vec2] {
		&self.0
	}
	/// Retrieve a cell value
	fn get_cell_value(&self, index: usize) -> Vec2 {
		if index >= self.0.len() {
			panic!(
				"Cannot get a FlowField value, index out of bounds. Asked for {}, field length is {}",
				index,
				self.0.len()
			)
		}
		self.0[index]
	}
	/// Set a cell to a value
	fn set_cell_value(&mut self, value: Vec2, index: usize) {
		if index >= self.0.len() {
			panic!(
				"Cannot set a FlowField value, index out of bounds. Asked for {}, field length is {}",
				index,
				self.0.len()
			)
		}
		self.0[index] = value;
	}
}

impl FlowField {
	/// Creates a new [FlowField] sized to the `grid` where every direction is zero
	pub fn new(grid: &HexGrid) -> Self {
		FlowField(vec![Vec2::ZERO; grid.len()])
	}
	/// Calculate the [FlowField] from a [CostField] that was generated for `target`
	pub fn calculate(&mut self, grid: &HexGrid, cost_field: &CostField, target: usize) {
		let cells = grid.get_cells();
		for cell in cells.iter() {
			let index = cell.get_index();
			let current_cost = cost_field.get_cell_value(index);
			if cell.is_obstacle() || current_cost == COST_UNREACHABLE || index == target {
				self.set_cell_value(Vec2::ZERO, index);
				continue;
			}
			// store the cheapest neighbour, the first one found wins a tie
			let mut cheapest_value = current_cost;
			let mut cheapest_neighbour = None;
			for n in cell.get_neighbours().iter() {
				let neighbour_cost = cost_field.get_cell_value(*n);
				if neighbour_cost < cheapest_value {
					cheapest_value = neighbour_cost;
					cheapest_neighbour = Some(*n);
				}
			}
			let direction = match cheapest_neighbour {
				Some(n) => (cells[n].get_position() - cell.get_position()).normalize_or_zero(),
				None => Vec2::ZERO,
			};
			self.set_cell_value(direction, index);
		}
	}
}
