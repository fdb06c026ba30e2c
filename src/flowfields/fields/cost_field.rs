//! The CostField holds, for every cell of a [HexGrid], the number of hex steps
//! needed to reach the target cell. It is produced by a breadth-first
//! wavefront expanding from the target:
//!
//! 1. Every cell is reset to [COST_UNREACHABLE] and the target is set to `0`
//! 2. The target is placed on a queue
//! 3. A cell is taken from the front of the queue and each of its walkable
//!    neighbours whose cost is greater than the cell's cost `+ 1` is given
//!    that cost and pushed onto the back of the queue
//! 4. Repeat until the queue is empty
//!
//! As every step between neighbours costs the same the wavefront visits cells
//! in order of distance, so each cell ends up with its exact shortest hex
//! distance around obstacles. A radius `2` grid targeting the origin
//! produces rings of equal cost:
//!
//! ```text
//!              2   2   2
//!            2   1   1   2
//!          2   1   0   1   2
//!            2   1   1   2
//!              2   2   2
//! ```
//!
//! Obstacles are never placed on the queue and keep [COST_UNREACHABLE], as do
//! any cells which are completely walled off by obstacles.
//!

use std::collections::VecDeque;

use crate::prelude::*;

/// Hex step distance from each cell to the target
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostField(Vec<u32>);

impl Field<u32> for CostField {
	/// Get a reference to the field array
	fn get(&self) -> &[u32] {
		&self.0
	}
	/// Retrieve a cell value
	fn get_cell_value(&self, index: usize) -> u32 {
		if index >= self.0.len() {
			panic!(
				"Cannot get a CostField value, index out of bounds. Asked for {}, field length is {}",
				index,
				self.0.len()
			)
		}
		self.0[index]
	}
	/// Set a cell to a value
	fn set_cell_value(&mut self, value: u32, index: usize) {
		if index >= self.0.len() {
			panic!(
				"Cannot set a CostField value, index out of bounds. Asked for {}, field length is {}",
				index,
				self.0.len()
			)
		}
		self.0[index] = value;
	}
}

impl CostField {
	/// Creates a new [CostField] sized to the `grid` where every cell is [COST_UNREACHABLE]
	pub fn new(grid: &HexGrid) -> Self {
		CostField(vec![COST_UNREACHABLE; grid.len()])
	}
	/// Reset every cell to [COST_UNREACHABLE] apart from the `target` which is set to `0`
	pub fn reset(&mut self, target: usize) {
		for value in self.0.iter_mut() {
			*value = COST_UNREACHABLE;
		}
		self.set_cell_value(0, target);
	}
	/// Starting from the `target` cell expand a wavefront through the
	/// neighbours of each cell, recording the step count to reach them. An
	/// obstacle `target` leaves the whole field unreachable
	pub fn calculate(&mut self, grid: &HexGrid, target: usize) {
		let cells = grid.get_cells();
		if cells[target].is_obstacle() {
			for value in self.0.iter_mut() {
				*value = COST_UNREACHABLE;
			}
			return;
		}
		self.reset(target);
		let mut queue = VecDeque::new();
		queue.push_back(target);
		while let Some(current) = queue.pop_front() {
			let next_cost = self.get_cell_value(current) + 1;
			for n in cells[current].get_neighbours().iter() {
				// ignore impassable cells
				if cells[*n].is_obstacle() {
					continue;
				}
				// don't overwrite a cell with a better cost
				if self.get_cell_value(*n) > next_cost {
					self.set_cell_value(next_cost, *n);
					queue.push_back(*n);
				}
			}
		}
	}
	/// Whether the target can be reached from the cell
	pub fn is_reachable(&self, index: usize) -> bool {
		self.get_cell_value(index) != COST_UNREACHABLE
	}
	/// The largest cost of any reachable cell, [None] if nothing is reachable
	pub fn max_reachable(&self) -> Option<u32> {
		self.0
			.iter()
			.filter(|c| **c != COST_UNREACHABLE)
			.max()
			.copied()
	}
}
