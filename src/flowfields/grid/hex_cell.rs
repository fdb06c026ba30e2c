//! A single hexagon of a [HexGrid]
//!

use crate::prelude::*;
use bevy::prelude::*;
use smallvec::SmallVec;

/// A cell of the grid. The cost and flow direction of the cell are not stored
/// here, they belong to the [CostField] and [FlowField] of a [HexFlowField]
/// and are looked up with [HexCell::get_index]
#[derive(Clone, Debug)]
pub struct HexCell {
	/// Axial coordinate, unique within a grid
	coord: HexCoord,
	/// Position of the index within the [HexGrid] cell list
	index: usize,
	/// Centre of the cell in world space
	position: Vec2,
	/// Whether the cell is blocked
	is_obstacle: bool,
	/// Indices of the neighbouring cells that exist within the grid, in
	/// [HexDirection::ALL] order with missing ones skipped
	neighbours: SmallVec<[usize; 6]>,
}

impl HexCell {
	/// Create a new instance of [HexCell] with no neighbours
	pub fn new(coord: HexCoord, index: usize, position: Vec2, is_obstacle: bool) -> Self {
		HexCell {
			coord,
			index,
			position,
			is_obstacle,
			neighbours: SmallVec::new(),
		}
	}
	pub fn get_coord(&self) -> HexCoord {
		self.coord
	}
	pub fn get_index(&self) -> usize {
		self.index
	}
	pub fn get_position(&self) -> Vec2 {
		self.position
	}
	pub fn is_obstacle(&self) -> bool {
		self.is_obstacle
	}
	/// Indices of neighbouring cells
	pub fn get_neighbours(&self) -> &[usize] {
		&self.neighbours
	}
	/// Record a neighbour, only used while the grid is being wired
	pub(crate) fn add_neighbour(&mut self, index: usize) {
		self.neighbours.push(index);
	}
}
