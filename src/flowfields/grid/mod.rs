//! A hexagonal map made of cells addressed by axial coordinates. The grid is
//! built once from a radius and never changes shape, only a new grid can
//! replace it.
//!
//! A grid of radius `n` contains every cell within `n` steps of the origin,
//! `3n(n + 1) + 1` cells in total. Cells are stored in a flat list and the
//! fields of a [crate::prelude::HexFlowField] are indexed the same way.
//!

pub mod hex_cell;
pub mod layout;

use std::collections::HashMap;

use crate::prelude::*;
use bevy::prelude::*;

/// Axial `(q, r)` coordinate of a hexagonal cell
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct HexCoord((i32, i32));

impl HexCoord {
	/// Create a new instance of [HexCoord]
	pub fn new(q: i32, r: i32) -> Self {
		HexCoord((q, r))
	}
	/// Get the `(q, r)` tuple
	pub fn get(&self) -> (i32, i32) {
		self.0
	}
	pub fn get_q(&self) -> i32 {
		self.0 .0
	}
	pub fn get_r(&self) -> i32 {
		self.0 .1
	}
	/// The implied third cube component, `s = -q - r`
	pub fn get_s(&self) -> i32 {
		-self.0 .0 - self.0 .1
	}
	/// The coordinate one step away in `direction`
	pub fn neighbour(&self, direction: HexDirection) -> HexCoord {
		let (dq, dr) = direction.axial_offset();
		HexCoord::new(self.get_q() + dq, self.get_r() + dr)
	}
	/// Number of steps between two cells on an unobstructed grid
	pub fn distance(&self, other: &HexCoord) -> u32 {
		let dq = (self.get_q() - other.get_q()).unsigned_abs();
		let dr = (self.get_r() - other.get_r()).unsigned_abs();
		let ds = (self.get_s() - other.get_s()).unsigned_abs();
		(dq + dr + ds) / 2
	}
}

/// The cells of the map and a lookup from coordinate to cell
#[derive(Clone, Debug)]
pub struct HexGrid {
	/// Number of rings around the origin cell
	radius: u32,
	/// Size and orientation of the cells
	layout: HexLayout,
	/// Every cell, in construction order
	cells: Vec<HexCell>,
	/// Coordinate to position within `cells`
	lookup: HashMap<HexCoord, usize>,
}

impl HexGrid {
	/// Create a new instance of [HexGrid] containing every cell within
	/// `radius` steps of the origin. A cell is marked as an obstacle when
	/// `is_obstacle` returns true for the world position of its centre
	pub fn new<F>(radius: u32, layout: HexLayout, is_obstacle: F) -> Self
	where
		F: Fn(Vec2) -> bool,
	{
		let Ok(r) = i32::try_from(radius) else {
			panic!("HexGrid radius {} is too large, it must fit in an i32", radius);
		};
		let mut cells = Vec::new();
		let mut lookup = HashMap::new();
		for q in -r..=r {
			let r1 = (-r).max(-q - r);
			let r2 = r.min(-q + r);
			for row in r1..=r2 {
				let coord = HexCoord::new(q, row);
				let position = layout.axial_to_world(coord);
				let index = cells.len();
				cells.push(HexCell::new(coord, index, position, is_obstacle(position)));
				lookup.insert(coord, index);
			}
		}
		// wire up neighbours now that every cell exists
		for cell in cells.iter_mut() {
			let coord = cell.get_coord();
			for dir in HexDirection::ALL.iter() {
				if let Some(index) = lookup.get(&coord.neighbour(*dir)) {
					cell.add_neighbour(*index);
				}
			}
		}
		debug!(
			"Built hex grid of radius {} with {} cells, {} obstacles",
			radius,
			cells.len(),
			cells.iter().filter(|c| c.is_obstacle()).count()
		);
		HexGrid {
			radius,
			layout,
			cells,
			lookup,
		}
	}
	/// Create a new instance of [HexGrid] without any obstacles
	pub fn open(radius: u32, layout: HexLayout) -> Self {
		HexGrid::new(radius, layout, |_| false)
	}
	pub fn get_radius(&self) -> u32 {
		self.radius
	}
	pub fn get_layout(&self) -> &HexLayout {
		&self.layout
	}
	/// Get all cells in construction order
	pub fn get_cells(&self) -> &[HexCell] {
		&self.cells
	}
	/// Number of cells
	pub fn len(&self) -> usize {
		self.cells.len()
	}
	/// Whether the grid contains no cells, never true for a constructed grid
	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}
	/// Find the index of a cell. Returns [None] when the coordinate is outside
	/// of the grid
	pub fn get_cell_index(&self, coord: HexCoord) -> Option<usize> {
		self.lookup.get(&coord).copied()
	}
	/// Find a cell. Returns [None] when the coordinate is outside of the grid
	pub fn get_cell(&self, coord: HexCoord) -> Option<&HexCell> {
		self.get_cell_index(coord).map(|i| &self.cells[i])
	}
	/// Get a cell by its index
	pub fn get_cell_by_index(&self, index: usize) -> Option<&HexCell> {
		self.cells.get(index)
	}
	/// Whether the coordinate is a blocked cell, coordinates outside of the
	/// grid are not obstacles, they simply don't exist
	pub fn is_obstacle(&self, coord: HexCoord) -> bool {
		self.get_cell(coord).is_some_and(|c| c.is_obstacle())
	}
	/// Find the coordinate of a world position, it may not exist in the grid
	pub fn world_to_axial(&self, position: Vec2) -> HexCoord {
		self.layout.world_to_axial(position)
	}
	/// Find the world position of a cell centre
	pub fn axial_to_world(&self, coord: HexCoord) -> Vec2 {
		self.layout.axial_to_world(coord)
	}
	/// Find the index of the cell containing a world position
	pub fn get_cell_index_from_world(&self, position: Vec2) -> Option<usize> {
		self.get_cell_index(self.world_to_axial(position))
	}
}
