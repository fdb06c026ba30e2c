//! Useful structures and tools used by the grid and fields
//!

use bevy::prelude::*;

/// Cost of a cell which cannot be reached from the target, either because it
/// is an obstacle or because it is walled off by obstacles
pub const COST_UNREACHABLE: u32 = u32::MAX;

/// Distances below this are treated as coincident when resolving forces
pub const MIN_SEPARATION: f32 = 0.001;

/// Convenience way of accessing the 6 sides of a hexagonal cell. The variant
/// order is the canonical neighbour enumeration order, it decides ties when
/// two neighbours share the cheapest cost in a [crate::prelude::FlowField]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Reflect)]
pub enum HexDirection {
	East,
	NorthEast,
	NorthWest,
	West,
	SouthWest,
	SouthEast,
}

impl HexDirection {
	/// All directions in neighbour enumeration order
	pub const ALL: [HexDirection; 6] = [
		HexDirection::East,
		HexDirection::NorthEast,
		HexDirection::NorthWest,
		HexDirection::West,
		HexDirection::SouthWest,
		HexDirection::SouthEast,
	];
	/// The axial `(q, r)` offset to step one cell in this direction
	pub fn axial_offset(&self) -> (i32, i32) {
		match self {
			HexDirection::East => (1, 0),
			HexDirection::NorthEast => (0, 1),
			HexDirection::NorthWest => (-1, 1),
			HexDirection::West => (-1, 0),
			HexDirection::SouthWest => (0, -1),
			HexDirection::SouthEast => (1, -1),
		}
	}
}

/// Which way up the hexagons sit in world space
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Reflect)]
pub enum HexOrientation {
	/// A vertex points along `+y`, rows of cells are horizontal
	#[default]
	Pointy,
	/// An edge faces `+y`, columns of cells are vertical
	Flat,
}
