//! Conversion between axial hex coordinates and 2d world space.
//!
//! The world plane is `(x, y)`; the plugin maps it onto a `Transform` in
//! either the `x-y` (2d) or `x-z` (3d) plane. The grid origin `(0, 0)` sits at
//! world origin.
//!
//! Axial coordinates `(q, r)` are a projection of cube coordinates
//! `(q, r, s)` where `q + r + s == 0` always holds:
//!
//! ```text
//!            _____
//!      _____/ 0,1 \_____
//!     /-1,1 \_____/ 1,0 \
//!     \_____/ 0,0 \_____/
//!     /-1,0 \_____/ 1,-1\
//!     \_____/ 0,-1\_____/
//!           \_____/
//! ```
//!

use crate::prelude::*;
use bevy::prelude::*;

/// `sqrt(3)`
const SQRT_3: f32 = 1.732_050_8;

/// Describes the size and orientation of the hexagons so that coordinates can
/// be moved in and out of world space
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct HexLayout {
	/// Distance from the centre of a hexagon to any of its vertices
	cell_size: f32,
	/// Pointy or flat topped
	orientation: HexOrientation,
}

impl HexLayout {
	/// Create a new instance of [HexLayout]. The `cell_size` must be a
	/// positive finite number
	pub fn new(cell_size: f32, orientation: HexOrientation) -> Self {
		if !cell_size.is_finite() || cell_size <= 0.0 {
			panic!(
				"HexLayout cell size must be a positive number, got {}",
				cell_size
			);
		}
		HexLayout {
			cell_size,
			orientation,
		}
	}
	pub fn get_cell_size(&self) -> f32 {
		self.cell_size
	}
	pub fn get_orientation(&self) -> HexOrientation {
		self.orientation
	}
	/// Distance between the centres of two adjacent cells
	pub fn get_neighbour_spacing(&self) -> f32 {
		self.cell_size * SQRT_3
	}
	/// Find the world position of the centre of a cell
	pub fn axial_to_world(&self, coord: HexCoord) -> Vec2 {
		let q = coord.get_q() as f32;
		let r = coord.get_r() as f32;
		match self.orientation {
			HexOrientation::Pointy => Vec2::new(
				self.cell_size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
				self.cell_size * (1.5 * r),
			),
			HexOrientation::Flat => Vec2::new(
				self.cell_size * (1.5 * q),
				self.cell_size * (SQRT_3 / 2.0 * q + SQRT_3 * r),
			),
		}
	}
	/// Find the fractional `(q, r)` axial position of a point in world space
	pub fn world_to_fractional_axial(&self, position: Vec2) -> (f32, f32) {
		match self.orientation {
			HexOrientation::Pointy => (
				(SQRT_3 / 3.0 * position.x - position.y / 3.0) / self.cell_size,
				(2.0 / 3.0 * position.y) / self.cell_size,
			),
			HexOrientation::Flat => (
				(2.0 / 3.0 * position.x) / self.cell_size,
				(-position.x / 3.0 + SQRT_3 / 3.0 * position.y) / self.cell_size,
			),
		}
	}
	/// Find the coordinate of the cell containing a point in world space.
	/// This is unbounded, the coordinate may not exist in a [HexGrid]
	pub fn world_to_axial(&self, position: Vec2) -> HexCoord {
		let (q, r) = self.world_to_fractional_axial(position);
		cube_round(q, r)
	}
}

impl Default for HexLayout {
	fn default() -> Self {
		HexLayout::new(1.0, HexOrientation::Pointy)
	}
}

/// Round a fractional axial position to the nearest cell.
///
/// Each of the three cube components is rounded independently and the one
/// which moved the most is then recomputed from the other two so that
/// `q + r + s == 0` holds exactly
pub fn cube_round(q: f32, r: f32) -> HexCoord {
	let s = -q - r;
	let mut rq = q.round();
	let mut rr = r.round();
	let rs = s.round();

	let q_diff = (rq - q).abs();
	let r_diff = (rr - r).abs();
	let s_diff = (rs - s).abs();

	if q_diff > r_diff && q_diff > s_diff {
		rq = -rr - rs;
	} else if r_diff > s_diff {
		rr = -rq - rs;
	}
	// otherwise `s` is the one to correct, and it is implied by `q` and `r`
	HexCoord::new(rq as i32, rr as i32)
}
