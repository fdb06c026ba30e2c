//! Static obstacles are circles captured once when the simulation is set up.
//! They mark cells of the [HexGrid] as impassable and push agents away
//!

use crate::prelude::*;
use bevy::prelude::*;

/// A circular obstacle that never moves
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct StaticObstacle {
	/// Centre
	position: Vec2,
	/// Bounding radius
	radius: f32,
}

impl StaticObstacle {
	/// Create a new instance of [StaticObstacle]
	pub fn new(position: Vec2, radius: f32) -> Self {
		StaticObstacle { position, radius }
	}
	pub fn get_position(&self) -> Vec2 {
		self.position
	}
	pub fn get_radius(&self) -> f32 {
		self.radius
	}
	/// Whether the obstacle overlaps a circle
	pub fn overlaps_circle(&self, centre: Vec2, radius: f32) -> bool {
		self.position.distance(centre) < self.radius + radius
	}
}

/// A row of an obstacle `csv` file
#[cfg(feature = "csv")]
#[derive(serde::Deserialize)]
struct ObstacleRecord {
	/// Centre along `x`
	x: f32,
	/// Centre along `y`
	y: f32,
	/// Bounding radius
	radius: f32,
}

/// Snapshot of every static obstacle in the world
#[derive(Component, Clone, Debug, Default, PartialEq, Reflect)]
pub struct StaticObstacles(Vec<StaticObstacle>);

impl StaticObstacles {
	/// Create a new instance of [StaticObstacles]
	pub fn new(obstacles: Vec<StaticObstacle>) -> Self {
		StaticObstacles(obstacles)
	}
	pub fn get(&self) -> &[StaticObstacle] {
		&self.0
	}
	pub fn len(&self) -> usize {
		self.0.len()
	}
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	/// Keep only the obstacles which touch a circle of `range` around the
	/// world origin
	pub fn within(mut self, range: f32) -> Self {
		self.0.retain(|o| o.overlaps_circle(Vec2::ZERO, range));
		self
	}
	/// Whether any obstacle overlaps a circle
	pub fn overlaps_circle(&self, centre: Vec2, radius: f32) -> bool {
		self.0.iter().any(|o| o.overlaps_circle(centre, radius))
	}
	/// From a `csv` file with `x,y,radius` columns generate the [StaticObstacles]
	#[cfg(feature = "csv")]
	pub fn from_csv(path: &str) -> Result<Self, HexFlowError> {
		let mut reader = csv::Reader::from_path(path)
			.map_err(|e| HexFlowError::ObstacleFile(format!("{}: {}", path, e)))?;
		let mut obstacles = Vec::new();
		for record in reader.deserialize() {
			let row: ObstacleRecord =
				record.map_err(|e| HexFlowError::ObstacleFile(format!("{}: {}", path, e)))?;
			obstacles.push(StaticObstacle::new(Vec2::new(row.x, row.y), row.radius));
		}
		Ok(StaticObstacles(obstacles))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn overlap_is_strict() {
		let obstacle = StaticObstacle::new(Vec2::new(1.0, 0.0), 0.5);
		assert!(obstacle.overlaps_circle(Vec2::new(0.2, 0.0), 0.4));
		// touching edges don't count
		assert!(!obstacle.overlaps_circle(Vec2::ZERO, 0.5));
	}
	#[test]
	fn within_drops_far_obstacles() {
		let obstacles = StaticObstacles::new(vec![
			StaticObstacle::new(Vec2::new(3.0, 0.0), 1.0),
			StaticObstacle::new(Vec2::new(0.0, 25.0), 1.0),
			StaticObstacle::new(Vec2::new(0.0, 20.5), 1.0),
		])
		.within(20.0);
		assert_eq!(2, obstacles.len());
		assert!(!obstacles.overlaps_circle(Vec2::new(0.0, 25.0), 0.1));
	}
	#[test]
	fn any_obstacle_overlaps() {
		let obstacles = StaticObstacles::new(vec![
			StaticObstacle::new(Vec2::new(5.0, 5.0), 1.0),
			StaticObstacle::new(Vec2::new(-5.0, 0.0), 0.2),
		]);
		assert!(obstacles.overlaps_circle(Vec2::new(-5.3, 0.0), 0.4));
		assert!(!obstacles.overlaps_circle(Vec2::ZERO, 0.4));
	}
	#[test]
	#[cfg(feature = "csv")]
	fn obstacles_file_csv() {
		let path = env!("CARGO_MANIFEST_DIR").to_string() + "/assets/obstacles.csv";
		let obstacles = StaticObstacles::from_csv(&path).unwrap();
		assert_eq!(4, obstacles.len());
		assert_eq!(
			StaticObstacle::new(Vec2::new(-3.5, 1.5), 1.0),
			obstacles.get()[1]
		);
	}
	#[test]
	#[cfg(feature = "csv")]
	fn obstacles_file_missing() {
		let result = StaticObstacles::from_csv("does/not/exist.csv");
		assert!(matches!(result, Err(HexFlowError::ObstacleFile(_))));
	}
}
