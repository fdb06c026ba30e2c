//! Mirror [Agent]s onto their `Transform`s. The grid is a flat `(x, y)` plane
//! which maps onto world `x-y` in 2d and `x-z` in 3d (`3d` feature)
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Agents slower than this keep their current facing
const MIN_FACING_SPEED_SQUARED: f32 = 0.01;

/// Project a world translation onto the grid plane
#[cfg(not(feature = "3d"))]
pub fn to_plane(translation: Vec3) -> Vec2 {
	translation.truncate()
}
/// Project a world translation onto the grid plane
#[cfg(feature = "3d")]
pub fn to_plane(translation: Vec3) -> Vec2 {
	Vec2::new(translation.x, translation.z)
}
/// Place a grid position back into the world, keeping the height/depth
/// component of `translation`
#[cfg(not(feature = "3d"))]
pub fn from_plane(position: Vec2, translation: Vec3) -> Vec3 {
	position.extend(translation.z)
}
/// Place a grid position back into the world, keeping the height/depth
/// component of `translation`
#[cfg(feature = "3d")]
pub fn from_plane(position: Vec2, translation: Vec3) -> Vec3 {
	Vec3::new(position.x, translation.y, position.y)
}

/// Write the position of each [Agent] into its `Transform` and turn it to
/// face the way it is moving
#[cfg(not(tarpaulin_include))]
pub fn write_agent_transforms(mut agent_q: Query<(&Agent, &mut Transform)>) {
	for (agent, mut transform) in &mut agent_q {
		transform.translation = from_plane(agent.get_position(), transform.translation);
		let velocity = agent.get_velocity();
		if velocity.length_squared() > MIN_FACING_SPEED_SQUARED {
			face(&mut transform, velocity);
		}
	}
}

/// Rotate about `z` so that local `x` points along `velocity`
#[cfg(not(feature = "3d"))]
fn face(transform: &mut Transform, velocity: Vec2) {
	transform.rotation = Quat::from_rotation_z(velocity.y.atan2(velocity.x));
}
/// Look along `velocity` with `y` up
#[cfg(feature = "3d")]
fn face(transform: &mut Transform, velocity: Vec2) {
	transform.look_to(Vec3::new(velocity.x, 0.0, velocity.y), Vec3::Y);
}
