//! Recoverable failures of the plugin. None of them are fatal, a failed
//! [crate::prelude::HexFlowField] generation keeps whatever field was
//! generated before it
//!

use std::fmt;

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexFlowError {
	/// The requested target coordinate doesn't exist in the grid
	TargetOutsideGrid(HexCoord),
	/// The requested target coordinate is blocked and can never have a cost of `0`
	TargetIsObstacle(HexCoord),
	/// Settings could not be read, deserialized, or hold values the simulation can't run with
	Settings(String),
	/// An obstacle file could not be read or deserialized
	#[cfg(feature = "csv")]
	ObstacleFile(String),
}

impl fmt::Display for HexFlowError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			HexFlowError::TargetOutsideGrid(coord) => {
				write!(f, "target {:?} is outside of the grid", coord.get())
			}
			HexFlowError::TargetIsObstacle(coord) => {
				write!(f, "target {:?} is an obstacle", coord.get())
			}
			HexFlowError::Settings(e) => write!(f, "invalid settings: {}", e),
			#[cfg(feature = "csv")]
			HexFlowError::ObstacleFile(e) => write!(f, "failed loading obstacles: {}", e),
		}
	}
}

impl std::error::Error for HexFlowError {}
