//! `use bevy_hexflow_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::flowfields::{
	fields::{cost_field::*, flow_field::*, *},
	grid::{hex_cell::*, layout::*, *},
	utilities::*,
	*,
};

#[doc(hidden)]
pub use crate::steering::{agent::*, avoidance::*, obstacles::*};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	error::*,
	plugin::{flow_layer::*, steering_layer::*, *},
	settings::*,
	simulation::*,
};
