//! The kinds of fields used by the algorithm. Every field holds one value per
//! cell of a [crate::prelude::HexGrid], indexed the same way as
//! [crate::prelude::HexGrid::get_cells]
//!

pub mod cost_field;
pub mod flow_field;

/// Defines required access to field arrays
pub trait Field<T> {
	/// Get a reference to the field array
	fn get(&self) -> &[T];
	/// Retrieve a cell value
	fn get_cell_value(&self, index: usize) -> T;
	/// Set a cell to a value
	fn set_cell_value(&mut self, value: T, index: usize);
}
