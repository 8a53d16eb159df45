//! Data types for the grid adapter: raw input, cell values and the canonical model.

mod input;
mod model;
mod value;

pub use input::*;
pub use model::*;
pub use value::*;
