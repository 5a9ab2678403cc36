//! Kind traits: the shapes a [`Reflect`](crate::Reflect) value can take.
//!
//! The drivers never look at concrete types, only at these traits.

// -----------------------------------------------------------------------------
// Modules

mod map;
mod option;
mod scalar;
mod sequence;
mod shared;
mod structs;

// -----------------------------------------------------------------------------
// Exports

pub use map::Map;
pub use option::OptionValue;
pub use scalar::Scalar;
pub use sequence::{Array, List};
pub use shared::SharedValue;
pub use structs::Struct;
