//! Static type descriptors.
//!
//! - [`TypePath`]: stable names of a type.
//! - [`Typed`]: access to the type's [`TypeInfo`].
//! - [`StructInfo`] / [`FieldInfo`]: the participating fields of an object
//!   type, computed once and shared by both conversion directions.
//! - [`EnumInfo`]: the variants of a C-like enum.

// -----------------------------------------------------------------------------
// Modules

mod enum_info;
mod field_info;
mod struct_info;
mod type_info;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use enum_info::{EnumInfo, VariantInfo};
pub use field_info::FieldInfo;
pub use struct_info::StructInfo;
pub use type_info::{ScalarInfo, TypeInfo, Typed};
pub use type_path::TypePath;
