//! Parsing of the derive input into the data the generators need.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod persist_derive;
mod persist_enum;
mod persist_meta;
mod persist_struct;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use type_attributes::TypeAttributes;

pub(crate) use persist_derive::PersistDerive;
pub(crate) use persist_enum::{EnumVariant, PersistEnum};
pub(crate) use persist_meta::PersistMeta;
pub(crate) use persist_struct::{PersistStruct, StructField};
