//! Representation rules shared by both conversion directions.
//!
//! - [`representation_of`]: which node kind a value is persisted as.
//! - [`FromPrimitive`]: how a primitive is read back into a scalar.
//! - [`lookup_field`]: which compound entry feeds a field, with former-name
//!   fallback.
//! - [`resolve_type`]: how a declared type is found in the registry.

// -----------------------------------------------------------------------------
// Modules

mod convert;

// -----------------------------------------------------------------------------
// Exports

pub use convert::{ConvertError, FromPrimitive};

// -----------------------------------------------------------------------------
// Representation

use vc_tree::{Compound, Node};

use crate::info::FieldInfo;
use crate::registry::{TypeMeta, TypeRegistry};
use crate::{Reflect, ReflectRef};

/// The node a value is persisted as, in order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// A property tree node, deep-copied.
    Node,
    /// A single primitive: numbers, strings, bytes, enums, times, UUIDs and
    /// asset references.
    Primitive,
    /// A fixed-size array, as a list.
    Array,
    /// A string-keyed mapping, as a compound without identity or type.
    Map,
    /// A growable sequence, as a list.
    List,
    /// A general object, as a compound with identity and declared type.
    Object,
    /// An optional value; null or the representation of its content.
    Option,
    /// No persisted form.
    Unsupported,
}

/// Classifies a value by its reflection kind.
pub fn representation_of(value: &dyn Reflect) -> Representation {
    match value.reflect_ref() {
        ReflectRef::Node(_) => Representation::Node,
        ReflectRef::Scalar(_) | ReflectRef::Asset(_) => Representation::Primitive,
        ReflectRef::Array(_) => Representation::Array,
        ReflectRef::Map(_) => Representation::Map,
        ReflectRef::List(_) => Representation::List,
        ReflectRef::Shared(_) | ReflectRef::Struct(_) => Representation::Object,
        ReflectRef::Option(_) => Representation::Option,
        ReflectRef::Opaque(_) => Representation::Unsupported,
    }
}

/// Whether the value is persisted as null: an empty option, a null or
/// dangling reference, or an empty asset reference.
pub fn is_null(value: &dyn Reflect) -> bool {
    match value.reflect_ref() {
        ReflectRef::Option(option) => option.get().is_none(),
        ReflectRef::Shared(shared) => shared.handle().is_none(),
        ReflectRef::Asset(asset) => asset.is_empty(),
        ReflectRef::Node(node) => node.is_null(),
        _ => false,
    }
}

/// The entry holding the field's value: its current name first, then each
/// former name in order.
///
/// # Examples
///
/// ```
/// use vc_persist::info::FieldInfo;
/// use vc_persist::policy::lookup_field;
/// use vc_persist::tree::{Compound, Node};
///
/// let field = FieldInfo::new("health", "game::Unit", "u32")
///     .with_former_names(&["hp", "hit_points"]);
///
/// let mut old = Compound::new();
/// old.insert("hit_points", 10_u32);
/// old.insert("hp", 12_u32);
///
/// assert_eq!(lookup_field(&old, &field), Some(&Node::from(12_u32)));
/// ```
pub fn lookup_field<'a>(compound: &'a Compound, field: &FieldInfo) -> Option<&'a Node> {
    compound.get(field.name()).or_else(|| {
        field
            .former_names()
            .iter()
            .find_map(|former| compound.get(former))
    })
}

/// Finds the registered type a compound declares: by full type path, or
/// by short type name when that is unambiguous.
pub fn resolve_type<'a>(registry: &'a TypeRegistry, declared: &str) -> Option<&'a TypeMeta> {
    registry
        .get_with_type_path(declared)
        .or_else(|| registry.get_with_type_name(declared))
}
